//! Data models for Libris

pub mod admin;
pub mod analytics;
pub mod book;
pub mod category;
pub mod circulation;
pub mod enums;
pub mod member;
pub mod review;
pub mod suggestion;

// Re-export commonly used types
pub use admin::AdminClaims;
pub use analytics::{BookReadCount, IssuedBook, LibrarySummary, ReaderActivity};
pub use book::{Book, CreateBook, SearchQuery, UpdateBook};
pub use category::{Category, CategoryInput};
pub use circulation::{Circulation, CirculationRequest, NewLoan, ReturnedLoan};
pub use enums::{BookStatus, CirculationAction, CirculationStatus, SuggestionStatus};
pub use member::{CreateMember, Member, UpdateMember};
pub use review::{BookReview, CreateReview};
pub use suggestion::{BookSuggestion, CreateSuggestion, UpdateSuggestionStatus};
