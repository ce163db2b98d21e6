//! Repository layer: storage traits and their backends
//!
//! Each entity family has its own trait so services only see what they use.
//! [`Storage`] bundles them for a backend; [`memory::MemStorage`] and
//! [`postgres::PgStorage`] are the two implementations.
//!
//! Update and delete of an unknown id are not errors at this level: they
//! return `None` / `false` and the service layer decides what that means.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    error::AppResult,
    models::{
        Book, BookReadCount, BookReview, BookSuggestion, Category, Circulation, CreateBook,
        CreateMember, CreateReview, CreateSuggestion, IssuedBook, LibrarySummary, Member,
        NewLoan, ReaderActivity, ReturnedLoan, SuggestionStatus, UpdateBook, UpdateMember,
    },
};

pub use memory::MemStorage;
pub use postgres::PgStorage;

#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list_books(&self) -> AppResult<Vec<Book>>;
    async fn get_book(&self, id: i32) -> AppResult<Option<Book>>;
    /// New books start out available
    async fn create_book(&self, data: &CreateBook) -> AppResult<Book>;
    async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>>;
    /// Fails with `Conflict` while the book is on loan
    async fn delete_book(&self, id: i32) -> AppResult<bool>;
    /// `term` is matched as a literal, case-insensitive substring
    async fn search_books(&self, term: &str) -> AppResult<Vec<Book>>;
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn list_members(&self) -> AppResult<Vec<Member>>;
    async fn get_member(&self, id: i32) -> AppResult<Option<Member>>;
    /// Fails with `Conflict` on a duplicate registration number
    async fn create_member(&self, data: &CreateMember) -> AppResult<Member>;
    async fn update_member(&self, id: i32, data: &UpdateMember) -> AppResult<Option<Member>>;
    /// Fails with `Conflict` while the member holds an active loan
    async fn delete_member(&self, id: i32) -> AppResult<bool>;
    async fn search_members(&self, term: &str) -> AppResult<Vec<Member>>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn get_category(&self, id: i32) -> AppResult<Option<Category>>;
    /// Fails with `Conflict` on a duplicate name
    async fn create_category(&self, name: &str) -> AppResult<Category>;
    async fn rename_category(&self, id: i32, name: &str) -> AppResult<Option<Category>>;
    async fn delete_category(&self, id: i32) -> AppResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn list_suggestions(&self) -> AppResult<Vec<BookSuggestion>>;
    async fn get_suggestion(&self, id: i32) -> AppResult<Option<BookSuggestion>>;
    /// Fails with `NotFound` when the member does not exist
    async fn create_suggestion(&self, data: &CreateSuggestion) -> AppResult<BookSuggestion>;
    /// Decide a pending suggestion. `None` for an unknown id,
    /// `Conflict` when it was already approved or rejected.
    async fn set_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
    ) -> AppResult<Option<BookSuggestion>>;
}

#[async_trait]
pub trait ReviewStore: Send + Sync {
    async fn list_reviews(&self) -> AppResult<Vec<BookReview>>;
    async fn get_review(&self, id: i32) -> AppResult<Option<BookReview>>;
    async fn reviews_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>>;
    /// Fails with `NotFound` when the book or member does not exist
    async fn create_review(&self, data: &CreateReview) -> AppResult<BookReview>;
}

/// Circulation log and the borrow/return transitions.
///
/// `issue_book` and `return_book` apply all of their writes or none.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CirculationStore: Send + Sync {
    /// Every record, newest first
    async fn list_circulation(&self) -> AppResult<Vec<Circulation>>;
    /// Unreturned borrow records, overdue ones included
    async fn active_loans(&self) -> AppResult<Vec<Circulation>>;
    /// Active records whose due date is before `now`
    async fn overdue_loans(&self, now: DateTime<Utc>) -> AppResult<Vec<Circulation>>;
    async fn member_history(&self, member_id: i32) -> AppResult<Vec<Circulation>>;
    /// Opens a loan and marks the book issued.
    /// `NotFound` for an unknown book or member, `Conflict` if the book is not available.
    async fn issue_book(&self, loan: &NewLoan) -> AppResult<Circulation>;
    /// Closes the open loan of a book, logs the return and frees the book.
    /// `NotFound` when the book has no open loan, `Conflict` when `borrower`
    /// is given and someone else holds the book.
    async fn return_book(
        &self,
        book_id: i32,
        borrower: Option<i32>,
        returned_at: DateTime<Utc>,
    ) -> AppResult<ReturnedLoan>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    /// Borrow counts per book, highest first
    async fn most_read_books(&self) -> AppResult<Vec<BookReadCount>>;
    /// Borrow counts per member, highest first
    async fn most_active_readers(&self) -> AppResult<Vec<ReaderActivity>>;
    async fn issued_books(&self, now: DateTime<Utc>) -> AppResult<Vec<IssuedBook>>;
    async fn summary(&self, now: DateTime<Utc>) -> AppResult<LibrarySummary>;
}

/// A complete storage backend
#[async_trait]
pub trait Storage:
    BookStore + MemberStore + CategoryStore + SuggestionStore + ReviewStore + CirculationStore + AnalyticsStore
{
    /// Short backend name for logs and readiness output
    fn backend(&self) -> &'static str;

    /// Check the backend can serve requests
    async fn ping(&self) -> AppResult<()>;
}
