//! In-process storage backend
//!
//! Every collection lives in one [`MemState`] behind a single async
//! `RwLock`, so a write guard is the transaction scope for the multi-record
//! circulation operations.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{
    AnalyticsStore, BookStore, CategoryStore, CirculationStore, MemberStore, ReviewStore,
    Storage, SuggestionStore,
};
use crate::{
    error::{AppError, AppResult},
    models::{
        Book, BookReadCount, BookReview, BookStatus, BookSuggestion, Category, Circulation,
        CirculationAction, CirculationStatus, CreateBook, CreateMember, CreateReview,
        CreateSuggestion, IssuedBook, LibrarySummary, Member, NewLoan, ReaderActivity,
        ReturnedLoan, SuggestionStatus, UpdateBook, UpdateMember,
    },
};

/// Rows keyed by a monotonically increasing surrogate id
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    fn get(&self, id: i32) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn contains(&self, id: i32) -> bool {
        self.rows.contains_key(&id)
    }
}

struct MemState {
    books: Table<Book>,
    members: Table<Member>,
    categories: Table<Category>,
    suggestions: Table<BookSuggestion>,
    reviews: Table<BookReview>,
    circulation: Table<Circulation>,
}

impl MemState {
    fn open_loan(&self, book_id: i32) -> Option<&Circulation> {
        self.circulation
            .rows
            .values()
            .rev()
            .find(|c| c.book_id == book_id && c.status == CirculationStatus::Active)
    }

    fn active(&self) -> impl Iterator<Item = &Circulation> {
        self.circulation
            .rows
            .values()
            .filter(|c| c.status == CirculationStatus::Active)
    }

    fn borrow_counts(&self, key: impl Fn(&Circulation) -> i32) -> HashMap<i32, i64> {
        let mut counts = HashMap::new();
        for record in self.circulation.rows.values() {
            if record.action == CirculationAction::Borrow {
                *counts.entry(key(record)).or_insert(0) += 1;
            }
        }
        counts
    }
}

/// Storage backend keeping everything in memory; contents are lost on exit
pub struct MemStorage {
    state: RwLock<MemState>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemState {
                books: Table::new(),
                members: Table::new(),
                categories: Table::new(),
                suggestions: Table::new(),
                reviews: Table::new(),
                circulation: Table::new(),
            }),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn already_decided(id: i32, status: SuggestionStatus) -> AppError {
    AppError::Conflict(format!("Suggestion {} was already {}", id, status))
}

/// Oldest due date first, loans without one last
fn by_due_date(records: &mut [Circulation]) {
    records.sort_by_key(|c| (c.due_date.is_none(), c.due_date, c.id));
}

/// Newest first
fn by_date_desc(records: &mut [Circulation]) {
    records.sort_by(|a, b| (b.date, b.id).cmp(&(a.date, a.id)));
}

// ---------------------------------------------------------------------------
// Books
// ---------------------------------------------------------------------------

#[async_trait]
impl BookStore for MemStorage {
    async fn list_books(&self) -> AppResult<Vec<Book>> {
        Ok(self.state.read().await.books.all())
    }

    async fn get_book(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.state.read().await.books.get(id))
    }

    async fn create_book(&self, data: &CreateBook) -> AppResult<Book> {
        let mut state = self.state.write().await;
        Ok(state.books.insert_with(|id| Book {
            id,
            title: data.title.clone(),
            author: data.author.clone(),
            category: data.category.clone(),
            language: data.language.clone(),
            price: data.price,
            publisher: data.publisher.clone(),
            ddc: data.ddc.clone(),
            cover_image: data.cover_image.clone(),
            status: BookStatus::Available,
            created_at: Utc::now(),
        }))
    }

    async fn update_book(&self, id: i32, data: &UpdateBook) -> AppResult<Option<Book>> {
        let mut state = self.state.write().await;
        Ok(state.books.rows.get_mut(&id).map(|book| {
            book.apply(data);
            book.clone()
        }))
    }

    async fn delete_book(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.books.contains(id) {
            return Ok(false);
        }
        if state.open_loan(id).is_some() {
            return Err(AppError::Conflict(format!("Book {} is currently issued", id)));
        }
        state.books.rows.remove(&id);
        state.reviews.rows.retain(|_, r| r.book_id != id);
        state.circulation.rows.retain(|_, c| c.book_id != id);
        Ok(true)
    }

    async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        let needle = term.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .books
            .rows
            .values()
            .filter(|b| b.matches(&needle))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

fn duplicate_registration(state: &MemState, registration_no: &str, exclude: Option<i32>) -> bool {
    state
        .members
        .rows
        .values()
        .any(|m| m.registration_no == registration_no && Some(m.id) != exclude)
}

#[async_trait]
impl MemberStore for MemStorage {
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        Ok(self.state.read().await.members.all())
    }

    async fn get_member(&self, id: i32) -> AppResult<Option<Member>> {
        Ok(self.state.read().await.members.get(id))
    }

    async fn create_member(&self, data: &CreateMember) -> AppResult<Member> {
        let mut state = self.state.write().await;
        if duplicate_registration(&state, &data.registration_no, None) {
            return Err(AppError::Conflict(format!(
                "Registration number {} already exists",
                data.registration_no
            )));
        }
        Ok(state.members.insert_with(|id| Member {
            id,
            full_name: data.full_name.clone(),
            class: data.class.clone(),
            registration_no: data.registration_no.clone(),
            created_at: Utc::now(),
        }))
    }

    async fn update_member(&self, id: i32, data: &UpdateMember) -> AppResult<Option<Member>> {
        let mut state = self.state.write().await;
        if let Some(ref registration_no) = data.registration_no {
            if state.members.contains(id) && duplicate_registration(&state, registration_no, Some(id)) {
                return Err(AppError::Conflict(format!(
                    "Registration number {} already exists",
                    registration_no
                )));
            }
        }
        Ok(state.members.rows.get_mut(&id).map(|member| {
            member.apply(data);
            member.clone()
        }))
    }

    async fn delete_member(&self, id: i32) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if !state.members.contains(id) {
            return Ok(false);
        }
        if state.active().any(|c| c.member_id == id) {
            return Err(AppError::Conflict(format!("Member {} has books on loan", id)));
        }
        state.members.rows.remove(&id);
        state.suggestions.rows.retain(|_, s| s.member_id != id);
        state.reviews.rows.retain(|_, r| r.member_id != id);
        state.circulation.rows.retain(|_, c| c.member_id != id);
        Ok(true)
    }

    async fn search_members(&self, term: &str) -> AppResult<Vec<Member>> {
        let needle = term.to_lowercase();
        let state = self.state.read().await;
        Ok(state
            .members
            .rows
            .values()
            .filter(|m| m.matches(&needle))
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[async_trait]
impl CategoryStore for MemStorage {
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        Ok(self.state.read().await.categories.all())
    }

    async fn get_category(&self, id: i32) -> AppResult<Option<Category>> {
        Ok(self.state.read().await.categories.get(id))
    }

    async fn create_category(&self, name: &str) -> AppResult<Category> {
        let mut state = self.state.write().await;
        if state.categories.rows.values().any(|c| c.name == name) {
            return Err(AppError::Conflict(format!("Category {} already exists", name)));
        }
        Ok(state.categories.insert_with(|id| Category {
            id,
            name: name.to_string(),
            created_at: Utc::now(),
        }))
    }

    async fn rename_category(&self, id: i32, name: &str) -> AppResult<Option<Category>> {
        let mut state = self.state.write().await;
        if state.categories.rows.values().any(|c| c.name == name && c.id != id) {
            return Err(AppError::Conflict(format!("Category {} already exists", name)));
        }
        Ok(state.categories.rows.get_mut(&id).map(|category| {
            category.name = name.to_string();
            category.clone()
        }))
    }

    async fn delete_category(&self, id: i32) -> AppResult<bool> {
        Ok(self.state.write().await.categories.rows.remove(&id).is_some())
    }
}

// ---------------------------------------------------------------------------
// Suggestions & reviews
// ---------------------------------------------------------------------------

#[async_trait]
impl SuggestionStore for MemStorage {
    async fn list_suggestions(&self) -> AppResult<Vec<BookSuggestion>> {
        Ok(self.state.read().await.suggestions.all())
    }

    async fn get_suggestion(&self, id: i32) -> AppResult<Option<BookSuggestion>> {
        Ok(self.state.read().await.suggestions.get(id))
    }

    async fn create_suggestion(&self, data: &CreateSuggestion) -> AppResult<BookSuggestion> {
        let mut state = self.state.write().await;
        if !state.members.contains(data.member_id) {
            return Err(AppError::NotFound(format!("Member {} not found", data.member_id)));
        }
        Ok(state.suggestions.insert_with(|id| BookSuggestion {
            id,
            member_id: data.member_id,
            book_title: data.book_title.clone(),
            author: data.author.clone(),
            reason: data.reason.clone(),
            status: SuggestionStatus::Pending,
            created_at: Utc::now(),
        }))
    }

    async fn set_suggestion_status(
        &self,
        id: i32,
        status: SuggestionStatus,
    ) -> AppResult<Option<BookSuggestion>> {
        let mut state = self.state.write().await;
        let Some(suggestion) = state.suggestions.rows.get_mut(&id) else {
            return Ok(None);
        };
        if suggestion.status != SuggestionStatus::Pending {
            return Err(already_decided(id, suggestion.status));
        }
        suggestion.status = status;
        Ok(Some(suggestion.clone()))
    }
}

#[async_trait]
impl ReviewStore for MemStorage {
    async fn list_reviews(&self) -> AppResult<Vec<BookReview>> {
        Ok(self.state.read().await.reviews.all())
    }

    async fn get_review(&self, id: i32) -> AppResult<Option<BookReview>> {
        Ok(self.state.read().await.reviews.get(id))
    }

    async fn reviews_for_book(&self, book_id: i32) -> AppResult<Vec<BookReview>> {
        let state = self.state.read().await;
        Ok(state
            .reviews
            .rows
            .values()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect())
    }

    async fn create_review(&self, data: &CreateReview) -> AppResult<BookReview> {
        let mut state = self.state.write().await;
        if !state.books.contains(data.book_id) {
            return Err(AppError::NotFound(format!("Book {} not found", data.book_id)));
        }
        if !state.members.contains(data.member_id) {
            return Err(AppError::NotFound(format!("Member {} not found", data.member_id)));
        }
        Ok(state.reviews.insert_with(|id| BookReview {
            id,
            book_id: data.book_id,
            member_id: data.member_id,
            rating: data.rating,
            review: data.review.clone(),
            created_at: Utc::now(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Circulation
// ---------------------------------------------------------------------------

#[async_trait]
impl CirculationStore for MemStorage {
    async fn list_circulation(&self) -> AppResult<Vec<Circulation>> {
        let mut records = self.state.read().await.circulation.all();
        by_date_desc(&mut records);
        Ok(records)
    }

    async fn active_loans(&self) -> AppResult<Vec<Circulation>> {
        let mut records: Vec<Circulation> = self.state.read().await.active().cloned().collect();
        by_due_date(&mut records);
        Ok(records)
    }

    async fn overdue_loans(&self, now: DateTime<Utc>) -> AppResult<Vec<Circulation>> {
        let mut records: Vec<Circulation> = self
            .state
            .read()
            .await
            .active()
            .filter(|c| c.is_overdue(now))
            .cloned()
            .collect();
        by_due_date(&mut records);
        Ok(records)
    }

    async fn member_history(&self, member_id: i32) -> AppResult<Vec<Circulation>> {
        let mut records: Vec<Circulation> = self
            .state
            .read()
            .await
            .circulation
            .rows
            .values()
            .filter(|c| c.member_id == member_id)
            .cloned()
            .collect();
        by_date_desc(&mut records);
        Ok(records)
    }

    async fn issue_book(&self, loan: &NewLoan) -> AppResult<Circulation> {
        let mut state = self.state.write().await;

        let status = state
            .books
            .rows
            .get(&loan.book_id)
            .map(|b| b.status)
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", loan.book_id)))?;
        if !state.members.contains(loan.member_id) {
            return Err(AppError::NotFound(format!("Member {} not found", loan.member_id)));
        }
        if status != BookStatus::Available {
            return Err(AppError::Conflict(format!(
                "Book {} is not available ({})",
                loan.book_id, status
            )));
        }

        let record = state.circulation.insert_with(|id| Circulation {
            id,
            book_id: loan.book_id,
            member_id: loan.member_id,
            action: CirculationAction::Borrow,
            date: loan.date,
            due_date: Some(loan.due_date),
            return_date: None,
            status: CirculationStatus::Active,
        });
        if let Some(book) = state.books.rows.get_mut(&loan.book_id) {
            book.status = BookStatus::Issued;
        }
        Ok(record)
    }

    async fn return_book(
        &self,
        book_id: i32,
        borrower: Option<i32>,
        returned_at: DateTime<Utc>,
    ) -> AppResult<ReturnedLoan> {
        let mut state = self.state.write().await;

        if !state.books.contains(book_id) {
            return Err(AppError::NotFound(format!("Book {} not found", book_id)));
        }
        let (loan_id, holder) = state
            .open_loan(book_id)
            .map(|c| (c.id, c.member_id))
            .ok_or_else(|| AppError::NotFound(format!("Book {} has no active loan", book_id)))?;
        if let Some(member_id) = borrower.filter(|m| *m != holder) {
            return Err(AppError::Conflict(format!(
                "Book {} is on loan to member {}, not {}",
                book_id, holder, member_id
            )));
        }

        let loan = match state.circulation.rows.get_mut(&loan_id) {
            Some(loan) => {
                loan.status = CirculationStatus::Returned;
                loan.return_date = Some(returned_at);
                loan.clone()
            }
            None => return Err(AppError::Internal(format!("Loan {} vanished", loan_id))),
        };
        let record = state.circulation.insert_with(|id| Circulation {
            id,
            book_id,
            member_id: loan.member_id,
            action: CirculationAction::Return,
            date: returned_at,
            due_date: None,
            return_date: Some(returned_at),
            status: CirculationStatus::Returned,
        });
        if let Some(book) = state.books.rows.get_mut(&book_id) {
            book.status = BookStatus::Available;
        }
        Ok(ReturnedLoan { loan, record })
    }
}

// ---------------------------------------------------------------------------
// Analytics
// ---------------------------------------------------------------------------

#[async_trait]
impl AnalyticsStore for MemStorage {
    async fn most_read_books(&self) -> AppResult<Vec<BookReadCount>> {
        let state = self.state.read().await;
        let mut result: Vec<BookReadCount> = state
            .borrow_counts(|c| c.book_id)
            .into_iter()
            .filter_map(|(book_id, borrow_count)| {
                state.books.get(book_id).map(|book| BookReadCount { book, borrow_count })
            })
            .collect();
        result.sort_by(|a, b| b.borrow_count.cmp(&a.borrow_count).then(a.book.id.cmp(&b.book.id)));
        Ok(result)
    }

    async fn most_active_readers(&self) -> AppResult<Vec<ReaderActivity>> {
        let state = self.state.read().await;
        let mut result: Vec<ReaderActivity> = state
            .borrow_counts(|c| c.member_id)
            .into_iter()
            .filter_map(|(member_id, borrow_count)| {
                state
                    .members
                    .get(member_id)
                    .map(|member| ReaderActivity { member, borrow_count })
            })
            .collect();
        result.sort_by(|a, b| {
            b.borrow_count
                .cmp(&a.borrow_count)
                .then(a.member.id.cmp(&b.member.id))
        });
        Ok(result)
    }

    async fn issued_books(&self, now: DateTime<Utc>) -> AppResult<Vec<IssuedBook>> {
        let state = self.state.read().await;
        let mut loans: Vec<Circulation> = state.active().cloned().collect();
        by_due_date(&mut loans);
        Ok(loans
            .into_iter()
            .filter_map(|loan| {
                let book = state.books.get(loan.book_id)?;
                let member = state.members.get(loan.member_id)?;
                Some(IssuedBook {
                    circulation_id: loan.id,
                    is_overdue: loan.is_overdue(now),
                    borrowed_at: loan.date,
                    due_date: loan.due_date,
                    book,
                    member,
                })
            })
            .collect())
    }

    async fn summary(&self, now: DateTime<Utc>) -> AppResult<LibrarySummary> {
        let state = self.state.read().await;
        let count_books = |status: BookStatus| {
            state.books.rows.values().filter(|b| b.status == status).count() as i64
        };
        Ok(LibrarySummary {
            total_books: state.books.rows.len() as i64,
            available_books: count_books(BookStatus::Available),
            issued_books: count_books(BookStatus::Issued),
            total_members: state.members.rows.len() as i64,
            total_categories: state.categories.rows.len() as i64,
            active_loans: state.active().count() as i64,
            overdue_loans: state.active().filter(|c| c.is_overdue(now)).count() as i64,
            pending_suggestions: state
                .suggestions
                .rows
                .values()
                .filter(|s| s.status == SuggestionStatus::Pending)
                .count() as i64,
        })
    }
}

#[async_trait]
impl Storage for MemStorage {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
