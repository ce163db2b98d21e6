//! Circulation rules: issuing and returning books

use std::sync::Arc;

use chrono::Utc;
use validator::{ValidationError, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{Circulation, CirculationAction, CirculationRequest, NewLoan, ReturnedLoan},
    repository::CirculationStore,
};

#[derive(Clone)]
pub struct CirculationService {
    store: Arc<dyn CirculationStore>,
    loan_period_days: i64,
}

impl CirculationService {
    pub fn new(store: Arc<dyn CirculationStore>, loan_period_days: i64) -> Self {
        Self {
            store,
            loan_period_days,
        }
    }

    /// Every record, newest first, with overdue loans flagged
    pub async fn list(&self) -> AppResult<Vec<Circulation>> {
        let now = Utc::now();
        Ok(self
            .store
            .list_circulation()
            .await?
            .into_iter()
            .map(|c| c.with_effective_status(now))
            .collect())
    }

    /// Open loans, overdue ones included
    pub async fn active(&self) -> AppResult<Vec<Circulation>> {
        let now = Utc::now();
        Ok(self
            .store
            .active_loans()
            .await?
            .into_iter()
            .map(|c| c.with_effective_status(now))
            .collect())
    }

    /// Open loans whose due date has passed
    pub async fn overdue(&self) -> AppResult<Vec<Circulation>> {
        let now = Utc::now();
        Ok(self
            .store
            .overdue_loans(now)
            .await?
            .into_iter()
            .map(|c| c.with_effective_status(now))
            .collect())
    }

    /// Lend a book to a member for the configured loan period
    pub async fn issue(&self, book_id: i32, member_id: i32) -> AppResult<Circulation> {
        let loan = NewLoan::starting_at(book_id, member_id, Utc::now(), self.loan_period_days);
        let record = self.store.issue_book(&loan).await?;
        tracing::info!(
            book_id,
            member_id,
            loan_id = record.id,
            due_date = %loan.due_date,
            "Book issued"
        );
        Ok(record)
    }

    /// Take a book back. When `member_id` is given it must match the borrower.
    pub async fn return_book(&self, book_id: i32, member_id: Option<i32>) -> AppResult<ReturnedLoan> {
        let returned = self.store.return_book(book_id, member_id, Utc::now()).await?;
        tracing::info!(
            book_id,
            member_id = returned.loan.member_id,
            loan_id = returned.loan.id,
            "Book returned"
        );
        Ok(returned)
    }

    /// Dispatch a POST /circulation request; returns the record it created
    pub async fn record(&self, request: &CirculationRequest) -> AppResult<Circulation> {
        match request.action {
            CirculationAction::Borrow => {
                let member_id = request.member_id.ok_or_else(member_required)?;
                self.issue(request.book_id, member_id).await
            }
            CirculationAction::Return => Ok(self
                .return_book(request.book_id, request.member_id)
                .await?
                .record),
        }
    }
}

fn member_required() -> AppError {
    let mut errors = ValidationErrors::new();
    let mut error = ValidationError::new("required");
    error.message = Some("A member is required to borrow a book".into());
    errors.add("memberId", error);
    AppError::InvalidInput(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CirculationStatus;
    use crate::repository::MockCirculationStore;
    use chrono::{DateTime, Duration};

    fn record(id: i32, action: CirculationAction, due: Option<DateTime<Utc>>, status: CirculationStatus) -> Circulation {
        Circulation {
            id,
            book_id: 7,
            member_id: 3,
            action,
            date: Utc::now(),
            due_date: due,
            return_date: None,
            status,
        }
    }

    #[tokio::test]
    async fn test_issue_sets_due_date_from_loan_period() {
        let mut store = MockCirculationStore::new();
        store
            .expect_issue_book()
            .withf(|loan| loan.book_id == 7 && loan.member_id == 3 && loan.due_date - loan.date == Duration::days(14))
            .times(1)
            .returning(|loan| {
                Ok(Circulation {
                    id: 1,
                    book_id: loan.book_id,
                    member_id: loan.member_id,
                    action: CirculationAction::Borrow,
                    date: loan.date,
                    due_date: Some(loan.due_date),
                    return_date: None,
                    status: CirculationStatus::Active,
                })
            });

        let service = CirculationService::new(Arc::new(store), 14);
        let loan = service.issue(7, 3).await.unwrap();
        assert_eq!(loan.due_date, Some(loan.date + Duration::days(14)));
    }

    #[tokio::test]
    async fn test_borrow_request_requires_member() {
        let store = MockCirculationStore::new();
        let service = CirculationService::new(Arc::new(store), 14);
        let request = CirculationRequest {
            book_id: 7,
            member_id: None,
            action: CirculationAction::Borrow,
        };
        assert!(matches!(service.record(&request).await, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_return_passes_borrower_to_store() {
        let mut store = MockCirculationStore::new();
        store
            .expect_return_book()
            .withf(|book_id, borrower, _| *book_id == 7 && *borrower == Some(99))
            .times(1)
            .returning(|_, _, _| Err(AppError::Conflict("on loan to member 3".to_string())));

        let service = CirculationService::new(Arc::new(store), 14);
        let result = service.return_book(7, Some(99)).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_return_request_yields_return_record() {
        let mut store = MockCirculationStore::new();
        store.expect_return_book().times(1).returning(|_, _, at| {
            let mut loan = record(1, CirculationAction::Borrow, None, CirculationStatus::Returned);
            loan.return_date = Some(at);
            let mut entry = record(2, CirculationAction::Return, None, CirculationStatus::Returned);
            entry.return_date = Some(at);
            Ok(ReturnedLoan { loan, record: entry })
        });

        let service = CirculationService::new(Arc::new(store), 14);
        let request = CirculationRequest {
            book_id: 7,
            member_id: None,
            action: CirculationAction::Return,
        };
        let created = service.record(&request).await.unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(created.action, CirculationAction::Return);
    }

    #[tokio::test]
    async fn test_active_flags_overdue_loans() {
        let mut store = MockCirculationStore::new();
        store.expect_active_loans().returning(|| {
            let now = Utc::now();
            Ok(vec![
                record(1, CirculationAction::Borrow, Some(now - Duration::days(1)), CirculationStatus::Active),
                record(2, CirculationAction::Borrow, Some(now + Duration::days(1)), CirculationStatus::Active),
            ])
        });

        let service = CirculationService::new(Arc::new(store), 14);
        let statuses: Vec<CirculationStatus> = service.active().await.unwrap().into_iter().map(|c| c.status).collect();
        assert_eq!(statuses, vec![CirculationStatus::Overdue, CirculationStatus::Active]);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockCirculationStore::new();
        store
            .expect_overdue_loans()
            .returning(|_| Err(AppError::Database(sqlx::Error::PoolTimedOut)));

        let service = CirculationService::new(Arc::new(store), 14);
        assert!(matches!(service.overdue().await, Err(AppError::Database(_))));
    }
}
