//! PostgreSQL storage backend

mod analytics;
mod books;
mod categories;
mod circulation;
mod members;
mod reviews;
mod suggestions;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::Storage;
use crate::error::{AppError, AppResult};

/// Storage backend over a Postgres connection pool
#[derive(Clone)]
pub struct PgStorage {
    pool: Pool<Postgres>,
}

impl PgStorage {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Storage for PgStorage {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

/// `%term%` for ILIKE, with the pattern metacharacters of `term` escaped
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

/// Map constraint violations to client errors; anything else stays a database error
fn constraint_error(err: sqlx::Error, duplicate: impl FnOnce() -> String, missing: impl FnOnce() -> String) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(duplicate()),
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => AppError::NotFound(missing()),
        _ => AppError::Database(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("ali"), "%ali%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
        assert_eq!(like_pattern("c:\\x"), "%c:\\\\x%");
    }

    #[test]
    fn test_non_constraint_errors_pass_through() {
        let err = constraint_error(sqlx::Error::RowNotFound, || "dup".into(), || "missing".into());
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
