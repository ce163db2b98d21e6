//! Members table

use async_trait::async_trait;

use super::{constraint_error, like_pattern, PgStorage};
use crate::{
    error::{AppError, AppResult},
    models::{CreateMember, Member, UpdateMember},
    repository::MemberStore,
};

#[async_trait]
impl MemberStore for PgStorage {
    async fn list_members(&self) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>("SELECT * FROM members ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(members)
    }

    async fn get_member(&self, id: i32) -> AppResult<Option<Member>> {
        let member = sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(member)
    }

    async fn create_member(&self, data: &CreateMember) -> AppResult<Member> {
        sqlx::query_as::<_, Member>(
            r#"
            INSERT INTO members (full_name, class_name, registration_no)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.full_name)
        .bind(&data.class)
        .bind(&data.registration_no)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            constraint_error(
                e,
                || format!("Registration number {} already exists", data.registration_no),
                String::new,
            )
        })
    }

    async fn update_member(&self, id: i32, data: &UpdateMember) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            r#"
            UPDATE members SET
                full_name = COALESCE($2, full_name),
                class_name = COALESCE($3, class_name),
                registration_no = COALESCE($4, registration_no)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&data.full_name)
        .bind(&data.class)
        .bind(&data.registration_no)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            constraint_error(
                e,
                || {
                    format!(
                        "Registration number {} already exists",
                        data.registration_no.as_deref().unwrap_or_default()
                    )
                },
                String::new,
            )
        })
    }

    async fn delete_member(&self, id: i32) -> AppResult<bool> {
        let mut tx = self.pool.begin().await?;

        let found: Option<i32> = sqlx::query_scalar("SELECT id FROM members WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if found.is_none() {
            return Ok(false);
        }

        let has_loans: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM circulation WHERE member_id = $1 AND status = 'active')",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        if has_loans {
            return Err(AppError::Conflict(format!("Member {} has books on loan", id)));
        }

        sqlx::query("DELETE FROM members WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(true)
    }

    async fn search_members(&self, term: &str) -> AppResult<Vec<Member>> {
        let members = sqlx::query_as::<_, Member>(
            r#"
            SELECT * FROM members
            WHERE full_name ILIKE $1 OR class_name ILIKE $1 OR registration_no ILIKE $1
            ORDER BY id
            "#,
        )
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await?;
        Ok(members)
    }
}
