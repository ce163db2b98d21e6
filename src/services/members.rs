//! Member management service

use std::sync::Arc;

use chrono::Utc;

use crate::{
    error::{AppError, AppResult},
    models::{Circulation, CreateMember, Member, UpdateMember},
    repository::{CirculationStore, MemberStore},
};

#[derive(Clone)]
pub struct MembersService {
    members: Arc<dyn MemberStore>,
    circulation: Arc<dyn CirculationStore>,
}

fn member_not_found(id: i32) -> AppError {
    AppError::NotFound(format!("Member with id {} not found", id))
}

impl MembersService {
    pub fn new(members: Arc<dyn MemberStore>, circulation: Arc<dyn CirculationStore>) -> Self {
        Self {
            members,
            circulation,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<Member>> {
        self.members.list_members().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Member> {
        self.members.get_member(id).await?.ok_or_else(|| member_not_found(id))
    }

    pub async fn create(&self, data: &CreateMember) -> AppResult<Member> {
        self.members.create_member(data).await
    }

    pub async fn update(&self, id: i32, data: &UpdateMember) -> AppResult<Member> {
        self.members
            .update_member(id, data)
            .await?
            .ok_or_else(|| member_not_found(id))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        if !self.members.delete_member(id).await? {
            return Err(member_not_found(id));
        }
        tracing::info!(member_id = id, "Member deleted");
        Ok(())
    }

    pub async fn search(&self, term: &str) -> AppResult<Vec<Member>> {
        self.members.search_members(term).await
    }

    /// Borrow/return history of a member, newest first
    pub async fn history(&self, id: i32) -> AppResult<Vec<Circulation>> {
        // Verify member exists
        self.get_by_id(id).await?;
        let now = Utc::now();
        Ok(self
            .circulation
            .member_history(id)
            .await?
            .into_iter()
            .map(|c| c.with_effective_status(now))
            .collect())
    }
}
