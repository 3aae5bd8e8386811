//! Group CRUD scoped to the calling owner.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use expensehub_core::error::AppError;
use expensehub_core::result::AppResult;
use expensehub_database::store::GroupStore;
use expensehub_entity::group::{CreateGroup, Group};

use crate::context::RequestContext;

/// Longest accepted group name, in characters.
pub const MAX_GROUP_NAME_CHARS: usize = 255;

const GROUP_NOT_FOUND: &str = "Group not found or access denied";

/// Manages the caller's groups.
#[derive(Debug, Clone)]
pub struct GroupService {
    groups: Arc<dyn GroupStore>,
}

impl GroupService {
    /// Creates a new group service.
    pub fn new(groups: Arc<dyn GroupStore>) -> Self {
        Self { groups }
    }

    /// All of the caller's groups, newest first.
    pub async fn list(&self, ctx: &RequestContext) -> AppResult<Vec<Group>> {
        self.groups
            .list_by_owner(ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to fetch groups"))
    }

    /// One of the caller's groups.
    pub async fn get(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<Group> {
        self.groups
            .find_owned(group_id, ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to fetch group"))?
            .ok_or_else(|| AppError::not_found(GROUP_NOT_FOUND))
    }

    /// Create a group owned by the caller.
    pub async fn create(&self, ctx: &RequestContext, name: Option<&str>) -> AppResult<Group> {
        let name = validate_name(name)?;

        let group = self
            .groups
            .create(&CreateGroup {
                name,
                created_by: ctx.user_id,
            })
            .await
            .map_err(|e| e.or_internal("Failed to create group"))?;

        info!(user_id = %ctx.user_id, group_id = %group.id, "Group created");
        Ok(group)
    }

    /// Rename one of the caller's groups.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        name: Option<&str>,
    ) -> AppResult<Group> {
        let name = validate_name(name)?;

        let group = self
            .groups
            .rename(group_id, ctx.user_id, &name)
            .await
            .map_err(|e| e.or_internal("Failed to update group"))?
            .ok_or_else(|| AppError::not_found(GROUP_NOT_FOUND))?;

        info!(user_id = %ctx.user_id, group_id = %group.id, "Group renamed");
        Ok(group)
    }

    /// Delete one of the caller's groups together with its expenses.
    pub async fn delete(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<()> {
        let deleted = self
            .groups
            .delete(group_id, ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to delete group"))?;

        if !deleted {
            return Err(AppError::not_found(GROUP_NOT_FOUND));
        }

        info!(user_id = %ctx.user_id, group_id = %group_id, "Group deleted");
        Ok(())
    }
}

/// Trimmed, non-empty, bounded group name.
fn validate_name(name: Option<&str>) -> AppResult<String> {
    let name = name.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::validation("Group name is required"));
    }
    if name.chars().count() > MAX_GROUP_NAME_CHARS {
        return Err(AppError::validation(format!(
            "Group name must be at most {MAX_GROUP_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensehub_core::error::ErrorKind;
    use expensehub_database::MemoryDatabase;

    fn service() -> GroupService {
        GroupService::new(Arc::new(MemoryDatabase::new()))
    }

    #[tokio::test]
    async fn test_create_trims_name() {
        let svc = service();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let group = svc.create(&ctx, Some("  Trip  ")).await.unwrap();
        assert_eq!(group.name, "Trip");
        assert_eq!(group.created_by, ctx.user_id);
    }

    #[tokio::test]
    async fn test_name_validation() {
        let svc = service();
        let ctx = RequestContext::for_user(Uuid::new_v4());

        for name in [None, Some(""), Some("   ")] {
            let err = svc.create(&ctx, name).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
            assert_eq!(err.message, "Group name is required");
        }

        let long = "x".repeat(MAX_GROUP_NAME_CHARS + 1);
        let err = svc.create(&ctx, Some(&long)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(svc.list(&ctx).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_tenant_isolation() {
        let svc = service();
        let alice = RequestContext::for_user(Uuid::new_v4());
        let bob = RequestContext::for_user(Uuid::new_v4());

        let trip = svc.create(&alice, Some("Trip")).await.unwrap();

        assert_eq!(svc.list(&alice).await.unwrap(), vec![trip.clone()]);
        assert!(svc.list(&bob).await.unwrap().is_empty());

        let err = svc.update(&bob, trip.id, Some("Stolen")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = svc.delete(&bob, trip.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = svc.get(&bob, trip.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        assert_eq!(svc.get(&alice, trip.id).await.unwrap().name, "Trip");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let svc = service();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let trip = svc.create(&ctx, Some("Trip")).await.unwrap();

        let renamed = svc.update(&ctx, trip.id, Some("Road trip")).await.unwrap();
        assert_eq!(renamed.id, trip.id);
        assert_eq!(renamed.name, "Road trip");

        // validation wins over the missing group
        let err = svc.update(&ctx, Uuid::new_v4(), Some(" ")).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        svc.delete(&ctx, trip.id).await.unwrap();
        let err = svc.delete(&ctx, trip.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
