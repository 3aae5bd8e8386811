//! Expense CRUD.
//!
//! Listing and creation are scoped to a group the caller owns; updates and
//! deletes are scoped to expenses the caller created.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use expensehub_core::error::AppError;
use expensehub_core::result::AppResult;
use expensehub_database::store::{ExpenseStore, GroupStore};
use expensehub_entity::expense::{CreateExpense, Expense, ExpenseChanges};

use super::amount::parse_amount;
use crate::context::RequestContext;

/// Longest accepted description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

const GROUP_NOT_FOUND: &str = "Group not found or access denied";
const EXPENSE_NOT_FOUND: &str = "Expense not found or access denied";

/// Manages expenses inside the caller's groups.
#[derive(Debug, Clone)]
pub struct ExpenseService {
    groups: Arc<dyn GroupStore>,
    expenses: Arc<dyn ExpenseStore>,
}

impl ExpenseService {
    /// Creates a new expense service.
    pub fn new(groups: Arc<dyn GroupStore>, expenses: Arc<dyn ExpenseStore>) -> Self {
        Self { groups, expenses }
    }

    /// Expenses of one of the caller's groups, newest first.
    pub async fn list(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<Vec<Expense>> {
        self.require_group(ctx, group_id).await?;

        self.expenses
            .list_by_group(group_id, ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to fetch expenses"))
    }

    /// Record an expense in one of the caller's groups.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        group_id: Uuid,
        description: Option<&str>,
        amount: Option<&Value>,
    ) -> AppResult<Expense> {
        let changes = validate(description, amount)?;
        self.require_group(ctx, group_id).await?;

        // The store re-checks ownership, so a group deleted since the lookup
        // above still ends up as not found.
        let expense = self
            .expenses
            .create(&CreateExpense {
                description: changes.description,
                amount: changes.amount,
                group_id,
                created_by: ctx.user_id,
            })
            .await
            .map_err(|e| e.or_internal("Failed to create expense"))?
            .ok_or_else(|| AppError::not_found(GROUP_NOT_FOUND))?;

        info!(
            user_id = %ctx.user_id,
            group_id = %group_id,
            expense_id = %expense.id,
            "Expense created"
        );
        Ok(expense)
    }

    /// Change the description and amount of an expense the caller created.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        expense_id: Uuid,
        description: Option<&str>,
        amount: Option<&Value>,
    ) -> AppResult<Expense> {
        let changes = validate(description, amount)?;

        let expense = self
            .expenses
            .update(expense_id, ctx.user_id, &changes)
            .await
            .map_err(|e| e.or_internal("Failed to update expense"))?
            .ok_or_else(|| AppError::not_found(EXPENSE_NOT_FOUND))?;

        info!(user_id = %ctx.user_id, expense_id = %expense.id, "Expense updated");
        Ok(expense)
    }

    /// Delete an expense the caller created.
    pub async fn delete(&self, ctx: &RequestContext, expense_id: Uuid) -> AppResult<()> {
        let deleted = self
            .expenses
            .delete(expense_id, ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to delete expense"))?;

        if !deleted {
            return Err(AppError::not_found(EXPENSE_NOT_FOUND));
        }

        info!(user_id = %ctx.user_id, expense_id = %expense_id, "Expense deleted");
        Ok(())
    }

    async fn require_group(&self, ctx: &RequestContext, group_id: Uuid) -> AppResult<()> {
        self.groups
            .find_owned(group_id, ctx.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to fetch group"))?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(GROUP_NOT_FOUND))
    }
}

fn validate(description: Option<&str>, amount: Option<&Value>) -> AppResult<ExpenseChanges> {
    let description = description.map(str::trim).unwrap_or_default();
    if description.is_empty() {
        return Err(AppError::validation("Description and amount are required"));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::validation(format!(
            "Description must be at most {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    let amount = parse_amount(amount)?;

    Ok(ExpenseChanges {
        description: description.to_string(),
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensehub_core::error::ErrorKind;
    use expensehub_database::MemoryDatabase;
    use expensehub_entity::group::CreateGroup;
    use serde_json::json;

    struct Fixture {
        db: MemoryDatabase,
        svc: ExpenseService,
    }

    impl Fixture {
        fn new() -> Self {
            let db = MemoryDatabase::new();
            let svc = ExpenseService::new(Arc::new(db.clone()), Arc::new(db.clone()));
            Self { db, svc }
        }

        async fn group(&self, ctx: &RequestContext) -> Uuid {
            GroupStore::create(
                &self.db,
                &CreateGroup {
                    name: "Trip".to_string(),
                    created_by: ctx.user_id,
                },
            )
            .await
            .unwrap()
            .id
        }
    }

    #[tokio::test]
    async fn test_create_and_list() {
        let f = Fixture::new();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let group_id = f.group(&ctx).await;

        let dinner = f
            .svc
            .create(&ctx, group_id, Some("Dinner"), Some(&json!(42.5)))
            .await
            .unwrap();
        assert_eq!(dinner.group_id, group_id);
        assert_eq!(dinner.created_by, ctx.user_id);

        let taxi = f
            .svc
            .create(&ctx, group_id, Some(" Taxi "), Some(&json!("12.30")))
            .await
            .unwrap();
        assert_eq!(taxi.description, "Taxi");
        assert_eq!(taxi.amount, 12.3);

        let listed = f.svc.list(&ctx, group_id).await.unwrap();
        assert_eq!(listed, vec![taxi, dinner]);
    }

    #[tokio::test]
    async fn test_invalid_input_persists_nothing() {
        let f = Fixture::new();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let group_id = f.group(&ctx).await;

        let cases = [
            (Some(""), Some(json!(10))),
            (Some("  "), Some(json!(10))),
            (None, Some(json!(10))),
            (Some("Dinner"), Some(json!(0))),
            (Some("Dinner"), Some(json!(-5))),
            (Some("Dinner"), Some(json!("abc"))),
            (Some("Dinner"), None),
        ];
        for (description, amount) in cases {
            let err = f
                .svc
                .create(&ctx, group_id, description, amount.as_ref())
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Validation);
        }
        assert!(f.svc.list(&ctx, group_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_validation_precedes_ownership() {
        let f = Fixture::new();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let err = f
            .svc
            .create(&ctx, Uuid::new_v4(), Some(""), Some(&json!(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_foreign_group_is_not_found() {
        let f = Fixture::new();
        let alice = RequestContext::for_user(Uuid::new_v4());
        let bob = RequestContext::for_user(Uuid::new_v4());
        let group_id = f.group(&alice).await;

        let err = f.svc.list(&bob, group_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert_eq!(err.message, GROUP_NOT_FOUND);

        let err = f
            .svc
            .create(&bob, group_id, Some("Dinner"), Some(&json!(1)))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_foreign_or_missing_expense_is_not_found() {
        let f = Fixture::new();
        let alice = RequestContext::for_user(Uuid::new_v4());
        let bob = RequestContext::for_user(Uuid::new_v4());
        let group_id = f.group(&alice).await;
        let dinner = f
            .svc
            .create(&alice, group_id, Some("Dinner"), Some(&json!(42.5)))
            .await
            .unwrap();

        for id in [dinner.id, Uuid::new_v4()] {
            let err = f
                .svc
                .update(&bob, id, Some("Mine"), Some(&json!(1)))
                .await
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
            let err = f.svc.delete(&bob, id).await.unwrap_err();
            assert_eq!(err.kind, ErrorKind::NotFound);
        }

        let updated = f
            .svc
            .update(&alice, dinner.id, Some("Lunch"), Some(&json!("20")))
            .await
            .unwrap();
        assert_eq!(updated.amount, 20.0);
        f.svc.delete(&alice, dinner.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_group_delete_cascades() {
        let f = Fixture::new();
        let ctx = RequestContext::for_user(Uuid::new_v4());
        let group_id = f.group(&ctx).await;
        f.svc
            .create(&ctx, group_id, Some("Dinner"), Some(&json!(42.5)))
            .await
            .unwrap();

        assert!(GroupStore::delete(&f.db, group_id, ctx.user_id).await.unwrap());
        let err = f.svc.list(&ctx, group_id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
