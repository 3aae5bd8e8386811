//! Store traits, one per table.
//!
//! Every query that touches user-owned rows takes the caller's id and
//! filters on it, so a store never returns or mutates another user's data
//! even if a caller forgets its own ownership check.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use expensehub_core::result::AppResult;
use expensehub_entity::{
    CreateExpense, CreateGroup, CreateUser, Expense, ExpenseChanges, Group, Session, User,
};

/// Persistence for groups.
#[async_trait]
pub trait GroupStore: Send + Sync + std::fmt::Debug + 'static {
    /// All groups owned by `owner_id`, newest first.
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Group>>;

    /// The group `id` if it is owned by `owner_id`.
    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Group>>;

    /// Insert a new group and return the stored row.
    async fn create(&self, data: &CreateGroup) -> AppResult<Group>;

    /// Rename the group `id` if owned by `owner_id`. `None` when nothing matched.
    async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<Option<Group>>;

    /// Delete the group `id` (and all of its expenses) if owned by `owner_id`.
    ///
    /// Returns `true` if a row was deleted.
    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool>;
}

/// Persistence for expenses.
#[async_trait]
pub trait ExpenseStore: Send + Sync + std::fmt::Debug + 'static {
    /// Expenses of `group_id`, newest first, provided `owner_id` owns the group.
    async fn list_by_group(&self, group_id: Uuid, owner_id: Uuid) -> AppResult<Vec<Expense>>;

    /// Insert an expense if `data.created_by` owns `data.group_id`.
    ///
    /// `None` when the group does not exist or belongs to someone else.
    async fn create(&self, data: &CreateExpense) -> AppResult<Option<Expense>>;

    /// Apply `changes` to expense `id` if it was created by `created_by`.
    async fn update(
        &self,
        id: Uuid,
        created_by: Uuid,
        changes: &ExpenseChanges,
    ) -> AppResult<Option<Expense>>;

    /// Delete expense `id` if it was created by `created_by`.
    async fn delete(&self, id: Uuid, created_by: Uuid) -> AppResult<bool>;
}

/// Persistence for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find an account by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Find an account by (lower-cased) e-mail.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Insert a new account. Fails with `Conflict` if the e-mail is taken.
    async fn create(&self, data: &CreateUser) -> AppResult<User>;

    /// Confirm the account holding `token` and clear the token.
    async fn confirm_by_token(&self, token: &str) -> AppResult<Option<User>>;

    /// Confirm the account with `email` regardless of token.
    async fn confirm_by_email(&self, email: &str) -> AppResult<Option<User>>;
}

/// Persistence for sign-in sessions.
#[async_trait]
pub trait SessionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a session row.
    async fn create(&self, session: &Session) -> AppResult<()>;

    /// Find a session by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>>;

    /// Mark a session terminated. Returns `false` if it was unknown or
    /// already terminated.
    async fn terminate(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool>;

    /// Remove every session that is expired or terminated at `now`.
    async fn delete_inactive(&self, now: DateTime<Utc>) -> AppResult<u64>;
}
