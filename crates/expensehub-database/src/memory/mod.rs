//! Process-local backend using `dashmap` tables.
//!
//! Mirrors the PostgreSQL schema closely enough for development and tests:
//! e-mail uniqueness, owner-scoped queries, newest-first ordering and the
//! group → expense cascade.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

use expensehub_core::error::AppError;
use expensehub_core::result::AppResult;
use expensehub_entity::{
    CreateExpense, CreateGroup, CreateUser, Expense, ExpenseChanges, Group, Session, User,
};

use crate::store::{ExpenseStore, GroupStore, SessionStore, UserStore};

/// A stored row plus its insertion sequence, used to break `created_at` ties.
#[derive(Debug, Clone)]
struct Row<T> {
    seq: u64,
    item: T,
}

#[derive(Debug, Default)]
struct Tables {
    users: DashMap<Uuid, User>,
    /// Unique index on `users.email`.
    emails: DashMap<String, Uuid>,
    groups: DashMap<Uuid, Row<Group>>,
    expenses: DashMap<Uuid, Row<Expense>>,
    sessions: DashMap<Uuid, Session>,
    seq: AtomicU64,
}

impl Tables {
    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::Relaxed)
    }
}

/// In-memory implementation of every store trait.
///
/// Cloning is cheap; clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<Tables>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Sort newest first, later insertions winning ties.
fn newest_first<T>(mut rows: Vec<Row<T>>, created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    rows.sort_by(|a, b| {
        created_at(&b.item)
            .cmp(&created_at(&a.item))
            .then(b.seq.cmp(&a.seq))
    });
    rows.into_iter().map(|row| row.item).collect()
}

#[async_trait]
impl GroupStore for MemoryDatabase {
    async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Group>> {
        let rows = self
            .tables
            .groups
            .iter()
            .filter(|row| row.item.is_owned_by(owner_id))
            .map(|row| row.value().clone())
            .collect();
        Ok(newest_first(rows, |g: &Group| g.created_at))
    }

    async fn find_owned(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Group>> {
        Ok(self
            .tables
            .groups
            .get(&id)
            .filter(|row| row.item.is_owned_by(owner_id))
            .map(|row| row.item.clone()))
    }

    async fn create(&self, data: &CreateGroup) -> AppResult<Group> {
        let group = Group {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            created_by: data.created_by,
            created_at: Utc::now(),
        };
        let row = Row {
            seq: self.tables.next_seq(),
            item: group.clone(),
        };
        self.tables.groups.insert(group.id, row);
        Ok(group)
    }

    async fn rename(&self, id: Uuid, owner_id: Uuid, name: &str) -> AppResult<Option<Group>> {
        let Some(mut row) = self.tables.groups.get_mut(&id) else {
            return Ok(None);
        };
        if !row.item.is_owned_by(owner_id) {
            return Ok(None);
        }
        row.item.name = name.to_string();
        Ok(Some(row.item.clone()))
    }

    async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let removed = self
            .tables
            .groups
            .remove_if(&id, |_, row| row.item.is_owned_by(owner_id))
            .is_some();
        if removed {
            let mut cascaded = 0usize;
            self.tables.expenses.retain(|_, row| {
                let keep = row.item.group_id != id;
                if !keep {
                    cascaded += 1;
                }
                keep
            });
            debug!(group_id = %id, cascaded, "Deleted group and its expenses");
        }
        Ok(removed)
    }
}

#[async_trait]
impl ExpenseStore for MemoryDatabase {
    async fn list_by_group(&self, group_id: Uuid, owner_id: Uuid) -> AppResult<Vec<Expense>> {
        if self.find_owned(group_id, owner_id).await?.is_none() {
            return Ok(Vec::new());
        }
        let rows = self
            .tables
            .expenses
            .iter()
            .filter(|row| row.item.group_id == group_id)
            .map(|row| row.value().clone())
            .collect();
        Ok(newest_first(rows, |e: &Expense| e.created_at))
    }

    async fn create(&self, data: &CreateExpense) -> AppResult<Option<Expense>> {
        // Holding the group entry blocks a concurrent delete until the
        // expense is visible to its cascade.
        let Some(group) = self.tables.groups.get(&data.group_id) else {
            return Ok(None);
        };
        if !group.item.is_owned_by(data.created_by) {
            return Ok(None);
        }

        let expense = Expense {
            id: Uuid::new_v4(),
            description: data.description.clone(),
            amount: data.amount,
            group_id: data.group_id,
            created_by: data.created_by,
            created_at: Utc::now(),
        };
        let row = Row {
            seq: self.tables.next_seq(),
            item: expense.clone(),
        };
        self.tables.expenses.insert(expense.id, row);
        drop(group);
        Ok(Some(expense))
    }

    async fn update(
        &self,
        id: Uuid,
        created_by: Uuid,
        changes: &ExpenseChanges,
    ) -> AppResult<Option<Expense>> {
        let Some(mut row) = self.tables.expenses.get_mut(&id) else {
            return Ok(None);
        };
        if row.item.created_by != created_by {
            return Ok(None);
        }
        row.item.description = changes.description.clone();
        row.item.amount = changes.amount;
        Ok(Some(row.item.clone()))
    }

    async fn delete(&self, id: Uuid, created_by: Uuid) -> AppResult<bool> {
        Ok(self
            .tables
            .expenses
            .remove_if(&id, |_, row| row.item.created_by == created_by)
            .is_some())
    }
}

#[async_trait]
impl UserStore for MemoryDatabase {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.tables.users.get(&id).map(|u| u.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.tables.emails.get(email).map(|r| *r.value()) else {
            return Ok(None);
        };
        UserStore::find_by_id(self, id).await
    }

    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        match self.tables.emails.entry(data.email.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict("User already registered")),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let user = User {
                    id: Uuid::new_v4(),
                    email: data.email.clone(),
                    username: data.username.clone(),
                    password_hash: data.password_hash.clone(),
                    email_confirmed_at: data.confirmation_token.is_none().then_some(now),
                    confirmation_token: data.confirmation_token.clone(),
                    created_at: now,
                };
                self.tables.users.insert(user.id, user.clone());
                slot.insert(user.id);
                Ok(user)
            }
        }
    }

    async fn confirm_by_token(&self, token: &str) -> AppResult<Option<User>> {
        let id = self
            .tables
            .users
            .iter()
            .find(|u| u.confirmation_token.as_deref() == Some(token))
            .map(|u| *u.key());
        let Some(id) = id else {
            return Ok(None);
        };
        let Some(mut user) = self.tables.users.get_mut(&id) else {
            return Ok(None);
        };
        // Lost a race with another confirmation of the same token.
        if user.confirmation_token.as_deref() != Some(token) {
            return Ok(None);
        }
        user.email_confirmed_at = Some(Utc::now());
        user.confirmation_token = None;
        Ok(Some(user.clone()))
    }

    async fn confirm_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let Some(id) = self.tables.emails.get(email).map(|r| *r.value()) else {
            return Ok(None);
        };
        let Some(mut user) = self.tables.users.get_mut(&id) else {
            return Ok(None);
        };
        user.email_confirmed_at.get_or_insert_with(Utc::now);
        user.confirmation_token = None;
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl SessionStore for MemoryDatabase {
    async fn create(&self, session: &Session) -> AppResult<()> {
        self.tables.sessions.insert(session.id, session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Session>> {
        Ok(self.tables.sessions.get(&id).map(|s| s.value().clone()))
    }

    async fn terminate(&self, id: Uuid, at: DateTime<Utc>) -> AppResult<bool> {
        let Some(mut session) = self.tables.sessions.get_mut(&id) else {
            return Ok(false);
        };
        if session.terminated_at.is_some() {
            return Ok(false);
        }
        session.terminated_at = Some(at);
        Ok(true)
    }

    async fn delete_inactive(&self, now: DateTime<Utc>) -> AppResult<u64> {
        let mut removed = 0u64;
        self.tables.sessions.retain(|_, session| {
            let keep = session.is_active_at(now);
            if !keep {
                removed += 1;
            }
            keep
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use expensehub_core::error::ErrorKind;

    fn new_group(owner: Uuid, name: &str) -> CreateGroup {
        CreateGroup {
            name: name.to_string(),
            created_by: owner,
        }
    }

    fn new_expense(group_id: Uuid, owner: Uuid, amount: f64) -> CreateExpense {
        CreateExpense {
            description: "Dinner".to_string(),
            amount,
            group_id,
            created_by: owner,
        }
    }

    #[tokio::test]
    async fn test_groups_are_scoped_to_owner() {
        let db = MemoryDatabase::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let trip = GroupStore::create(&db, &new_group(alice, "Trip")).await.unwrap();

        assert_eq!(db.list_by_owner(alice).await.unwrap(), vec![trip.clone()]);
        assert!(db.list_by_owner(bob).await.unwrap().is_empty());
        assert!(db.find_owned(trip.id, bob).await.unwrap().is_none());
        assert!(db.rename(trip.id, bob, "Mine").await.unwrap().is_none());
        assert!(!GroupStore::delete(&db, trip.id, bob).await.unwrap());
        assert_eq!(db.find_owned(trip.id, alice).await.unwrap(), Some(trip));
    }

    #[tokio::test]
    async fn test_groups_listed_newest_first() {
        let db = MemoryDatabase::new();
        let owner = Uuid::new_v4();
        let first = GroupStore::create(&db, &new_group(owner, "First")).await.unwrap();
        let second = GroupStore::create(&db, &new_group(owner, "Second")).await.unwrap();

        let ids: Vec<Uuid> = db
            .list_by_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_group_delete_cascades_to_expenses() {
        let db = MemoryDatabase::new();
        let owner = Uuid::new_v4();
        let keep = GroupStore::create(&db, &new_group(owner, "Keep")).await.unwrap();
        let trip = GroupStore::create(&db, &new_group(owner, "Trip")).await.unwrap();

        ExpenseStore::create(&db, &new_expense(trip.id, owner, 10.0)).await.unwrap();
        ExpenseStore::create(&db, &new_expense(trip.id, owner, 20.0)).await.unwrap();
        ExpenseStore::create(&db, &new_expense(keep.id, owner, 5.0)).await.unwrap();

        assert!(GroupStore::delete(&db, trip.id, owner).await.unwrap());
        assert!(db.list_by_group(trip.id, owner).await.unwrap().is_empty());
        assert_eq!(db.tables.expenses.len(), 1);
        assert_eq!(db.list_by_group(keep.id, owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_expense_requires_owned_group() {
        let db = MemoryDatabase::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let trip = GroupStore::create(&db, &new_group(alice, "Trip")).await.unwrap();

        let foreign = ExpenseStore::create(&db, &new_expense(trip.id, bob, 1.0)).await.unwrap();
        assert!(foreign.is_none());
        let missing = ExpenseStore::create(&db, &new_expense(Uuid::new_v4(), alice, 1.0))
            .await
            .unwrap();
        assert!(missing.is_none());
        assert!(db.tables.expenses.is_empty());
    }

    #[tokio::test]
    async fn test_expense_mutations_scoped_to_creator() {
        let db = MemoryDatabase::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let trip = GroupStore::create(&db, &new_group(alice, "Trip")).await.unwrap();
        let dinner = ExpenseStore::create(&db, &new_expense(trip.id, alice, 42.5))
            .await
            .unwrap()
            .unwrap();

        let changes = ExpenseChanges {
            description: "Lunch".to_string(),
            amount: 12.0,
        };
        assert!(db.update(dinner.id, bob, &changes).await.unwrap().is_none());
        assert!(!ExpenseStore::delete(&db, dinner.id, bob).await.unwrap());

        let updated = db.update(dinner.id, alice, &changes).await.unwrap().unwrap();
        assert_eq!(updated.description, "Lunch");
        assert_eq!(updated.amount, 12.0);
        assert_eq!(updated.created_at, dinner.created_at);

        assert!(ExpenseStore::delete(&db, dinner.id, alice).await.unwrap());
        assert!(!ExpenseStore::delete(&db, dinner.id, alice).await.unwrap());
    }

    #[tokio::test]
    async fn test_user_email_is_unique() {
        let db = MemoryDatabase::new();
        let data = CreateUser {
            email: "ana@example.com".to_string(),
            username: Some("ana".to_string()),
            password_hash: "hash".to_string(),
            confirmation_token: Some("tok".to_string()),
        };
        let user = UserStore::create(&db, &data).await.unwrap();
        assert!(!user.is_confirmed());

        let err = UserStore::create(&db, &data).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User already registered");
    }

    #[tokio::test]
    async fn test_confirm_by_token_is_single_use() {
        let db = MemoryDatabase::new();
        let data = CreateUser {
            email: "ana@example.com".to_string(),
            username: None,
            password_hash: "hash".to_string(),
            confirmation_token: Some("tok".to_string()),
        };
        UserStore::create(&db, &data).await.unwrap();

        let confirmed = db.confirm_by_token("tok").await.unwrap().unwrap();
        assert!(confirmed.is_confirmed());
        assert!(confirmed.confirmation_token.is_none());
        assert!(db.confirm_by_token("tok").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_inactive_sessions() {
        let db = MemoryDatabase::new();
        let now = Utc::now();
        let user_id = Uuid::new_v4();
        let session = |expires_at| Session {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at,
            terminated_at: None,
        };
        let active = session(now + Duration::hours(1));
        let expired = session(now - Duration::hours(1));
        let ended = session(now + Duration::hours(1));
        for s in [&active, &expired, &ended] {
            SessionStore::create(&db, s).await.unwrap();
        }
        assert!(db.terminate(ended.id, now).await.unwrap());
        assert!(!db.terminate(ended.id, now).await.unwrap());

        assert_eq!(db.delete_inactive(now).await.unwrap(), 2);
        assert!(SessionStore::find_by_id(&db, active.id).await.unwrap().is_some());
        assert!(SessionStore::find_by_id(&db, expired.id).await.unwrap().is_none());
    }
}
