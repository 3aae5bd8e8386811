//! # expensehub-entity
//!
//! Domain entity models for ExpenseHub. Every struct in this crate
//! represents a database table row or the data needed to insert one.
//! Row types derive `sqlx::FromRow`.

pub mod expense;
pub mod group;
pub mod session;
pub mod user;

pub use expense::{CreateExpense, Expense, ExpenseChanges};
pub use group::{CreateGroup, Group};
pub use session::Session;
pub use user::{CreateUser, Profile, User};
