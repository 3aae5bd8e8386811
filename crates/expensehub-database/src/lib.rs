//! # expensehub-database
//!
//! Store traits for every ExpenseHub table, their PostgreSQL repository
//! implementations, and a process-local memory backend with the same
//! semantics (owner-scoped queries, cascading group deletion).

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use backend::Stores;
pub use connection::DatabasePool;
pub use memory::MemoryDatabase;
pub use store::{ExpenseStore, GroupStore, SessionStore, UserStore};
