//! PostgreSQL repository implementations of the store traits.

pub mod expense;
pub mod group;
pub mod session;
pub mod user;

pub use expense::ExpenseRepository;
pub use group::GroupRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
