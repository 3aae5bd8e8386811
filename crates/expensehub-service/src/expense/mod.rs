//! Expense operations.

pub mod amount;
pub mod service;

pub use amount::parse_amount;
pub use service::ExpenseService;
