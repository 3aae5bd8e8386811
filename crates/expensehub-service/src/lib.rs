//! # expensehub-service
//!
//! Business logic for groups and expenses. Every operation takes an explicit
//! [`RequestContext`] naming the caller; services validate input first and
//! then apply the caller's ownership to every store call.

pub mod context;
pub mod expense;
pub mod group;

pub use context::RequestContext;
pub use expense::ExpenseService;
pub use group::GroupService;
