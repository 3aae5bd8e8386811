//! # expensehub-core
//!
//! Core crate for ExpenseHub. Contains the configuration schemas and the
//! unified error system shared by every other crate, including the
//! mapping of errors onto HTTP responses.
//!
//! This crate has **no** internal dependencies on other ExpenseHub crates.

pub mod config;
pub mod error;
pub mod http;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
