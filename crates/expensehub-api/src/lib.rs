//! # expensehub-api
//!
//! HTTP layer for ExpenseHub built on Axum.
//!
//! Provides the JSON API under `/api`, the page session guard, the
//! server-rendered screens, extractors and DTOs.

pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod views;

pub use router::build_router;
pub use state::AppState;
