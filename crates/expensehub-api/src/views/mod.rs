//! Server-rendered HTML screens.
//!
//! Pages are plain `format!` output; every interpolated value that comes
//! from user input goes through [`layout::escape`]. Mutations are done by
//! small inline scripts calling the JSON API.

pub mod dashboard;
pub mod docs;
pub mod group;
pub mod layout;
pub mod sign_in;

pub use layout::{escape, not_found_page};
