//! # expensehub-auth
//!
//! Identity plumbing for ExpenseHub.
//!
//! ## Modules
//!
//! - `password`: Argon2id password hashing and the minimum-length policy
//! - `jwt`: signed session tokens carried in the session cookie
//! - `session`: sign-up, confirmation, sign-in/out, token resolution, cleanup
//! - `guard`: the page-level session guard decision

pub mod guard;
pub mod jwt;
pub mod password;
pub mod session;

pub use guard::{GuardOutcome, SessionGuard, SessionState};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{SessionCleanup, SessionIdentity, SessionManager, SignInResult, SignUpOutcome};
