//! Page-level session guard.
//!
//! Two states, derived per request from the session cookie. The decision is
//! a pure function of the state and the requested path, so the HTTP layer
//! only has to resolve the cookie and apply the outcome.

/// Sign-in screen.
pub const SIGN_IN_PATH: &str = "/";

/// Main listing screen, where signed-in users land.
pub const HOME_PATH: &str = "/dashboard";

/// Pages an anonymous visitor may open.
const PUBLIC_PAGES: &[&str] = &[SIGN_IN_PATH, "/docs"];

/// Authentication state of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// The request carries an active session.
    Authenticated,
    /// No session, or one that is invalid, expired, or terminated.
    Anonymous,
}

/// What to do with a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Serve the page.
    Continue,
    /// Redirect to the given path.
    Redirect(&'static str),
}

/// Stateless redirect rules for page navigation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionGuard;

impl SessionGuard {
    /// Paths the guard never intercepts: the JSON API and static assets.
    pub fn is_excluded(path: &str) -> bool {
        path == "/api"
            || path.starts_with("/api/")
            || path == "/favicon.ico"
            || path.starts_with("/static/")
    }

    /// Decide whether `path` may be served in `state`.
    pub fn evaluate(state: SessionState, path: &str) -> GuardOutcome {
        if Self::is_excluded(path) {
            return GuardOutcome::Continue;
        }
        match state {
            SessionState::Authenticated if path == SIGN_IN_PATH => GuardOutcome::Redirect(HOME_PATH),
            SessionState::Anonymous if !PUBLIC_PAGES.contains(&path) => {
                GuardOutcome::Redirect(SIGN_IN_PATH)
            }
            _ => GuardOutcome::Continue,
        }
    }
}
