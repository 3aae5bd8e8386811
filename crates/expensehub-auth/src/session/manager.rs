//! Session lifecycle manager: sign-up, confirmation, sign-in, sign-out, and
//! resolving a presented token back to an identity.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;
use validator::ValidateEmail;

use expensehub_core::config::{AuthConfig, SessionConfig};
use expensehub_core::error::AppError;
use expensehub_core::result::AppResult;
use expensehub_database::store::{SessionStore, UserStore};
use expensehub_entity::session::Session;
use expensehub_entity::user::{CreateUser, Profile, User};

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::{PasswordHasher, PasswordValidator};

/// Shown after sign-up when the account still has to be confirmed.
pub const CONFIRMATION_PENDING_MESSAGE: &str = "Check your email for the confirmation link!";

/// Shown after sign-up when confirmation is disabled.
pub const ACCOUNT_READY_MESSAGE: &str = "Account created. You can sign in now.";

const INVALID_CREDENTIALS: &str = "Invalid login credentials";

const MAX_USERNAME_CHARS: usize = 100;

/// Result of a successful sign-up.
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    /// The stored account.
    pub user: User,
    /// Link that confirms the account, when confirmation is required.
    pub confirmation_url: Option<String>,
    /// Notice for the caller.
    pub message: &'static str,
}

/// Result of a successful sign-in.
#[derive(Debug, Clone)]
pub struct SignInResult {
    /// Signed session token for the cookie.
    pub token: String,
    /// The created session row.
    pub session: Session,
    /// The authenticated account.
    pub user: User,
}

/// Who a valid session token belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdentity {
    /// Authenticated user.
    pub user_id: Uuid,
    /// Session the token belongs to.
    pub session_id: Uuid,
    /// The user's e-mail.
    pub email: String,
}

/// Manages accounts and sessions on top of the user and session stores.
#[derive(Clone)]
pub struct SessionManager {
    encoder: JwtEncoder,
    decoder: JwtDecoder,
    hasher: PasswordHasher,
    validator: PasswordValidator,
    users: Arc<dyn UserStore>,
    sessions: Arc<dyn SessionStore>,
    auth_config: AuthConfig,
    session_config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("require_email_confirmation", &self.auth_config.require_email_confirmation)
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager.
    pub fn new(
        users: Arc<dyn UserStore>,
        sessions: Arc<dyn SessionStore>,
        auth_config: AuthConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            encoder: JwtEncoder::new(&auth_config),
            decoder: JwtDecoder::new(&auth_config),
            hasher: PasswordHasher::new(),
            validator: PasswordValidator::new(&auth_config),
            users,
            sessions,
            auth_config,
            session_config,
        }
    }

    /// Register a new account.
    ///
    /// With e-mail confirmation enabled the account starts unconfirmed and
    /// the confirmation link is written to the log; there is no mail
    /// transport.
    pub async fn sign_up(
        &self,
        email: &str,
        password: &str,
        username: Option<&str>,
    ) -> AppResult<SignUpOutcome> {
        let email = normalize_email(email)?;
        self.validator.validate(password)?;
        let username = normalize_username(username)?;

        let password_hash = self.hasher.hash_password(password)?;
        let confirmation_token = self
            .auth_config
            .require_email_confirmation
            .then(|| Uuid::new_v4().simple().to_string());

        let user = self
            .users
            .create(&CreateUser {
                email,
                username,
                password_hash,
                confirmation_token: confirmation_token.clone(),
            })
            .await
            .map_err(|e| e.or_internal("Failed to create account"))?;

        let confirmation_url = confirmation_token.map(|token| {
            format!(
                "{}/api/auth/confirm?token={token}",
                self.auth_config.public_base_url.trim_end_matches('/')
            )
        });

        match &confirmation_url {
            Some(url) => {
                info!(user_id = %user.id, email = %user.email, confirmation_url = %url, "Account registered, confirmation pending");
            }
            None => info!(user_id = %user.id, email = %user.email, "Account registered"),
        }

        Ok(SignUpOutcome {
            user,
            message: if confirmation_url.is_some() {
                CONFIRMATION_PENDING_MESSAGE
            } else {
                ACCOUNT_READY_MESSAGE
            },
            confirmation_url,
        })
    }

    /// Confirm the account holding `token`. Tokens are single-use.
    pub async fn confirm_email(&self, token: &str) -> AppResult<User> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::validation("Missing confirmation token"));
        }

        let user = self
            .users
            .confirm_by_token(token)
            .await
            .map_err(|e| e.or_internal("Failed to confirm account"))?
            .ok_or_else(|| AppError::validation("Invalid or expired confirmation link"))?;

        info!(user_id = %user.id, "E-mail confirmed");
        Ok(user)
    }

    /// Verify credentials and open a new session.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInResult> {
        let email = email.trim().to_lowercase();
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(|e| e.or_internal("Failed to sign in"))?
            .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

        if !self.hasher.verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Sign-in with wrong password");
            return Err(AppError::unauthorized(INVALID_CREDENTIALS));
        }

        if !user.is_confirmed() {
            return Err(AppError::unauthorized("Email not confirmed"));
        }

        let now = Utc::now();
        let ttl_hours = i64::try_from(self.session_config.ttl_hours).unwrap_or(i64::MAX);
        let expires_at = now
            .checked_add_signed(Duration::try_hours(ttl_hours).unwrap_or(Duration::MAX))
            .unwrap_or(chrono::DateTime::<Utc>::MAX_UTC);
        let session = Session {
            id: Uuid::new_v4(),
            user_id: user.id,
            created_at: now,
            expires_at,
            terminated_at: None,
        };

        self.sessions
            .create(&session)
            .await
            .map_err(|e| e.or_internal("Failed to sign in"))?;

        let token = self
            .encoder
            .encode_session_token(user.id, session.id, now, expires_at)?;

        info!(user_id = %user.id, session_id = %session.id, "Sign-in successful");
        Ok(SignInResult {
            token,
            session,
            user,
        })
    }

    /// Terminate `session_id`. Already terminated sessions are not an error.
    pub async fn sign_out(&self, session_id: Uuid) -> AppResult<()> {
        let terminated = self
            .sessions
            .terminate(session_id, Utc::now())
            .await
            .map_err(|e| e.or_internal("Failed to sign out"))?;
        info!(session_id = %session_id, terminated, "Signed out");
        Ok(())
    }

    /// Resolve a presented token to its identity.
    ///
    /// `None` for bad signatures, expired tokens, and terminated or expired
    /// sessions. Store failures are errors.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<SessionIdentity>> {
        let claims = match self.decoder.decode(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(reason = %e.message, "Rejected session token");
                return Ok(None);
            }
        };

        let session = self
            .sessions
            .find_by_id(claims.session_id())
            .await
            .map_err(|e| e.or_internal("Failed to validate session"))?;
        let Some(session) = session else {
            return Ok(None);
        };
        if session.user_id != claims.user_id() || !session.is_active_at(Utc::now()) {
            return Ok(None);
        }

        let user = self
            .users
            .find_by_id(session.user_id)
            .await
            .map_err(|e| e.or_internal("Failed to validate session"))?;

        Ok(user.map(|user| SessionIdentity {
            user_id: user.id,
            session_id: session.id,
            email: user.email,
        }))
    }

    /// Like [`resolve`](Self::resolve) but an invalid token is `Unauthorized`.
    pub async fn authenticate(&self, token: &str) -> AppResult<SessionIdentity> {
        self.resolve(token)
            .await?
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }

    /// Profile of an authenticated user.
    pub async fn profile(&self, user_id: Uuid) -> AppResult<Profile> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|e| e.or_internal("Failed to load profile"))?
            .map(|user| user.profile())
            .ok_or_else(|| AppError::unauthorized("Unauthorized"))
    }
}

/// Trim, lower-case, and validate an e-mail address.
fn normalize_email(email: &str) -> AppResult<String> {
    let email = email.trim().to_lowercase();
    if email.is_empty() {
        return Err(AppError::validation("Email is required"));
    }
    if !email.validate_email() {
        return Err(AppError::validation("Unable to validate email address: invalid format"));
    }
    Ok(email)
}

fn normalize_username(username: Option<&str>) -> AppResult<Option<String>> {
    let Some(username) = username.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(AppError::validation(format!(
            "Username must be at most {MAX_USERNAME_CHARS} characters"
        )));
    }
    Ok(Some(username.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use expensehub_core::error::ErrorKind;
    use expensehub_database::MemoryDatabase;

    fn manager(require_confirmation: bool) -> (SessionManager, MemoryDatabase) {
        let db = MemoryDatabase::new();
        let auth = AuthConfig {
            require_email_confirmation: require_confirmation,
            public_base_url: "https://expenses.example.com/".to_string(),
            ..AuthConfig::default()
        };
        let manager = SessionManager::new(
            Arc::new(db.clone()),
            Arc::new(db.clone()),
            auth,
            SessionConfig::default(),
        );
        (manager, db)
    }

    #[tokio::test]
    async fn test_sign_up_requires_confirmation() {
        let (manager, _) = manager(true);
        let outcome = manager
            .sign_up(" Ana@Example.com ", "secret1", Some("ana"))
            .await
            .unwrap();

        assert_eq!(outcome.user.email, "ana@example.com");
        assert_eq!(outcome.message, CONFIRMATION_PENDING_MESSAGE);
        let url = outcome.confirmation_url.unwrap();
        assert!(url.starts_with("https://expenses.example.com/api/auth/confirm?token="));

        let err = manager.sign_in("ana@example.com", "secret1").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthorized);
        assert_eq!(err.message, "Email not confirmed");

        let token = url.rsplit('=').next().unwrap();
        manager.confirm_email(token).await.unwrap();
        assert!(manager.sign_in("ana@example.com", "secret1").await.is_ok());

        let err = manager.confirm_email(token).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_sign_up_validation() {
        let (manager, _) = manager(false);
        let err = manager.sign_up("not-an-email", "secret1", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = manager.sign_up("a@b.com", "123", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        manager.sign_up("a@b.com", "secret1", None).await.unwrap();
        let err = manager.sign_up("A@B.com", "secret1", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "User already registered");
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_alike() {
        let (manager, _) = manager(false);
        manager.sign_up("a@b.com", "secret1", None).await.unwrap();

        let wrong = manager.sign_in("a@b.com", "secret2").await.unwrap_err();
        let unknown = manager.sign_in("x@b.com", "secret1").await.unwrap_err();
        assert_eq!(wrong.kind, ErrorKind::Unauthorized);
        assert_eq!(wrong.message, unknown.message);
        assert_eq!(wrong.message, "Invalid login credentials");
    }

    #[tokio::test]
    async fn test_resolve_until_sign_out() {
        let (manager, _) = manager(false);
        let outcome = manager.sign_up("a@b.com", "secret1", None).await.unwrap();
        assert!(outcome.confirmation_url.is_none());

        let signed_in = manager.sign_in("a@b.com", "secret1").await.unwrap();
        let identity = manager.resolve(&signed_in.token).await.unwrap().unwrap();
        assert_eq!(identity.user_id, outcome.user.id);
        assert_eq!(identity.session_id, signed_in.session.id);

        manager.sign_out(identity.session_id).await.unwrap();
        assert!(manager.resolve(&signed_in.token).await.unwrap().is_none());
        let err = manager.authenticate(&signed_in.token).await.unwrap_err();
        assert_eq!(err.message, "Unauthorized");
    }

    #[tokio::test]
    async fn test_resolve_rejects_garbage() {
        let (manager, _) = manager(false);
        assert!(manager.resolve("not.a.token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_profile() {
        let (manager, _) = manager(false);
        let outcome = manager
            .sign_up("a@b.com", "secret1", Some("  "))
            .await
            .unwrap();
        let profile = manager.profile(outcome.user.id).await.unwrap();
        assert_eq!(profile.email, "a@b.com");
        assert_eq!(profile.username, None);
    }
}
