//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use expensehub_auth::session::SessionManager;
use expensehub_core::config::AppConfig;
use expensehub_database::Stores;
use expensehub_service::{ExpenseService, GroupService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Stores for every table
    pub stores: Stores,
    /// Accounts and sessions
    pub session_manager: Arc<SessionManager>,
    /// Group operations
    pub group_service: Arc<GroupService>,
    /// Expense operations
    pub expense_service: Arc<ExpenseService>,
}

impl AppState {
    /// Wire services on top of `stores`.
    pub fn new(config: AppConfig, stores: Stores) -> Self {
        let session_manager = Arc::new(SessionManager::new(
            Arc::clone(&stores.users),
            Arc::clone(&stores.sessions),
            config.auth.clone(),
            config.session.clone(),
        ));
        let group_service = Arc::new(GroupService::new(Arc::clone(&stores.groups)));
        let expense_service = Arc::new(ExpenseService::new(
            Arc::clone(&stores.groups),
            Arc::clone(&stores.expenses),
        ));

        Self {
            config: Arc::new(config),
            stores,
            session_manager,
            group_service,
            expense_service,
        }
    }
}
