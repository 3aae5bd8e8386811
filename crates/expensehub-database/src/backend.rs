//! Backend selection and the bundle of stores handed to the services.

use std::sync::Arc;

use tracing::info;

use expensehub_core::config::{DatabaseBackend, DatabaseConfig};
use expensehub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryDatabase;
use crate::migration::run_migrations;
use crate::repositories::{ExpenseRepository, GroupRepository, SessionRepository, UserRepository};
use crate::store::{ExpenseStore, GroupStore, SessionStore, UserStore};

/// The concrete backend behind a [`Stores`] bundle.
#[derive(Debug, Clone)]
enum Backend {
    Postgres(DatabasePool),
    Memory,
}

/// One store per table, all served by the same backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Group persistence.
    pub groups: Arc<dyn GroupStore>,
    /// Expense persistence.
    pub expenses: Arc<dyn ExpenseStore>,
    /// Account persistence.
    pub users: Arc<dyn UserStore>,
    /// Session persistence.
    pub sessions: Arc<dyn SessionStore>,
    backend: Backend,
}

impl Stores {
    /// Open the backend named by `config.backend`, running migrations for
    /// PostgreSQL when `config.run_migrations` is set.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.backend {
            DatabaseBackend::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                if config.run_migrations {
                    run_migrations(pool.pool()).await?;
                }
                Ok(Self::postgres(pool))
            }
            DatabaseBackend::Memory => {
                info!("Using in-memory database backend; data is lost on exit");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by PostgreSQL repositories over `pool`.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            groups: Arc::new(GroupRepository::new(pg.clone())),
            expenses: Arc::new(ExpenseRepository::new(pg.clone())),
            users: Arc::new(UserRepository::new(pg.clone())),
            sessions: Arc::new(SessionRepository::new(pg)),
            backend: Backend::Postgres(pool),
        }
    }

    /// Stores backed by a fresh, empty [`MemoryDatabase`].
    pub fn memory() -> Self {
        Self::from_memory(MemoryDatabase::new())
    }

    /// Stores sharing the tables of `db`.
    pub fn from_memory(db: MemoryDatabase) -> Self {
        Self {
            groups: Arc::new(db.clone()),
            expenses: Arc::new(db.clone()),
            users: Arc::new(db.clone()),
            sessions: Arc::new(db),
            backend: Backend::Memory,
        }
    }

    /// Short name of the active backend, as reported by health checks.
    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory => "memory",
        }
    }

    /// Verify the backend can serve queries.
    pub async fn health_check(&self) -> AppResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => pool.health_check().await,
            Backend::Memory => Ok(()),
        }
    }

    /// Release backend resources.
    pub async fn close(&self) {
        if let Backend::Postgres(pool) = &self.backend {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_from_config() {
        let config = DatabaseConfig {
            backend: DatabaseBackend::Memory,
            ..DatabaseConfig::default()
        };
        let stores = Stores::connect(&config).await.unwrap();
        assert_eq!(stores.backend_name(), "memory");
        assert!(stores.health_check().await.is_ok());
    }
}
