use std::future::Future;
use std::time::Duration;

use sea_orm::DatabaseConnection;

use crate::{EngineError, Outcome, error::SystemCause};

mod accounts;
mod movements;

/// Run a block inside a DB transaction, committing on success.
///
/// On error the transaction guard is dropped, which rolls back everything
/// written inside the block.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

/// The movement ledger engine.
///
/// Holds no mutable state of its own; all state lives in the backing store,
/// so a single `Engine` can serve many concurrent tasks.
#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
    storage_timeout: Option<Duration>,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Bound a storage-touching operation by the configured timeout.
    ///
    /// Expiry maps to a system error, never a retry: replaying a
    /// non-idempotent insert could mint a duplicate movement, so retrying
    /// is left to the caller. Dropping the future rolls back any open
    /// transaction.
    pub(crate) async fn bounded<T>(
        &self,
        operation: impl Future<Output = Outcome<T>>,
    ) -> Outcome<T> {
        match self.storage_timeout {
            Some(limit) => match tokio::time::timeout(limit, operation).await {
                Ok(result) => result,
                Err(_) => Err(EngineError::System(SystemCause::Timeout(limit))),
            },
            None => operation.await,
        }
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
    storage_timeout: Option<Duration>,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Cap every storage-touching operation at `limit`.
    pub fn storage_timeout(mut self, limit: Duration) -> EngineBuilder {
        self.storage_timeout = Some(limit);
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> Outcome<Engine> {
        Ok(Engine {
            database: self.database,
            storage_timeout: self.storage_timeout,
        })
    }
}
