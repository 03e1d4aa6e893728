//! Store availability tracking.
//!
//! The HTTP server starts before the database is known to be reachable. The
//! store handle records where the single startup connection attempt stands so
//! data routes can answer 503 instead of failing in an undefined way.

use crate::models::Item;
use crate::services::ItemDb;
use service_core::error::AppError;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Clone)]
pub enum StoreState {
    Connecting,
    Connected(ItemDb),
    Failed(String),
    Closed,
}

impl StoreState {
    pub fn label(&self) -> &'static str {
        match self {
            StoreState::Connecting => "connecting",
            StoreState::Connected(_) => "connected",
            StoreState::Failed(_) => "failed",
            StoreState::Closed => "closed",
        }
    }
}

/// Shared handle to the items store, injected into the router state.
#[derive(Clone)]
pub struct ItemStore {
    state: Arc<RwLock<StoreState>>,
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore {
    pub fn new() -> Self {
        Self::with_state(StoreState::Connecting)
    }

    pub fn connected(db: ItemDb) -> Self {
        Self::with_state(StoreState::Connected(db))
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self::with_state(StoreState::Failed(reason.into()))
    }

    fn with_state(state: StoreState) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Runs [`ItemStore::connect`] on a background task.
    pub fn spawn_connect(&self, uri: Option<String>, database: Option<String>) -> JoinHandle<()> {
        let store = self.clone();
        tokio::spawn(async move {
            store.connect(uri.as_deref(), database.as_deref()).await;
        })
    }

    /// One connection attempt: build the client, then ping. No retry.
    ///
    /// Only a store still in `Connecting` moves to `Connected` or `Failed`; a
    /// store closed in the meantime stays closed and the new client is dropped.
    pub async fn connect(&self, uri: Option<&str>, database: Option<&str>) {
        let outcome = match uri {
            Some(uri) => Self::open(uri, database).await,
            None => Err("MONGO_URI is not set".to_string()),
        };

        let mut state = self.state.write().await;
        if !matches!(*state, StoreState::Connecting) {
            tracing::warn!(state = state.label(), "Store left connecting state before connect finished");
            drop(state);
            if let Ok(db) = outcome {
                db.shutdown().await;
            }
            return;
        }

        match outcome {
            Ok(db) => {
                tracing::info!(database = %db.database_name(), "MongoDB connected");
                *state = StoreState::Connected(db);
            }
            Err(reason) => {
                tracing::error!(error = %reason, "DB Error");
                *state = StoreState::Failed(reason);
            }
        }
    }

    async fn open(uri: &str, database: Option<&str>) -> Result<ItemDb, String> {
        let db = ItemDb::connect(uri, database)
            .await
            .map_err(|e| e.to_string())?;
        db.health_check().await.map_err(|e| e.to_string())?;
        Ok(db)
    }

    pub async fn status_label(&self) -> &'static str {
        self.state.read().await.label()
    }

    async fn ready(&self) -> Result<ItemDb, AppError> {
        match &*self.state.read().await {
            StoreState::Connected(db) => Ok(db.clone()),
            StoreState::Connecting => Err(AppError::ServiceUnavailable(
                "database connection is still being established".to_string(),
            )),
            StoreState::Failed(reason) => Err(AppError::ServiceUnavailable(format!(
                "database connection failed: {}",
                reason
            ))),
            StoreState::Closed => Err(AppError::ServiceUnavailable(
                "database connection is closed".to_string(),
            )),
        }
    }

    pub async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        self.ready().await?.find_all().await
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        self.ready().await?.health_check().await
    }

    /// Moves to `Closed` and shuts the driver client down if there was one.
    pub async fn close(&self) {
        let previous = std::mem::replace(&mut *self.state.write().await, StoreState::Closed);
        if let StoreState::Connected(db) = previous {
            tracing::info!("Closing MongoDB connection");
            db.shutdown().await;
        }
    }
}
