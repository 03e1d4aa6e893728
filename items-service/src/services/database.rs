use crate::config::DEFAULT_DATABASE;
use crate::models::Item;
use futures::TryStreamExt;
use mongodb::{bson::doc, Client as MongoClient, Collection, Database};
use service_core::error::AppError;

pub const ITEMS_COLLECTION: &str = "items";

#[derive(Clone)]
pub struct ItemDb {
    client: MongoClient,
    db: Database,
}

impl ItemDb {
    /// Builds a driver client for `uri`. No round trip happens here; use
    /// [`ItemDb::health_check`] to find out whether the server is reachable.
    ///
    /// The database is `database` when given, otherwise the one named in the
    /// URI path, otherwise [`DEFAULT_DATABASE`].
    pub async fn connect(uri: &str, database: Option<&str>) -> Result<Self, AppError> {
        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to parse MongoDB connection string: {}", e);
            AppError::from(e)
        })?;
        let db = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        tracing::info!(database = %db.name(), "MongoDB client created");
        Ok(Self { client, db })
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn database_name(&self) -> &str {
        self.db.name()
    }

    pub fn items(&self) -> Collection<Item> {
        self.db.collection(ITEMS_COLLECTION)
    }

    /// Every document of the collection, unfiltered, in natural order.
    pub async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        let cursor = self.items().find(doc! {}, None).await.map_err(|e| {
            tracing::error!("Failed to query items: {}", e);
            AppError::from(e)
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to read items cursor: {}", e);
            AppError::from(e)
        })
    }

    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn database_comes_from_uri_path() {
        let db = ItemDb::connect("mongodb://localhost:27017/shop", None)
            .await
            .unwrap();
        assert_eq!(db.database_name(), "shop");
    }

    #[tokio::test]
    async fn explicit_database_overrides_uri_path() {
        let db = ItemDb::connect("mongodb://localhost:27017/shop", Some("catalog"))
            .await
            .unwrap();
        assert_eq!(db.database_name(), "catalog");
    }

    #[tokio::test]
    async fn database_falls_back_to_default() {
        let db = ItemDb::connect("mongodb://localhost:27017", None)
            .await
            .unwrap();
        assert_eq!(db.database_name(), DEFAULT_DATABASE);
        assert_eq!(db.items().name(), ITEMS_COLLECTION);
    }

    #[tokio::test]
    async fn rejects_malformed_uri() {
        let result = ItemDb::connect("not-a-mongo-uri", None).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
