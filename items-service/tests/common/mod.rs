#![allow(dead_code)]

use items_service::config::{ItemsConfig, MongoConfig};
use items_service::services::ItemStore;
use items_service::startup::Application;
use mongodb::bson::Document;
use mongodb::{Client as MongoClient, Collection};
use service_core::config::Config as CoreConfig;
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub store: ItemStore,
    pub db_name: String,
}

impl TestApp {
    /// Spawn with no store configured: the service runs degraded.
    pub async fn spawn_without_store() -> Self {
        let app = Self::spawn(None).await;
        app.wait_for_store().await;
        app
    }

    /// Spawn against `TEST_MONGODB_URI` with a throwaway database and wait for
    /// the connection attempt to settle.
    pub async fn spawn_with_store() -> Self {
        let app = Self::spawn(Some(test_mongodb_uri())).await;
        app.wait_for_store().await;
        assert_eq!(
            app.store.status_label().await,
            "connected",
            "MongoDB must be reachable at TEST_MONGODB_URI"
        );
        app
    }

    async fn spawn(uri: Option<String>) -> Self {
        let db_name = format!("items_test_{}", Uuid::new_v4().simple());

        // Use random port for testing (port 0)
        let config = ItemsConfig {
            common: CoreConfig { port: 0 },
            mongodb: MongoConfig {
                uri,
                database: Some(db_name.clone()),
            },
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let store = app.store().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling the root endpoint
        let client = reqwest::Client::new();
        for _ in 0..50 {
            if client.get(&address).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            store,
            db_name,
        }
    }

    /// Poll until the startup connection attempt has succeeded or failed.
    pub async fn wait_for_store(&self) {
        for _ in 0..100 {
            if self.store.status_label().await != "connecting" {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }
    }

    /// Raw handle on this app's `items` collection, bypassing the service.
    pub async fn items_collection(&self) -> Collection<Document> {
        let client = MongoClient::with_uri_str(test_mongodb_uri())
            .await
            .expect("Failed to create MongoDB client");
        client.database(&self.db_name).collection("items")
    }

    pub async fn cleanup(&self) {
        if let Ok(client) = MongoClient::with_uri_str(test_mongodb_uri()).await {
            client.database(&self.db_name).drop(None).await.ok();
        }
    }
}

pub fn test_mongodb_uri() -> String {
    std::env::var("TEST_MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
}
