use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::ReplaceOptions;
use mongodb::{Collection as MongoCollection, Database};
use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::metrics::track_store_operation;
use crate::utils::retry::{retry_async_with_config, RetryConfig};
use crate::utils::time::chrono_to_bson;

const COLLECTION_NAME: &str = "ledger_collections";

/// One document per ledger key; the payload is the JSON array verbatim.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    #[serde(rename = "_id")]
    key: String,
    payload: String,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

pub struct MongoStore {
    mongo: Database,
}

impl MongoStore {
    pub async fn connect(mongo_uri: &str, database: &str) -> Result<Self> {
        let client = mongodb::Client::with_uri_str(mongo_uri)
            .await
            .context("Failed to connect to MongoDB")?;
        let store = Self {
            mongo: client.database(database),
        };
        store.ping().await?;
        tracing::info!("MongoDB connected (database={})", database);
        Ok(store)
    }

    fn entries(&self) -> MongoCollection<StoredEntry> {
        self.mongo.collection(COLLECTION_NAME)
    }
}

#[async_trait]
impl KeyValueStore for MongoStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries();
        track_store_operation("get", self.backend_name(), async {
            let entry = retry_async_with_config(RetryConfig::default(), || async {
                entries.find_one(doc! { "_id": key }).await
            })
            .await
            .with_context(|| format!("Failed to read {} from MongoDB", key))?;
            Ok::<_, anyhow::Error>(entry.map(|e| e.payload))
        })
        .await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let entries = self.entries();
        let entry = StoredEntry {
            key: key.to_string(),
            payload: value.to_string(),
            updated_at: chrono_to_bson(Utc::now()),
        };

        track_store_operation("set", self.backend_name(), async {
            retry_async_with_config(RetryConfig::aggressive(), || async {
                entries
                    .replace_one(doc! { "_id": key }, &entry)
                    .with_options(ReplaceOptions::builder().upsert(true).build())
                    .await
                    .map(|_| ())
            })
            .await
            .with_context(|| format!("Failed to write {} to MongoDB", key))
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        self.mongo
            .run_command(doc! { "ping": 1 })
            .await
            .context("MongoDB ping failed")?;
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "mongo"
    }
}
