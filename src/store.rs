use anyhow::{Context, Result};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde_json::{Map, Value as JsonValue};
use std::time::Duration;

use crate::config::Config;
use crate::error::InvalidDocument;
use crate::models::ConnectionSpec;

/// Shareable MongoDB handle for use across async handlers
///
/// The driver client owns a connection pool. It connects lazily on the first
/// operation and checks a connection out for the duration of each call, so
/// one instance serves every request for the life of the process.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
}

impl MongoStore {
    /// Create the process-wide client from configuration
    ///
    /// No connection is attempted here; an unreachable store only surfaces
    /// when an operation runs and server selection times out.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let mut options = ClientOptions::parse(&config.mongodb_uri)
            .await
            .context("Failed to parse MONGODB_URI")?;

        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.max_pool_size = config.mongodb_max_pool_size;
        options.server_selection_timeout = Some(Duration::from_millis(
            config.mongodb_server_selection_timeout_ms,
        ));

        let client = Client::with_options(options)
            .context("Failed to create MongoDB client")?;

        tracing::info!("MongoDB client initialised (connections are opened on demand)");

        Ok(Self { client })
    }

    fn collection(&self, spec: &ConnectionSpec) -> Collection<Document> {
        self.client
            .database(&spec.database)
            .collection::<Document>(&spec.collection)
    }

    /// Insert a new document and return its generated identifier
    pub async fn create(
        &self,
        spec: &ConnectionSpec,
        document: Map<String, JsonValue>,
    ) -> Result<String> {
        tracing::info!("Writing data to {}.{}", spec.database, spec.collection);

        let document = to_document(document)?;
        let result = self
            .collection(spec)
            .insert_one(document, None)
            .await
            .context("Failed to insert document")?;

        let id = id_to_string(&result.inserted_id);
        tracing::debug!("Inserted document with id: {}", id);
        Ok(id)
    }

    /// Return every document in the collection with `_id` removed
    ///
    /// Documents are rendered as relaxed extended JSON, so dates and other
    /// BSON-only types keep a lossless representation.
    pub async fn read(&self, spec: &ConnectionSpec) -> Result<Vec<JsonValue>> {
        tracing::info!("Reading all data from {}.{}", spec.database, spec.collection);

        let cursor = self
            .collection(spec)
            .find(None, None)
            .await
            .context("Failed to query collection")?;

        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .context("Failed to read documents from cursor")?;

        tracing::debug!("Read {} documents", documents.len());

        Ok(documents.into_iter().map(strip_id).collect())
    }

    /// Apply `$set` with `changes` to the first document matching `filter`
    ///
    /// Returns true when a document was actually modified.
    pub async fn update(
        &self,
        spec: &ConnectionSpec,
        filter: Map<String, JsonValue>,
        changes: Map<String, JsonValue>,
    ) -> Result<bool> {
        tracing::info!("Updating data in {}.{}", spec.database, spec.collection);

        let filter = to_document(filter)?;
        let changes = to_document(changes)?;
        let result = self
            .collection(spec)
            .update_one(filter, doc! { "$set": changes }, None)
            .await
            .context("Failed to update document")?;

        tracing::debug!(
            "Update matched {} and modified {} documents",
            result.matched_count,
            result.modified_count
        );
        Ok(result.modified_count > 0)
    }

    /// Remove the first document matching `filter`
    ///
    /// Returns true when a document was removed.
    pub async fn delete(
        &self,
        spec: &ConnectionSpec,
        filter: Map<String, JsonValue>,
    ) -> Result<bool> {
        tracing::info!("Deleting data from {}.{}", spec.database, spec.collection);

        let filter = to_document(filter)?;
        let result = self
            .collection(spec)
            .delete_one(filter, None)
            .await
            .context("Failed to delete document")?;

        tracing::debug!("Deleted {} documents", result.deleted_count);
        Ok(result.deleted_count > 0)
    }

    /// Round-trip a `ping` command to verify the store is reachable
    pub async fn ping(&self) -> Result<()> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .context("Failed to ping MongoDB")?;

        tracing::debug!("MongoDB ping succeeded");
        Ok(())
    }

    #[cfg(test)]
    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Convert a JSON object into a BSON document
///
/// Extended JSON is honoured, so `{"_id": {"$oid": "..."}}` selects by
/// ObjectId. An object that collapses into a scalar BSON value (for example
/// a bare `{"$oid": "..."}`) is rejected.
pub fn to_document(map: Map<String, JsonValue>) -> Result<Document> {
    match Bson::try_from(JsonValue::Object(map)) {
        Ok(Bson::Document(document)) => Ok(document),
        Ok(other) => Err(InvalidDocument(format!(
            "expected a document, got {:?}",
            other.element_type()
        ))
        .into()),
        Err(err) => Err(InvalidDocument(err.to_string()).into()),
    }
}

/// Render an inserted identifier the way clients expect to see it
pub fn id_to_string(id: &Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn strip_id(mut document: Document) -> JsonValue {
    document.remove("_id");
    Bson::Document(document).into_relaxed_extjson()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;
    use serde_json::json;

    fn object(value: JsonValue) -> Map<String, JsonValue> {
        match value {
            JsonValue::Object(map) => map,
            other => panic!("expected object, got {}", other),
        }
    }

    fn test_config() -> Config {
        Config {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017/".to_string()),
            mongodb_max_pool_size: Some(4),
            mongodb_server_selection_timeout_ms: 2000,
            service_port: 5001,
            service_host: "0.0.0.0".to_string(),
        }
    }

    fn unique_spec() -> ConnectionSpec {
        ConnectionSpec {
            database: format!("store_test_{}", uuid::Uuid::new_v4().simple()),
            collection: "items".to_string(),
        }
    }

    #[test]
    fn test_store_is_clonable_and_send_sync() {
        fn assert_clone_send_sync<T: Clone + Send + Sync>() {}
        assert_clone_send_sync::<MongoStore>();
    }

    #[test]
    fn test_to_document_plain_object() {
        let document = to_document(object(json!({"name": "a", "n": 1}))).unwrap();
        assert_eq!(document.get_str("name").unwrap(), "a");
        assert!(document.contains_key("n"));
    }

    #[test]
    fn test_to_document_extended_json_filter() {
        let oid = ObjectId::new();
        let document =
            to_document(object(json!({"_id": {"$oid": oid.to_hex()}}))).unwrap();
        assert_eq!(document.get_object_id("_id").unwrap(), oid);
    }

    #[test]
    fn test_to_document_rejects_scalar_extended_json() {
        let oid = ObjectId::new();
        let err = to_document(object(json!({"$oid": oid.to_hex()}))).unwrap_err();
        assert!(err.downcast_ref::<InvalidDocument>().is_some());
    }

    #[test]
    fn test_id_to_string() {
        let oid = ObjectId::new();
        assert_eq!(id_to_string(&Bson::ObjectId(oid)), oid.to_hex());
        assert_eq!(id_to_string(&Bson::String("custom".to_string())), "custom");
        assert_eq!(id_to_string(&Bson::Int32(7)), "7");
    }

    #[test]
    fn test_strip_id_removes_identifier() {
        let value = strip_id(doc! { "_id": ObjectId::new(), "name": "a" });
        assert_eq!(value, json!({"name": "a"}));
    }

    #[tokio::test]
    async fn test_client_creation_does_not_connect() {
        let config = Config {
            mongodb_uri: "mongodb://127.0.0.1:1/".to_string(),
            ..test_config()
        };
        assert!(MongoStore::from_config(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_invalid_uri_rejected() {
        let config = Config {
            mongodb_uri: "not-a-mongodb-uri".to_string(),
            ..test_config()
        };
        let err = MongoStore::from_config(&config).await.err().unwrap();
        assert!(err.to_string().contains("MONGODB_URI"));
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGODB_URI"]
    async fn test_create_read_update_delete() {
        let store = MongoStore::from_config(&test_config()).await.unwrap();
        let spec = unique_spec();

        let id = store.create(&spec, object(json!({"name": "a"}))).await.unwrap();
        assert!(!id.is_empty());

        let documents = store.read(&spec).await.unwrap();
        assert_eq!(documents, vec![json!({"name": "a"})]);

        let updated = store
            .update(&spec, object(json!({"name": "a"})), object(json!({"x": 1})))
            .await
            .unwrap();
        assert!(updated);

        // Setting the same value again modifies nothing
        let updated_again = store
            .update(&spec, object(json!({"name": "a"})), object(json!({"x": 1})))
            .await
            .unwrap();
        assert!(!updated_again);

        assert!(store.delete(&spec, object(json!({"name": "a"}))).await.unwrap());
        assert!(!store.delete(&spec, object(json!({"name": "a"}))).await.unwrap());

        store.client().database(&spec.database).drop(None).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGODB_URI"]
    async fn test_update_and_delete_touch_single_match() {
        let store = MongoStore::from_config(&test_config()).await.unwrap();
        let spec = unique_spec();

        for _ in 0..3 {
            store.create(&spec, object(json!({"kind": "dup"}))).await.unwrap();
        }

        store
            .update(&spec, object(json!({"kind": "dup"})), object(json!({"seen": true})))
            .await
            .unwrap();
        let documents = store.read(&spec).await.unwrap();
        let seen = documents.iter().filter(|d| d.get("seen").is_some()).count();
        assert_eq!(seen, 1);

        store.delete(&spec, object(json!({"kind": "dup"}))).await.unwrap();
        assert_eq!(store.read(&spec).await.unwrap().len(), 2);

        store.client().database(&spec.database).drop(None).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGODB_URI"]
    async fn test_ping() {
        let store = MongoStore::from_config(&test_config()).await.unwrap();
        store.ping().await.unwrap();
    }
}
