//! MongoDB client wrapper

use bson::doc;
use mongodb::Client;
use tracing::{debug, info, warn};

use crate::types::BackendError;

/// Options appended to the connection string so start-up never hangs on an
/// unreachable server
const TIMEOUT_OPTIONS: &str = "serverSelectionTimeoutMS=3000&connectTimeoutMS=3000";

/// MongoDB client wrapper
#[derive(Clone)]
pub struct MongoClient {
    client: Client,
    db_name: String,
}

impl MongoClient {
    /// Connect and verify the connection with a ping
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, BackendError> {
        let client = Client::with_uri_str(&with_timeouts(uri))
            .await
            .map_err(|e| BackendError::Database(format!("Failed to connect to MongoDB: {}", e)))?;

        let mongo = Self {
            client,
            db_name: db_name.to_string(),
        };
        mongo.ping().await?;

        info!("Connected to MongoDB database '{}'", db_name);
        Ok(mongo)
    }

    /// Connect when a connection string is given.
    ///
    /// The API serves built-in data without a database, so any failure is
    /// logged and yields `None`.
    pub async fn connect_optional(uri: Option<&str>, db_name: &str) -> Option<Self> {
        let Some(uri) = uri.map(str::trim).filter(|u| !u.is_empty()) else {
            info!("DATABASE_URL not set, running without a database");
            return None;
        };

        match Self::new(uri, db_name).await {
            Ok(client) => Some(client),
            Err(e) => {
                warn!("Database connection failed (continuing without): {}", e);
                None
            }
        }
    }

    /// Round-trip a ping to the configured database
    pub async fn ping(&self) -> Result<(), BackendError> {
        self.client
            .database(&self.db_name)
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| BackendError::Database(format!("MongoDB ping failed: {}", e)))?;
        debug!("MongoDB ping ok");
        Ok(())
    }
}

/// Whether the URI already has a `/db` path after the host list
fn has_path(uri: &str) -> bool {
    uri.split_once("://")
        .map(|(_, rest)| rest.contains('/'))
        .unwrap_or(false)
}

fn with_timeouts(uri: &str) -> String {
    if uri.contains('?') {
        format!("{}&{}", uri, TIMEOUT_OPTIONS)
    } else if has_path(uri) {
        format!("{}?{}", uri, TIMEOUT_OPTIONS)
    } else {
        format!("{}/?{}", uri, TIMEOUT_OPTIONS)
    }
}
