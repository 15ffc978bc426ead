use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub appwrite: AppwriteConfig,
}

/// Identifiers for the remote Appwrite project. Read once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct AppwriteConfig {
    pub endpoint: String,
    pub project_id: String,
    pub database_id: String,
    pub collection_id: String,
    pub bucket_id: String,
}

impl Config {
    /// Loads configuration from the environment (and a `.env` file if one is
    /// present). A missing identifier is left empty rather than failing
    /// startup; the resulting remote calls are rejected by the backend.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            appwrite: AppwriteConfig {
                endpoint: env::var("APPWRITE_ENDPOINT").unwrap_or_default(),
                project_id: env::var("APPWRITE_PROJECT_ID").unwrap_or_default(),
                database_id: env::var("APPWRITE_DATABASE_ID").unwrap_or_default(),
                collection_id: env::var("APPWRITE_COLLECTION_ID").unwrap_or_default(),
                bucket_id: env::var("APPWRITE_BUCKET_ID").unwrap_or_default(),
            },
        }
    }
}
