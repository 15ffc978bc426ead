//! Shared Appwrite HTTP client.
//!
//! All three services go through one `AppwriteClient`, so the session cookie
//! issued at login is visible to subsequent account, database, and storage
//! calls. The client is constructed once during startup and handed to each
//! service by reference; there is no hidden module-level singleton.

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::config::AppwriteConfig;
use crate::types::{AppError, AppResult};

/// Sentinel understood by Appwrite: the server generates the identifier.
pub const ID_UNIQUE: &str = "unique()";

/// Error payload Appwrite returns for rejected requests.
#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(rename = "type", default)]
    kind: String,
}

pub struct AppwriteClient {
    http: Client,
    config: AppwriteConfig,
}

impl AppwriteClient {
    pub fn new(config: AppwriteConfig) -> AppResult<Self> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AppwriteConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.endpoint.trim_end_matches('/'), path)
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.headers(self.http.get(self.url(path)))
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.headers(self.http.post(self.url(path)))
    }

    pub fn patch(&self, path: &str) -> RequestBuilder {
        self.headers(self.http.patch(self.url(path)))
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.headers(self.http.delete(self.url(path)))
    }

    fn headers(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Response-Format", "1.6.0")
    }

    /// Sends a request and decodes the JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> AppResult<T> {
        let response = builder.send().await?;
        let response = Self::check(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::InvalidResponse(e.to_string()))
    }

    /// Sends a request and discards the (usually empty) body.
    pub async fn send_empty(&self, builder: RequestBuilder) -> AppResult<()> {
        let response = builder.send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn check(response: Response) -> AppResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let (message, kind) = match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => (err.message, err.kind),
            Err(_) => (body, String::new()),
        };
        debug!(status = %status, kind = %kind, "appwrite call rejected");

        if status == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(message));
        }
        Err(AppError::Api {
            status: status.as_u16(),
            kind,
            message,
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use super::AppwriteClient;
    use crate::config::AppwriteConfig;

    /// Client pointed at a mockito server, with fixed test identifiers.
    pub(crate) fn client_for(endpoint: &str) -> Arc<AppwriteClient> {
        let config = AppwriteConfig {
            endpoint: endpoint.to_string(),
            project_id: "proj".to_string(),
            database_id: "db".to_string(),
            collection_id: "posts".to_string(),
            bucket_id: "media".to_string(),
        };
        Arc::new(AppwriteClient::new(config).expect("client construction"))
    }
}
