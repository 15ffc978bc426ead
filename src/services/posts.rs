//! Document CRUD against the blog's post collection.
//!
//! The post slug doubles as the Appwrite document id, so lookups by slug are
//! direct document fetches and slug uniqueness is enforced by the backend.
//! Calls are single-shot: no pagination cursors, no retry, no optimistic
//! concurrency.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::client::AppwriteClient;
use crate::models::{DocumentList, Post, PostFields, PostStatus};
use crate::query::Query;
use crate::types::AppResult;

pub struct PostService {
    client: Arc<AppwriteClient>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateDocumentBody<'a> {
    document_id: &'a str,
    data: CreatePostData<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePostData<'a> {
    #[serde(flatten)]
    fields: &'a PostFields,
    user_id: &'a str,
}

#[derive(Serialize)]
struct UpdateDocumentBody<'a> {
    data: &'a PostFields,
}

impl PostService {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }

    fn documents_path(&self) -> String {
        let config = self.client.config();
        format!(
            "/databases/{}/collections/{}/documents",
            config.database_id, config.collection_id
        )
    }

    fn document_path(&self, slug: &str) -> String {
        format!("{}/{}", self.documents_path(), slug)
    }

    /// Creates a post document keyed by `slug`, owned by `user_id`.
    pub async fn create_post(
        &self,
        slug: &str,
        user_id: &str,
        fields: &PostFields,
    ) -> AppResult<Post> {
        let body = CreateDocumentBody {
            document_id: slug,
            data: CreatePostData { fields, user_id },
        };
        info!(%slug, "creating post");
        self.client
            .send_json(self.client.post(&self.documents_path()).json(&body))
            .await
    }

    /// Updates the document keyed by `slug`. The owning user id is never
    /// touched by updates.
    pub async fn update_post(&self, slug: &str, fields: &PostFields) -> AppResult<Post> {
        let body = UpdateDocumentBody { data: fields };
        info!(%slug, "updating post");
        self.client
            .send_json(self.client.patch(&self.document_path(slug)).json(&body))
            .await
    }

    /// Deletes the document keyed by `slug`. A missing document surfaces as
    /// `AppError::NotFound`.
    pub async fn delete_post(&self, slug: &str) -> AppResult<()> {
        info!(%slug, "deleting post");
        self.client
            .send_empty(self.client.delete(&self.document_path(slug)))
            .await
    }

    /// Fetches the document keyed by `slug`. A missing document surfaces as
    /// `AppError::NotFound`, distinguishable from transport failure.
    pub async fn get_post(&self, slug: &str) -> AppResult<Post> {
        debug!(%slug, "fetching post");
        self.client
            .send_json(self.client.get(&self.document_path(slug)))
            .await
    }

    /// Lists posts matching `queries`. With no queries given, only posts
    /// whose status is active are returned.
    pub async fn list_posts(&self, queries: Vec<Query>) -> AppResult<DocumentList<Post>> {
        let queries = if queries.is_empty() {
            vec![Query::equal("status", PostStatus::Active.as_str())]
        } else {
            queries
        };
        debug!(queries = queries.len(), "listing posts");
        let params: Vec<(&str, &str)> =
            queries.iter().map(|q| ("queries[]", q.as_str())).collect();
        self.client
            .send_json(self.client.get(&self.documents_path()).query(&params))
            .await
    }
}
