// Records exchanged with the Appwrite backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account record behind the current session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    #[serde(rename = "$id")]
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub status: bool,
}

/// Session record issued at login. Held remotely; the client keeps no durable
/// copy beyond the cookie jar inside the shared HTTP client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Session {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub expire: String,
}

/// Publication state of a post. The default listing filter only admits
/// active posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Active,
    Inactive,
}

impl PostStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Active => "active",
            PostStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for PostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A blog post document. The Appwrite document id is the post slug, so the
/// slug must be unique within the collection (enforced remotely).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "$id")]
    pub slug: String,
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub status: PostStatus,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied post fields for create and update. The owning user id is
/// passed separately on create and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub featured_image: String,
    pub status: PostStatus,
    pub created_at: DateTime<Utc>,
}

/// One page of documents from a list call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocumentList<T> {
    pub total: u64,
    pub documents: Vec<T>,
}

/// File record returned by the storage bucket.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub size_original: u64,
}
