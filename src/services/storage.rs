//! File operations against the media bucket.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use tracing::info;
use uuid::Uuid;

use crate::client::AppwriteClient;
use crate::models::StoredFile;
use crate::types::AppResult;

pub struct StorageService {
    client: Arc<AppwriteClient>,
}

impl StorageService {
    pub fn new(client: Arc<AppwriteClient>) -> Self {
        Self { client }
    }

    fn files_path(&self) -> String {
        format!("/storage/buckets/{}/files", self.client.config().bucket_id)
    }

    /// Uploads `data` as a new file under a freshly generated id. The MIME
    /// type is guessed from the file name.
    pub async fn upload_file(&self, file_name: &str, data: Vec<u8>) -> AppResult<StoredFile> {
        let file_id = Uuid::new_v4().to_string();
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = Part::bytes(data)
            .file_name(file_name.to_string())
            .mime_str(mime.essence_str())?;
        let form = Form::new()
            .text("fileId", file_id.clone())
            .part("file", part);

        info!(%file_id, name = file_name, "uploading file");
        self.client
            .send_json(self.client.post(&self.files_path()).multipart(form))
            .await
    }

    /// Deletes the blob stored under `file_id`.
    pub async fn delete_file(&self, file_id: &str) -> AppResult<()> {
        info!(%file_id, "deleting file");
        self.client
            .send_empty(self.client.delete(&format!("{}/{}", self.files_path(), file_id)))
            .await
    }

    /// Builds the public preview URL for a stored file. Pure string
    /// construction; no request is made.
    pub fn file_preview_url(&self, file_id: &str) -> String {
        let config = self.client.config();
        format!(
            "{}/storage/buckets/{}/files/{}/preview?project={}",
            config.endpoint.trim_end_matches('/'),
            config.bucket_id,
            file_id,
            config.project_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_support::client_for;
    use mockito::Matcher;

    const FILES_PATH: &str = "/storage/buckets/media/files";

    #[tokio::test]
    async fn test_upload_file_sends_multipart_with_generated_id() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", FILES_PATH)
            .match_header(
                "content-type",
                Matcher::Regex("multipart/form-data.*".to_string()),
            )
            .match_body(Matcher::Regex(r#"name="fileId""#.to_string()))
            .with_status(201)
            .with_body(r#"{"$id":"f1","name":"cover.png","mimeType":"image/png","sizeOriginal":3}"#)
            .create_async()
            .await;

        let storage = StorageService::new(client_for(&server.url()));
        let file = storage.upload_file("cover.png", vec![1, 2, 3]).await.unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.mime_type, "image/png");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_uploaded_file_can_be_deleted_by_returned_id() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", FILES_PATH)
            .with_status(201)
            .with_body(r#"{"$id":"f1","name":"cover.png"}"#)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", format!("{FILES_PATH}/f1").as_str())
            .with_status(204)
            .create_async()
            .await;

        let storage = StorageService::new(client_for(&server.url()));
        let file = storage.upload_file("cover.png", vec![1, 2, 3]).await.unwrap();
        storage.delete_file(&file.id).await.unwrap();
        delete.assert_async().await;
    }

    #[tokio::test]
    async fn test_delete_missing_file_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("DELETE", format!("{FILES_PATH}/gone").as_str())
            .with_status(404)
            .with_body(r#"{"message":"The requested file could not be found.","code":404,"type":"storage_file_not_found"}"#)
            .create_async()
            .await;

        let storage = StorageService::new(client_for(&server.url()));
        let err = storage.delete_file("gone").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_preview_url_is_built_without_a_request() {
        // No mock server routes at all: the URL must come out of pure string
        // construction against the configured endpoint.
        let storage = StorageService::new(client_for("https://cloud.appwrite.io/v1"));
        assert_eq!(
            storage.file_preview_url("f1"),
            "https://cloud.appwrite.io/v1/storage/buckets/media/files/f1/preview?project=proj"
        );
    }
}
