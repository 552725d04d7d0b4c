use std::time::Duration;

use serde::Deserialize;

use crate::error::DocstoreError;
use crate::Result;

/// Bound on every request; the store is remote and callers must never hang.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A stored document: server-assigned id plus opaque JSON fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    documents: Vec<Document>,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// REST client for the document store.
///
/// Documents live under
/// `{base_url}/v1/projects/{project_id}/collections/{collection}/documents`.
/// Ids are assigned by the service on create; clients never generate them.
#[derive(Debug, Clone)]
pub struct DocstoreClient {
    http: reqwest::Client,
    base_url: String,
    project_id: String,
    api_key: Option<String>,
}

impl DocstoreClient {
    pub fn new(base_url: impl Into<String>, project_id: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            api_key: None,
        })
    }

    /// Builder: attach the project API key, sent as a `key` query parameter.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// List documents in `collection`, optionally narrowed by
    /// field-equality filters (`field == value`).
    pub async fn list_documents(
        &self,
        collection: &str,
        filters: &[(&str, String)],
    ) -> Result<Vec<Document>> {
        let mut req = self.http.get(self.collection_url(collection));
        for (field, value) in filters {
            req = req.query(&[(*field, value.as_str())]);
        }
        let resp = self.send(req).await?;
        let body: ListResponse = resp.json().await?;
        tracing::debug!(collection, count = body.documents.len(), "listed documents");
        Ok(body.documents)
    }

    /// Create a document; returns the server-assigned id.
    pub async fn create_document(
        &self,
        collection: &str,
        fields: &serde_json::Value,
    ) -> Result<String> {
        let req = self
            .http
            .post(self.collection_url(collection))
            .json(&serde_json::json!({ "fields": fields }));
        let resp = self.send(req).await?;
        let body: CreateResponse = resp.json().await?;
        tracing::debug!(collection, id = %body.id, "created document");
        Ok(body.id)
    }

    /// Merge `fields` into an existing document. Absent fields are untouched.
    pub async fn patch_document(
        &self,
        collection: &str,
        id: &str,
        fields: &serde_json::Value,
    ) -> Result<()> {
        let req = self
            .http
            .patch(self.document_url(collection, id))
            .json(&serde_json::json!({ "fields": fields }));
        self.send(req).await?;
        tracing::debug!(collection, id, "patched document");
        Ok(())
    }

    /// Delete a document. Deleting an id that is already gone succeeds, so
    /// retrying a delete is always safe.
    pub async fn delete_document(&self, collection: &str, id: &str) -> Result<()> {
        let req = self.http.delete(self.document_url(collection, id));
        match self.send(req).await {
            Ok(_) => Ok(()),
            Err(DocstoreError::Api { status: 404, .. }) => {
                tracing::debug!(collection, id, "delete of missing document, treating as success");
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn collection_url(&self, collection: &str) -> String {
        format!(
            "{}/v1/projects/{}/collections/{}/documents",
            self.base_url, self.project_id, collection
        )
    }

    fn document_url(&self, collection: &str, id: &str) -> String {
        format!("{}/{}", self.collection_url(collection), id)
    }

    async fn send(&self, mut req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        if let Some(key) = &self.api_key {
            req = req.query(&[("key", key.as_str())]);
        }
        let resp = req.send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = match resp.json::<ApiErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        Err(DocstoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn client(server: &mockito::ServerGuard) -> DocstoreClient {
        DocstoreClient::new(server.url(), "test-project").unwrap()
    }

    #[tokio::test]
    async fn list_documents_decodes_ids_and_fields() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/v1/projects/test-project/collections/tasks/documents")
            .match_query(mockito::Matcher::UrlEncoded(
                "date".into(),
                "2024-06-01".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"documents":[{"id":"abc","fields":{"title":"Standup"}},{"id":"def","fields":{"title":"Review"}}]}"#,
            )
            .create_async()
            .await;

        let docs = client(&server)
            .list_documents("tasks", &[("date", "2024-06-01".to_string())])
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "abc");
        assert_eq!(docs[0].fields["title"], "Standup");
    }

    #[tokio::test]
    async fn list_documents_empty_body_is_empty_list() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/projects/test-project/collections/tasks/documents")
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let docs = client(&server).list_documents("tasks", &[]).await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn create_document_returns_assigned_id() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/projects/test-project/collections/tasks/documents")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"fields":{"title":"Standup"}}"#.to_string(),
            ))
            .with_status(201)
            .with_body(r#"{"id":"new-id-1"}"#)
            .create_async()
            .await;

        let id = client(&server)
            .create_document("tasks", &serde_json::json!({"title": "Standup"}))
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(id, "new-id-1");
    }

    #[tokio::test]
    async fn api_error_carries_status_and_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/projects/test-project/collections/tasks/documents")
            .with_status(403)
            .with_body(r#"{"error":{"message":"permission denied"}}"#)
            .create_async()
            .await;

        let err = client(&server)
            .create_document("tasks", &serde_json::json!({}))
            .await
            .unwrap_err();
        match err {
            DocstoreError::Api { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "permission denied");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_missing_document_is_not_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock(
                "DELETE",
                "/v1/projects/test-project/collections/tasks/documents/gone",
            )
            .with_status(404)
            .with_body(r#"{"error":{"message":"not found"}}"#)
            .create_async()
            .await;

        client(&server)
            .delete_document("tasks", "gone")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn api_key_is_sent_as_query_param() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/v1/projects/test-project/collections/tasks/documents")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "sekrit".into()))
            .with_status(200)
            .with_body(r#"{"documents":[]}"#)
            .create_async()
            .await;

        client(&server)
            .with_api_key("sekrit")
            .list_documents("tasks", &[])
            .await
            .unwrap();
        m.assert_async().await;
    }
}
