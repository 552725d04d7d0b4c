use async_trait::async_trait;
use chrono::NaiveDate;
use docstore_client::{DocstoreClient, DocstoreError};

use crate::error::{PlannerError, Result};
use crate::gateway::{NewTask, TaskGateway, TaskPatch};
use crate::task::Task;

/// Collection the planner's task documents live in.
pub const DEFAULT_COLLECTION: &str = "tasks";

impl From<DocstoreError> for PlannerError {
    fn from(err: DocstoreError) -> Self {
        PlannerError::Gateway(err.to_string())
    }
}

/// [`TaskGateway`] over the remote document store.
///
/// Task fields map one-to-one onto document fields (camelCase, dates as
/// `YYYY-MM-DD`); the document id is the task id. Date scoping uses the
/// store's field-equality filter, so a fetch only ever transfers one day.
pub struct RemoteGateway {
    client: DocstoreClient,
    collection: String,
}

impl RemoteGateway {
    pub fn new(client: DocstoreClient) -> Self {
        RemoteGateway {
            client,
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    pub fn with_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = collection.into();
        self
    }
}

#[async_trait]
impl TaskGateway for RemoteGateway {
    async fn fetch_by_date(&self, date: NaiveDate) -> Result<Vec<Task>> {
        let docs = self
            .client
            .list_documents(&self.collection, &[("date", date.to_string())])
            .await?;

        let mut tasks = Vec::with_capacity(docs.len());
        for doc in docs {
            match serde_json::from_value::<NewTask>(doc.fields) {
                Ok(fields) => tasks.push(fields.into_task(doc.id)),
                Err(err) => {
                    // A corrupt document must not take down the whole day view.
                    tracing::warn!(id = %doc.id, %err, "skipping undecodable task document");
                }
            }
        }
        Ok(tasks)
    }

    async fn create(&self, new: NewTask) -> Result<String> {
        let fields = serde_json::to_value(&new)?;
        Ok(self.client.create_document(&self.collection, &fields).await?)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<()> {
        let fields = serde_json::to_value(&patch)?;
        self.client
            .patch_document(&self.collection, id, &fields)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.client.delete_document(&self.collection, id).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::UNASSIGNED;
    use crate::task::Priority;
    use chrono::Utc;

    fn gateway(server: &mockito::ServerGuard) -> RemoteGateway {
        RemoteGateway::new(DocstoreClient::new(server.url(), "planner").unwrap())
    }

    #[tokio::test]
    async fn fetch_decodes_documents_and_skips_corrupt_ones() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/projects/planner/collections/tasks/documents")
            .match_query(mockito::Matcher::UrlEncoded(
                "date".into(),
                "2024-06-01".into(),
            ))
            .with_status(200)
            .with_body(
                r#"{"documents":[
                    {"id":"good","fields":{
                        "title":"Standup","completed":false,"priority":"medium",
                        "assignee":"Unassigned","createdAt":"2024-06-01T08:00:00Z",
                        "timeSlot":"9:00 AM - 10:00 AM","date":"2024-06-01"}},
                    {"id":"bad","fields":{"title":"No other fields"}}
                ]}"#,
            )
            .create_async()
            .await;

        let tasks = gateway(&server)
            .fetch_by_date("2024-06-01".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "good");
        assert_eq!(tasks[0].time_slot, "9:00 AM - 10:00 AM");
    }

    #[tokio::test]
    async fn create_sends_camel_case_fields() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("POST", "/v1/projects/planner/collections/tasks/documents")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"fields":{"title":"Standup","timeSlot":"9:00 AM - 10:00 AM","date":"2024-06-01"}}"#
                    .to_string(),
            ))
            .with_status(201)
            .with_body(r#"{"id":"doc-1"}"#)
            .create_async()
            .await;

        let id = gateway(&server)
            .create(NewTask {
                title: "Standup".into(),
                completed: false,
                priority: Priority::Medium,
                assignee: UNASSIGNED.into(),
                created_at: Utc::now(),
                time_slot: "9:00 AM - 10:00 AM".into(),
                date: "2024-06-01".parse().unwrap(),
            })
            .await
            .unwrap();
        m.assert_async().await;
        assert_eq!(id, "doc-1");
    }

    #[tokio::test]
    async fn update_patches_only_set_fields() {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock(
                "PATCH",
                "/v1/projects/planner/collections/tasks/documents/doc-1",
            )
            .match_body(mockito::Matcher::JsonString(
                r#"{"fields":{"completed":true}}"#.to_string(),
            ))
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        gateway(&server)
            .update("doc-1", TaskPatch::completed(true))
            .await
            .unwrap();
        m.assert_async().await;
    }

    #[tokio::test]
    async fn gateway_failures_surface_as_gateway_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/projects/planner/collections/tasks/documents")
            .match_query(mockito::Matcher::Any)
            .with_status(503)
            .with_body(r#"{"error":{"message":"backend unavailable"}}"#)
            .create_async()
            .await;

        let err = gateway(&server)
            .fetch_by_date("2024-06-01".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Gateway(_)));
        assert!(err.to_string().contains("backend unavailable"));
    }
}
