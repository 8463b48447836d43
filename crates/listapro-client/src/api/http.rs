//! reqwest-backed `TaskApi`
//!
//! Works natively and in the browser (reqwest uses `fetch` on wasm32).

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::TaskApi;
use crate::config::ApiConfig;
use crate::domain::{ListId, Task, TaskId, TaskList, TaskPatch};
use crate::error::{ApiError, ApiResult};

// Create and rename bodies use lowercase keys, unlike the entities.
#[derive(Serialize)]
struct NameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct TextBody<'a> {
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: Client,
    config: ApiConfig,
}

impl HttpTaskApi {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    pub fn with_client(client: Client, config: ApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    async fn send(request: RequestBuilder) -> ApiResult<Response> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), %body, "request rejected");
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> ApiResult<T> {
        let response = Self::send(request).await?;
        let body = response.text().await.map_err(ApiError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_empty(request: RequestBuilder) -> ApiResult<()> {
        Self::send(request).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl TaskApi for HttpTaskApi {
    async fn fetch_lists(&self) -> ApiResult<Vec<TaskList>> {
        Self::send_json(self.client.get(self.url("/lists"))).await
    }

    async fn create_list(&self, name: &str) -> ApiResult<TaskList> {
        Self::send_json(self.client.post(self.url("/lists")).json(&NameBody { name })).await
    }

    async fn update_list(&self, id: ListId, name: &str) -> ApiResult<TaskList> {
        let url = self.url(&format!("/lists/{}", id));
        Self::send_json(self.client.put(url).json(&NameBody { name })).await
    }

    async fn delete_list(&self, id: ListId) -> ApiResult<()> {
        Self::send_empty(self.client.delete(self.url(&format!("/lists/{}", id)))).await
    }

    async fn fetch_tasks_by_list(&self, list_id: ListId) -> ApiResult<Vec<Task>> {
        Self::send_json(self.client.get(self.url(&format!("/lists/{}/tasks", list_id)))).await
    }

    async fn create_task(&self, list_id: ListId, text: &str) -> ApiResult<Task> {
        let url = self.url(&format!("/lists/{}/tasks", list_id));
        Self::send_json(self.client.post(url).json(&TextBody { text })).await
    }

    async fn update_task(&self, id: TaskId, patch: &TaskPatch) -> ApiResult<Task> {
        Self::send_json(self.client.put(self.url(&format!("/tasks/{}", id))).json(patch)).await
    }

    async fn delete_task(&self, id: TaskId) -> ApiResult<()> {
        Self::send_empty(self.client.delete(self.url(&format!("/tasks/{}", id)))).await
    }
}
