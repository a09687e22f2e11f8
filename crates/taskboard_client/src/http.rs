//! `TaskGateway` over HTTP, against a running taskboard gateway.

use crate::gateway::{GatewayError, GatewayResult, TaskGateway};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::json;
use taskboard_core::{Task, TaskId};

const TASKS_PATH: &str = "/api/tasks";

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Explicitly constructed HTTP client bound to one gateway base URL.
#[derive(Debug, Clone)]
pub struct HttpTaskGateway {
    client: Client,
    tasks_url: String,
}

impl HttpTaskGateway {
    /// Creates a gateway client for `base_url` (for example `http://127.0.0.1:3000`).
    pub fn new(base_url: &str) -> GatewayResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> GatewayResult<Self> {
        let base = base_url.trim().trim_end_matches('/');
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(GatewayError::InvalidUrl(base_url.to_string()));
        }
        Ok(Self {
            client,
            tasks_url: format!("{base}{TASKS_PATH}"),
        })
    }

    pub fn tasks_url(&self) -> &str {
        &self.tasks_url
    }

    async fn send(
        &self,
        method: Method,
        body: Option<serde_json::Value>,
    ) -> GatewayResult<Response> {
        let request = self.client.request(method, &self.tasks_url);
        let request = match body {
            Some(body) => request.json(&body),
            None => request,
        };
        Ok(request.send().await?)
    }
}

#[async_trait]
impl TaskGateway for HttpTaskGateway {
    async fn list(&self) -> GatewayResult<Vec<Task>> {
        decode(self.send(Method::GET, None).await?).await
    }

    async fn create(&self, title: &str) -> GatewayResult<Task> {
        let body = json!({ "title": title });
        decode(self.send(Method::POST, Some(body)).await?).await
    }

    async fn set_completed(&self, id: TaskId, completed: bool) -> GatewayResult<()> {
        let body = json!({ "id": id, "completed": completed });
        decode::<IgnoredAny>(self.send(Method::PUT, Some(body)).await?).await?;
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> GatewayResult<()> {
        let body = json!({ "id": id });
        decode::<IgnoredAny>(self.send(Method::DELETE, Some(body)).await?).await?;
        Ok(())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> GatewayResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let text = response.text().await?;
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);
    Err(GatewayError::Api {
        status: status.as_u16(),
        message,
    })
}
