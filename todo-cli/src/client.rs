//! HTTP client for the todo API
//!
//! Thin typed wrapper over reqwest. Non-2xx responses become errors carrying
//! the status and the server's `message` field when the body has one.

use anyhow::{anyhow, Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use todo_core::{ItemPayload, ListPayload, TodoItem, TodoList};

/// Error body returned by the server
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    message: Option<String>,
}

pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn get_lists(&self) -> Result<Vec<TodoList>> {
        let response = self.send(self.http.get(self.url("/lists"))).await?;
        handle_response(response).await
    }

    pub async fn get_list(&self, list_id: &str) -> Result<TodoList> {
        let response = self
            .send(self.http.get(self.url(&format!("/lists/{}", list_id))))
            .await?;
        handle_response(response).await
    }

    pub async fn create_list(&self, payload: &ListPayload) -> Result<TodoList> {
        let response = self
            .send(self.http.post(self.url("/lists")).json(payload))
            .await?;
        handle_response(response).await
    }

    pub async fn delete_list(&self, list_id: &str) -> Result<()> {
        let response = self
            .send(self.http.delete(self.url(&format!("/lists/{}", list_id))))
            .await?;
        handle_empty(response).await
    }

    pub async fn get_items(&self, list_id: &str) -> Result<Vec<TodoItem>> {
        let response = self
            .send(self.http.get(self.url(&format!("/lists/{}/items", list_id))))
            .await?;
        handle_response(response).await
    }

    pub async fn create_item(&self, list_id: &str, payload: &ItemPayload) -> Result<TodoItem> {
        let response = self
            .send(
                self.http
                    .post(self.url(&format!("/lists/{}/items", list_id)))
                    .json(payload),
            )
            .await?;
        handle_response(response).await
    }

    pub async fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        payload: &ItemPayload,
    ) -> Result<TodoItem> {
        let response = self
            .send(
                self.http
                    .put(self.url(&format!("/lists/{}/items/{}", list_id, item_id)))
                    .json(payload),
            )
            .await?;
        handle_response(response).await
    }

    pub async fn delete_item(&self, list_id: &str, item_id: &str) -> Result<()> {
        let response = self
            .send(
                self.http
                    .delete(self.url(&format!("/lists/{}/items/{}", list_id, item_id))),
            )
            .await?;
        handle_empty(response).await
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response> {
        request
            .send()
            .await
            .with_context(|| format!("Failed to reach todo API at {}", self.base_url))
    }
}

async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();

    if status.is_success() {
        response.json::<T>().await.context("Failed to parse response")
    } else {
        Err(error_from(status, response).await)
    }
}

async fn handle_empty(response: Response) -> Result<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        Err(error_from(status, response).await)
    }
}

async fn error_from(status: StatusCode, response: Response) -> anyhow::Error {
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    match serde_json::from_str::<ErrorResponse>(&error_text) {
        Ok(ErrorResponse {
            message: Some(message),
            ..
        }) => anyhow!("{}: {}", status, message),
        Ok(ErrorResponse { error, .. }) => anyhow!("{}: {}", status, error),
        Err(_) => anyhow!("{}: {}", status, error_text),
    }
}
