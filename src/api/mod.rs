pub mod auth;
pub mod error;
pub mod keyring;

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::AppConfig;
pub use error::ApiError;

/// Authenticated client for the organizer backend. One instance is shared by
/// every store; cloning is cheap (reqwest's client is reference-counted).
/// No Debug: the bearer token must not end up in logs.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    pub(crate) fn collection_url(&self, path: &str) -> String {
        format!("{}/api/{}/", self.base_url, path)
    }

    pub(crate) fn item_url(&self, path: &str, id: u64) -> String {
        format!("{}/api/{}/{}/", self.base_url, path, id)
    }

    /// Attach the bearer token, when one is held, to an outgoing request.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET the full collection.
    pub async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let resp = self
            .authed(self.http.get(self.collection_url(path)))
            .send()
            .await?;
        read_json(resp).await
    }

    /// POST a new item; the response carries the server-assigned id.
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.post(self.collection_url(path)).json(body))
            .send()
            .await?;
        read_json(resp).await
    }

    /// PATCH a partial update onto an existing item.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        id: u64,
        patch: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.patch(self.item_url(path, id)).json(patch))
            .send()
            .await?;
        read_json(resp).await
    }

    /// PUT a full replacement of an existing item.
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        id: u64,
        body: &B,
    ) -> Result<T, ApiError> {
        let resp = self
            .authed(self.http.put(self.item_url(path, id)).json(body))
            .send()
            .await?;
        read_json(resp).await
    }

    /// DELETE by id. The response body is ignored; a 404 counts as deleted.
    pub async fn delete(&self, path: &str, id: u64) -> Result<(), ApiError> {
        let resp = self
            .authed(self.http.delete(self.item_url(path, id)))
            .send()
            .await?;
        match resp.status() {
            StatusCode::NO_CONTENT | StatusCode::OK | StatusCode::NOT_FOUND => Ok(()),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(ApiError::Status { status, body })
            }
        }
    }
}

/// Turn a response into a decoded value, capturing the body of failures.
async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(ApiError::Status { status, body });
    }
    let text = resp.text().await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}
