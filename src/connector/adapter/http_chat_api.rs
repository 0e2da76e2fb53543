use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::ChatApi;
use crate::domain::DomainError;

/// Default target: a chat endpoint on the local machine.
pub const DEFAULT_CHAT_URL: &str = "http://localhost:8080/chat";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest<'a> {
    prompt: &'a str,
    error_log: &'a str,
}

/// [`ChatApi`] over HTTP: one JSON `POST` per message.
///
/// When a token is configured it is sent as a bearer credential on every
/// request. No retries and no timeout are applied here; pass a configured
/// `reqwest::Client` via [`HttpChatApi::with_client`] to add one.
///
/// ```text
/// LOGCHAT_CHAT_URL=https://chat.example.com/v1/chat
/// LOGCHAT_CHAT_TOKEN=...
/// ```
pub struct HttpChatApi {
    client: reqwest::Client,
    url: String,
    token: Option<String>,
}

impl HttpChatApi {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// | Variable             | Default                       |
    /// |----------------------|-------------------------------|
    /// | `LOGCHAT_CHAT_URL`   | `http://localhost:8080/chat`  |
    /// | `LOGCHAT_CHAT_TOKEN` | none (unauthenticated)        |
    pub fn from_env() -> Self {
        let url = std::env::var("LOGCHAT_CHAT_URL").unwrap_or_else(|_| DEFAULT_CHAT_URL.to_string());
        let api = Self::new(url);
        match std::env::var("LOGCHAT_CHAT_TOKEN") {
            Ok(token) if !token.is_empty() => api.with_token(token),
            _ => api,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn send_message(&self, prompt: &str, error_log: &str) -> Result<Value, DomainError> {
        let body = ChatRequest { prompt, error_log };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        debug!("POST {} ({} byte prompt)", self.url, prompt.len());
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("HttpChatApi: request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            warn!("HttpChatApi: endpoint returned {status}");
            return Err(DomainError::RequestFailed(status.as_u16()));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| DomainError::transport(format!("HttpChatApi: failed to parse response: {e}")))
    }
}
