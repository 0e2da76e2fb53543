use async_trait::async_trait;

use crate::domain::DomainError;

/// Sends a prompt plus diagnostic text to a remote chat endpoint.
///
/// Implementors own transport and authentication. The response body is
/// returned as parsed JSON without interpretation.
#[async_trait]
pub trait ChatApi: Send + Sync {
    async fn send_message(
        &self,
        prompt: &str,
        error_log: &str,
    ) -> Result<serde_json::Value, DomainError>;
}
