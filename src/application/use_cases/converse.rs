use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::application::ChatApi;
use crate::domain::{Attachment, ChatMessage, ConversationThread, DomainError};

/// Response fields checked, in order, for the reply text.
const REPLY_FIELDS: [&str; 4] = ["response", "message", "text", "completion"];

const ERROR_LOG_ATTACHMENT: &str = "error.log";

/// Sends a prompt on the current branch of a thread and records the exchange.
pub struct ConverseUseCase {
    chat_api: Arc<dyn ChatApi>,
}

impl ConverseUseCase {
    pub fn new(chat_api: Arc<dyn ChatApi>) -> Self {
        Self { chat_api }
    }

    /// On success both the prompt and the reply are appended to the current
    /// branch. On failure the thread is left untouched.
    pub async fn execute(
        &self,
        thread: &mut ConversationThread,
        prompt: &str,
        error_log: &str,
    ) -> Result<String, DomainError> {
        info!(
            "Sending prompt on thread {} branch {}",
            thread.id(),
            thread.current_branch_id()
        );

        let response = self.chat_api.send_message(prompt, error_log).await?;
        let reply = extract_reply(&response);
        debug!("Received reply of {} bytes", reply.len());

        let mut question = ChatMessage::human(prompt);
        if !error_log.is_empty() {
            question = question.with_attachment(Attachment::new(ERROR_LOG_ATTACHMENT, error_log));
        }
        thread.push_message(question);
        thread.push_message(ChatMessage::assistant(reply.clone()));

        Ok(reply)
    }
}

/// Pulls the reply text out of an endpoint response.
///
/// A bare JSON string is used as-is; otherwise the first string field among
/// `response`, `message`, `text` and `completion`; otherwise the JSON text.
pub fn extract_reply(response: &Value) -> String {
    if let Value::String(text) = response {
        return text.clone();
    }

    REPLY_FIELDS
        .iter()
        .find_map(|field| response.get(field).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| response.to_string())
}
