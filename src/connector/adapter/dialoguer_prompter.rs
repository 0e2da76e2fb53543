use async_trait::async_trait;
use dialoguer::{FuzzySelect, Input};
use tracing::debug;

use crate::application::{PromptOptions, PromptOutcome, Prompter};
use crate::domain::DomainError;

/// [`Prompter`] on the controlling terminal.
///
/// Selection is a fuzzy list where Esc cancels. Text input cancels on an
/// interrupted read. An empty selection list falls back to free text.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }

    async fn read_line(title: String) -> Result<PromptOutcome<String>, DomainError> {
        tokio::task::spawn_blocking(move || -> Result<PromptOutcome<String>, DomainError> {
            match Input::<String>::new()
                .with_prompt(title)
                .allow_empty(true)
                .interact_text()
            {
                Ok(text) => Ok(PromptOutcome::Completed(text)),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => Ok(PromptOutcome::Cancelled),
                Err(e) => Err(DomainError::prompt(format!("Failed to read input: {}", e))),
            }
        })
        .await
        .map_err(|e| DomainError::internal(format!("Prompt task failed: {}", e)))?
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        Self::new()
    }
}

fn prompt_label(options: PromptOptions<'_>) -> String {
    format!("{} ({})", options.title, options.placeholder)
}

#[async_trait]
impl Prompter for DialoguerPrompter {
    async fn select(
        &self,
        options: PromptOptions<'_>,
        items: &[String],
    ) -> Result<PromptOutcome<String>, DomainError> {
        if items.is_empty() {
            debug!("No items to select from, asking for free text");
            return Self::read_line(prompt_label(options)).await;
        }

        let title = options.title.to_string();
        let items = items.to_vec();
        tokio::task::spawn_blocking(move || -> Result<PromptOutcome<String>, DomainError> {
            let chosen = FuzzySelect::new()
                .with_prompt(title)
                .items(&items)
                .default(0)
                .interact_opt()
                .map_err(|e| DomainError::prompt(format!("Failed to read selection: {}", e)))?;

            Ok(match chosen {
                Some(index) => PromptOutcome::Completed(items[index].clone()),
                None => PromptOutcome::Cancelled,
            })
        })
        .await
        .map_err(|e| DomainError::internal(format!("Prompt task failed: {}", e)))?
    }

    async fn input(&self, options: PromptOptions<'_>) -> Result<PromptOutcome<String>, DomainError> {
        Self::read_line(prompt_label(options)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_label_includes_placeholder() {
        let label = prompt_label(PromptOptions {
            title: "Keyword Search",
            placeholder: "Enter text here",
        });
        assert_eq!(label, "Keyword Search (Enter text here)");
    }
}
