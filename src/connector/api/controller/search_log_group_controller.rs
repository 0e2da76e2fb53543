use anyhow::Result;
use tracing::debug;

use crate::{LogResourceKey, Outcome, PromptOptions, PromptOutcome};

use super::super::Container;

const CLOSE_COMMAND: &str = "q";

pub struct SearchLogGroupController<'a> {
    container: &'a Container,
}

impl<'a> SearchLogGroupController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn search(&self) -> Result<String> {
        let use_case = self.container.search_log_group_use_case();
        let mut session = use_case.execute().await?;

        let key = match (session.outcome(), session.key()) {
            (Outcome::Succeeded, Some(key)) => key.clone(),
            (outcome, _) => return Ok(format!("Log group search {}.", outcome.as_str().to_lowercase())),
        };

        self.follow(&key).await?;

        if let Some(listener) = session.take_listener() {
            listener.await?;
        }
        Ok(format!("Closed {}", key))
    }

    /// Loads further pages on demand until the user closes the document.
    async fn follow(&self, key: &LogResourceKey) -> Result<()> {
        let registry = self.container.registry();
        let viewer = self.container.viewer();
        let prompter = self.container.prompter();

        loop {
            let options = PromptOptions {
                title: "Load more events",
                placeholder: "Enter to continue, q to close",
            };
            let answer = prompter.input(options).await?;
            if matches!(&answer, PromptOutcome::Cancelled)
                || answer.completed().as_deref() == Some(CLOSE_COMMAND)
            {
                break;
            }

            let added = registry.update_log(key).await?;
            if added == 0 {
                println!("No more events.");
                continue;
            }
            debug!("Loaded {} more events", added);
            let text = registry.document_text(key).await?;
            viewer.update_document(key, &text).await?;
        }

        viewer.close_document(key).await?;
        Ok(())
    }
}
