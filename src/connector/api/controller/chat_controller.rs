use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::{ConversationThread, ModelIdentifier};

use super::super::Container;

pub struct ChatController<'a> {
    container: &'a Container,
}

impl<'a> ChatController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub async fn chat(
        &self,
        prompt: String,
        error_log: Option<PathBuf>,
        model: Option<String>,
    ) -> Result<String> {
        let model = match model.as_deref() {
            Some(id) => ModelIdentifier::from_id(id)
                .ok_or_else(|| anyhow!("Unknown model '{}'. Run `logchat models` to list them.", id))?,
            None => ModelIdentifier::default(),
        };

        let error_log = match error_log {
            Some(path) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read error log {}", path.display()))?,
            None => String::new(),
        };

        let mut thread = ConversationThread::new("cli", "Command line");
        thread.current_branch_mut().set_model(model);

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")?,
        );
        spinner.set_message(format!("Waiting for {}...", model.display_name()));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let use_case = self.container.converse_use_case();
        let reply = use_case.execute(&mut thread, &prompt, &error_log).await;
        spinner.finish_and_clear();

        Ok(format!("[{}]\n{}", model.display_name(), reply?))
    }
}
