use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{ChatController, ModelsController, SearchLogGroupController};

pub struct Router<'a> {
    chat_controller: ChatController<'a>,
    models_controller: ModelsController,
    search_log_group_controller: SearchLogGroupController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            chat_controller: ChatController::new(container),
            models_controller: ModelsController::new(),
            search_log_group_controller: SearchLogGroupController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Chat {
                prompt,
                error_log,
                model,
            } => self.chat_controller.chat(prompt, error_log, model).await,
            Commands::Models => self.models_controller.list().await,
            Commands::SearchLogGroup => self.search_log_group_controller.search().await,
        }
    }
}
