pub mod chat_controller;
pub mod models_controller;
pub mod search_log_group_controller;

pub use chat_controller::ChatController;
pub use models_controller::ModelsController;
pub use search_log_group_controller::SearchLogGroupController;
