use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{
    ChatApi, Configuration, ConverseUseCase, DocumentViewer, LogGroupSource, LogRegistry,
    Prompter, SearchLogGroupUseCase, TelemetrySink,
};
use crate::connector::adapter::{
    ConsoleNotifier, DialoguerPrompter, HttpChatApi, InMemoryLogRegistry, LocalLogSource,
    TerminalViewer, TracingTelemetry,
};

/// Region used when neither `--region` nor `LOGCHAT_REGION` is set.
pub const DEFAULT_REGION: &str = "us-west-2";
const CONFIG_FILE: &str = "config.json";
const LOGS_DIR: &str = "logs";

pub struct ContainerConfig {
    pub data_dir: String,
    pub region: Option<String>,
    /// Directory of `*.log` files; defaults to `<data_dir>/logs`.
    pub logs_dir: Option<String>,
    /// Overrides `LOGCHAT_CHAT_URL`.
    pub chat_url: Option<String>,
}

impl ContainerConfig {
    fn resolved_region(&self) -> String {
        self.region
            .clone()
            .or_else(|| std::env::var("LOGCHAT_REGION").ok())
            .unwrap_or_else(|| DEFAULT_REGION.to_string())
    }

    fn resolved_logs_dir(&self) -> PathBuf {
        self.logs_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(&self.data_dir).join(LOGS_DIR))
    }
}

pub struct Container {
    chat_api: Arc<dyn ChatApi>,
    log_source: Arc<dyn LogGroupSource>,
    registry: Arc<dyn LogRegistry>,
    viewer: Arc<dyn DocumentViewer>,
    prompter: Arc<dyn Prompter>,
    telemetry: Arc<dyn TelemetrySink>,
    region: String,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Result<Self> {
        let settings_path = PathBuf::from(&config.data_dir).join(CONFIG_FILE);
        let settings = Configuration::load(&settings_path)?;

        let mut chat = HttpChatApi::from_env();
        if let Some(url) = config.chat_url.as_deref() {
            chat = chat.with_url(url);
        }
        debug!("Chat endpoint: {}", chat.url());

        let logs_dir = config.resolved_logs_dir();
        debug!("Reading log groups from {}", logs_dir.display());
        let log_source: Arc<dyn LogGroupSource> = Arc::new(LocalLogSource::new(logs_dir));
        let registry = Arc::new(InMemoryLogRegistry::new(log_source.clone(), settings));

        Ok(Self {
            chat_api: Arc::new(chat),
            log_source,
            registry,
            viewer: Arc::new(TerminalViewer::new()),
            prompter: Arc::new(DialoguerPrompter::new()),
            telemetry: Arc::new(TracingTelemetry),
            region: config.resolved_region(),
            config,
        })
    }

    pub fn converse_use_case(&self) -> ConverseUseCase {
        ConverseUseCase::new(self.chat_api.clone())
    }

    pub fn search_log_group_use_case(&self) -> SearchLogGroupUseCase {
        SearchLogGroupUseCase::new(
            self.log_source.clone(),
            self.prompter.clone(),
            self.registry.clone(),
            self.viewer.clone(),
            Arc::new(ConsoleNotifier),
            self.telemetry.clone(),
            self.region.clone(),
        )
    }

    pub fn registry(&self) -> Arc<dyn LogRegistry> {
        self.registry.clone()
    }

    pub fn viewer(&self) -> Arc<dyn DocumentViewer> {
        self.viewer.clone()
    }

    pub fn prompter(&self) -> Arc<dyn Prompter> {
        self.prompter.clone()
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn data_dir(&self) -> &str {
        &self.config.data_dir
    }
}
