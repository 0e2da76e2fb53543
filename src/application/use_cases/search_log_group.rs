use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::application::use_cases::{FormAnswers, FormResponse, ListLogGroupsUseCase, Wizard};
use crate::application::{
    DocumentEvent, DocumentViewer, LogGroupSource, LogRegistry, Notifier, PromptOptions,
    PromptOutcome, Prompter, TelemetrySink,
};
use crate::domain::{
    DomainError, LogResourceKey, LogStreamData, Outcome, SearchLogGroupResponse, SearchRequest,
    DEFAULT_SEARCH_LIMIT,
};

/// Registry setting holding the default result limit.
pub const LIMIT_SETTING: &str = "limit";

const LOG_GROUP_FIELD: &str = "logGroup";
const FILTER_PATTERN_FIELD: &str = "filterPattern";

impl FormResponse for SearchLogGroupResponse {
    fn from_answers(mut answers: FormAnswers) -> Result<Self, DomainError> {
        Ok(Self {
            log_group: answers.take(LOG_GROUP_FIELD)?,
            filter_pattern: answers.take(FILTER_PATTERN_FIELD)?,
        })
    }
}

/// Two steps: pick a log group from `log_groups`, then enter a filter pattern.
pub fn search_log_group_wizard<'a>(
    prompter: &'a dyn Prompter,
    log_groups: &'a [String],
) -> Wizard<'a, SearchLogGroupResponse> {
    Wizard::new()
        .step(LOG_GROUP_FIELD, move |_| {
            async move {
                let options = PromptOptions {
                    title: "Select Log Group",
                    placeholder: "Enter text here",
                };
                prompter.select(options, log_groups).await
            }
            .boxed()
        })
        .step(FILTER_PATTERN_FIELD, move |_| {
            async move {
                let options = PromptOptions {
                    title: "Keyword Search",
                    placeholder: "Enter text here",
                };
                prompter.input(options).await
            }
            .boxed()
        })
}

/// What one run of the search command left behind.
#[derive(Debug)]
pub struct SearchSession {
    outcome: Outcome,
    key: Option<LogResourceKey>,
    listener: Option<JoinHandle<()>>,
}

impl SearchSession {
    fn ended(outcome: Outcome) -> Self {
        Self {
            outcome,
            key: None,
            listener: None,
        }
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Key of the opened document on success.
    pub fn key(&self) -> Option<&LogResourceKey> {
        self.key.as_ref()
    }

    /// The highlight listener. It finishes once the document is closed.
    pub fn take_listener(&mut self) -> Option<JoinHandle<()>> {
        self.listener.take()
    }
}

/// The `search-log-group` command: list groups, run the wizard, register the
/// query, open it and keep its highlighting current.
pub struct SearchLogGroupUseCase {
    source: Arc<dyn LogGroupSource>,
    prompter: Arc<dyn Prompter>,
    registry: Arc<dyn LogRegistry>,
    viewer: Arc<dyn DocumentViewer>,
    notifier: Arc<dyn Notifier>,
    telemetry: Arc<dyn TelemetrySink>,
    region: String,
}

impl SearchLogGroupUseCase {
    pub fn new(
        source: Arc<dyn LogGroupSource>,
        prompter: Arc<dyn Prompter>,
        registry: Arc<dyn LogRegistry>,
        viewer: Arc<dyn DocumentViewer>,
        notifier: Arc<dyn Notifier>,
        telemetry: Arc<dyn TelemetrySink>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            source,
            prompter,
            registry,
            viewer,
            notifier,
            telemetry,
            region: region.into(),
        }
    }

    /// Emits exactly one telemetry event. Listing or prompt failures are
    /// returned as errors; failures while opening the results are reported to
    /// the user and end in [`Outcome::Failed`].
    pub async fn execute(&self) -> Result<SearchSession, DomainError> {
        let response = match self.collect_response().await {
            Ok(PromptOutcome::Completed(response)) => response,
            Ok(PromptOutcome::Cancelled) => {
                debug!("cwl: User Cancelled Search");
                self.telemetry.record_open_stream(Outcome::Cancelled);
                return Ok(SearchSession::ended(Outcome::Cancelled));
            }
            Err(e) => {
                self.telemetry.record_open_stream(Outcome::Failed);
                return Err(e);
            }
        };

        let limit = match self
            .registry
            .configuration()
            .get(LIMIT_SETTING, DEFAULT_SEARCH_LIMIT)
        {
            0 => {
                warn!(
                    "Setting '{}' must be positive, using {}",
                    LIMIT_SETTING, DEFAULT_SEARCH_LIMIT
                );
                DEFAULT_SEARCH_LIMIT
            }
            limit => limit,
        };
        let request = SearchRequest::from_response(response, &self.region).with_limit(limit);
        let key = request.resource_key();

        let session = match self.open_results(&request, &key).await {
            Ok(listener) => {
                info!("Opened log group {} as {}", request.log_group_name(), key);
                SearchSession {
                    outcome: Outcome::Succeeded,
                    key: Some(key),
                    listener: Some(listener),
                }
            }
            Err(e) if e.is_user_cancelled() => {
                debug!("cwl: User Cancelled Search");
                SearchSession::ended(Outcome::Cancelled)
            }
            Err(e) => {
                warn!("Failed to open log group {}: {}", request.log_group_name(), e);
                self.notifier.show_error(&format!(
                    "Error retrieving logs for Log Group {} : {}",
                    request.log_group_name(),
                    e
                ));
                SearchSession::ended(Outcome::Failed)
            }
        };

        self.telemetry.record_open_stream(session.outcome);
        Ok(session)
    }

    async fn collect_response(&self) -> Result<PromptOutcome<SearchLogGroupResponse>, DomainError> {
        let log_groups = ListLogGroupsUseCase::new(self.source.clone()).execute().await?;
        let wizard = search_log_group_wizard(self.prompter.as_ref(), &log_groups);
        let outcome = wizard.run().await;
        outcome
    }

    async fn open_results(
        &self,
        request: &SearchRequest,
        key: &LogResourceKey,
    ) -> Result<JoinHandle<()>, DomainError> {
        let initial = LogStreamData::new(request.group_info(), request.parameters());
        self.registry.register_log(key, initial).await?;

        match self.show_document(key).await {
            Ok(events) => Ok(spawn_highlight_listener(
                self.registry.clone(),
                self.viewer.clone(),
                events,
                key.clone(),
            )),
            Err(e) => {
                debug!("Releasing {} after failed open", key);
                self.registry.deregister(key).await;
                Err(e)
            }
        }
    }

    async fn show_document(
        &self,
        key: &LogResourceKey,
    ) -> Result<broadcast::Receiver<DocumentEvent>, DomainError> {
        let text = self.registry.document_text(key).await?;
        let events = self.viewer.subscribe();
        let view = self.viewer.open_document(key, &text).await?;
        self.registry.set_view(key, view).await?;
        self.registry.highlight(key).await?;
        Ok(events)
    }
}

/// Re-highlights `key` on each of its `Changed` events. Events for other
/// documents are ignored. Ends, deregistering `key`, when the document closes.
/// After missed events the viewer is asked whether the document is still open.
pub fn spawn_highlight_listener(
    registry: Arc<dyn LogRegistry>,
    viewer: Arc<dyn DocumentViewer>,
    mut events: broadcast::Receiver<DocumentEvent>,
    key: LogResourceKey,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = match events.recv().await {
                Ok(event) => event,
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Missed {} document events for {}", skipped, key);
                    if !viewer.is_open(&key).await {
                        debug!("Document closed while lagging, releasing {}", key);
                        registry.deregister(&key).await;
                        break;
                    }
                    rehighlight(registry.as_ref(), &key).await;
                    continue;
                }
                Err(RecvError::Closed) => break,
            };

            if event.key() != &key {
                continue;
            }
            match event {
                DocumentEvent::Changed(_) => rehighlight(registry.as_ref(), &key).await,
                DocumentEvent::Closed(_) => {
                    debug!("Document closed, releasing {}", key);
                    registry.deregister(&key).await;
                    break;
                }
            }
        }
    })
}

async fn rehighlight(registry: &dyn LogRegistry, key: &LogResourceKey) {
    if let Err(e) = registry.highlight(key).await {
        warn!("Failed to highlight {}: {}", key, e);
    }
}
