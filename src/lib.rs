pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{
    ChatApi, Configuration, ConverseUseCase, DocumentEvent, DocumentViewer, FormAnswers,
    FormResponse, ListLogGroupsUseCase, LogGroupSource, LogRegistry, Notifier, PromptOptions,
    PromptOutcome, Prompter, SearchLogGroupUseCase, SearchSession, TelemetrySink, ViewHandle,
    Wizard,
};

pub use cli::Commands;

pub use connector::{
    ConsoleNotifier, DialoguerPrompter, HttpChatApi, InMemoryLogRegistry, LocalLogSource,
    RecordingTelemetry, TerminalViewer, TracingTelemetry,
};

pub use domain::{
    Attachment, ChatMessage, ConversationBranch, ConversationThread, DomainError,
    HighlightRange, LogEvent, LogEventPage, LogGroupDescriptor, LogGroupInfo, LogGroupPage,
    LogResourceKey, LogStreamData, ModelIdentifier, Outcome, SearchLogGroupResponse,
    SearchParameters, SearchRequest, Sender, SystemPrompt, DEFAULT_SEARCH_LIMIT,
};
