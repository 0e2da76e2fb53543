use async_trait::async_trait;

use crate::domain::DomainError;

/// What a single interactive step produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    Completed(T),
    Cancelled,
}

impl<T> PromptOutcome<T> {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PromptOutcome::Cancelled)
    }

    pub fn completed(self) -> Option<T> {
        match self {
            PromptOutcome::Completed(value) => Some(value),
            PromptOutcome::Cancelled => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PromptOutcome<U> {
        match self {
            PromptOutcome::Completed(value) => PromptOutcome::Completed(f(value)),
            PromptOutcome::Cancelled => PromptOutcome::Cancelled,
        }
    }
}

/// Title and hint shown with a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptOptions<'a> {
    pub title: &'a str,
    pub placeholder: &'a str,
}

/// The interactive input surface.
///
/// Cancellation is reported as [`PromptOutcome::Cancelled`]; an `Err` means the
/// surface itself failed.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Pick one of `items`.
    async fn select(
        &self,
        options: PromptOptions<'_>,
        items: &[String],
    ) -> Result<PromptOutcome<String>, DomainError>;

    /// Read a single line of free text. Empty input is allowed.
    async fn input(&self, options: PromptOptions<'_>) -> Result<PromptOutcome<String>, DomainError>;
}
