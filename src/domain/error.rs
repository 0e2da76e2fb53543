use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("User cancelled")]
    UserCancelled,

    #[error("Request failed with status {0}")]
    RequestFailed(u16),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Registration error: {0}")]
    RegistrationError(String),

    #[error("Prompt error: {0}")]
    PromptError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    pub fn registration(msg: impl Into<String>) -> Self {
        Self::RegistrationError(msg.into())
    }

    pub fn prompt(msg: impl Into<String>) -> Self {
        Self::PromptError(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_user_cancelled(&self) -> bool {
        matches!(self, Self::UserCancelled)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// HTTP status carried by a failed chat request, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(status) => Some(*status),
            _ => None,
        }
    }
}
