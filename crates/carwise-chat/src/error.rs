//! Error types for the chat layer.

use carwise_core::CarwiseError;

use crate::types::SessionId;

/// Errors from handling chat messages and sessions.
///
/// Matchers never fail; these cover message validation and session lookup.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat is disabled")]
    Disabled,
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(SessionId),
}

impl From<ChatError> for CarwiseError {
    fn from(err: ChatError) -> Self {
        CarwiseError::Chat(err.to_string())
    }
}
