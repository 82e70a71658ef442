//! Error types for the chat engine.

/// Errors from session handling and message validation.
///
/// Provider failures never show up here; they are turned into assistant
/// text by the router.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("session not found: {0}")]
    SessionNotFound(uuid::Uuid),
    #[error("assistant setup is not complete")]
    SetupIncomplete,
    #[error("Please provide both a name and personality for your assistant.")]
    IncompletePersona,
    #[error("session lock poisoned: {0}")]
    StateLock(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_chat_error_display() {
        assert_eq!(ChatError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            ChatError::MessageTooLong(2000).to_string(),
            "message exceeds maximum length of 2000 characters"
        );
        assert_eq!(
            ChatError::SetupIncomplete.to_string(),
            "assistant setup is not complete"
        );
        assert_eq!(
            ChatError::IncompletePersona.to_string(),
            "Please provide both a name and personality for your assistant."
        );
        assert_eq!(
            ChatError::StateLock("boom".to_string()).to_string(),
            "session lock poisoned: boom"
        );
    }

    #[test]
    fn test_session_not_found_preserves_uuid() {
        let id = Uuid::parse_str("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(
            ChatError::SessionNotFound(id).to_string(),
            "session not found: 550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn test_errors_implement_debug() {
        let dbg = format!("{:?}", ChatError::MessageTooLong(10));
        assert!(dbg.contains("MessageTooLong"));
    }
}
