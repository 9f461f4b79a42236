//! Chat orchestrator: validates a message, dispatches it and records the
//! exchange in the caller's [`ConversationStore`].

use carwise_core::config::ChatConfig;
use tracing::debug;

use crate::conversation::ConversationStore;
use crate::dispatcher::Dispatcher;
use crate::error::ChatError;
use crate::types::{ChatExchange, ConversationTurn, SessionId};

/// Wires the dispatcher to a conversation store.
///
/// The orchestrator holds no session state of its own; every call borrows
/// the store it should record into.
#[derive(Debug, Clone)]
pub struct ChatOrchestrator {
    dispatcher: Dispatcher,
    config: ChatConfig,
}

impl ChatOrchestrator {
    pub fn new(dispatcher: Dispatcher, config: ChatConfig) -> Self {
        Self { dispatcher, config }
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &ChatConfig {
        &self.config
    }

    /// Answer `message` in the active session, starting one if needed.
    pub fn handle_message(
        &self,
        store: &mut ConversationStore,
        message: &str,
    ) -> Result<ChatExchange, ChatError> {
        self.validate(message)?;
        let session_id = store.ensure_active();
        self.answer(store, session_id, message)
    }

    /// Answer `message` in a specific session without touching which
    /// session is active.
    pub fn handle_message_in(
        &self,
        store: &mut ConversationStore,
        session_id: &SessionId,
        message: &str,
    ) -> Result<ChatExchange, ChatError> {
        self.validate(message)?;
        if store.get(session_id).is_none() {
            return Err(ChatError::SessionNotFound(session_id.clone()));
        }
        self.answer(store, session_id.clone(), message)
    }

    /// Reject messages the dispatcher should never see.
    pub fn validate(&self, message: &str) -> Result<(), ChatError> {
        if !self.config.enabled {
            return Err(ChatError::Disabled);
        }
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > self.config.max_message_length {
            return Err(ChatError::MessageTooLong(self.config.max_message_length));
        }
        Ok(())
    }

    // The reply is computed in full before either turn is stored.
    fn answer(
        &self,
        store: &mut ConversationStore,
        session_id: SessionId,
        message: &str,
    ) -> Result<ChatExchange, ChatError> {
        let routed = self.dispatcher.route(message);
        store.append_turn(&session_id, ConversationTurn::user(message))?;
        store.append_turn(&session_id, ConversationTurn::bot(routed.reply.clone()))?;
        debug!(
            session = %session_id,
            intent = routed.intent.map(|i| i.as_str()).unwrap_or("fallback"),
            "Exchange recorded"
        );
        Ok(ChatExchange {
            session_id,
            intent: routed.intent,
            reply: routed.reply,
        })
    }
}
