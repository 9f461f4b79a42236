//! Rule-based car advisory chat.
//!
//! Maps free-text questions about cars to templated replies built from the
//! vehicle and maintenance catalogs, and keeps per-session chat history.

pub mod conversation;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod orchestrator;
pub mod response;
pub mod types;

pub use conversation::{ConversationStore, Session};
pub use dispatcher::{Dispatcher, Routed};
pub use error::ChatError;
pub use intent::Intent;
pub use knowledge::{KnowledgeBase, NameIndex};
pub use orchestrator::ChatOrchestrator;
pub use types::{ChatExchange, ConversationTurn, Sender, SessionId, SessionSummary};
