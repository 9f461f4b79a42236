//! Conversation store.
//!
//! Holds every chat session created in this process and which one is active.
//! Nothing is persisted. All mutations are keyed by session id, so sessions
//! never see each other's turns.

use chrono::{DateTime, Local};
use tracing::info;

use crate::error::ChatError;
use crate::types::{ConversationTurn, SessionId, SessionSummary};

/// One chat thread.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub created_at: DateTime<Local>,
    pub turns: Vec<ConversationTurn>,
}

/// All sessions, in creation order, plus the active session id.
#[derive(Debug, Default)]
pub struct ConversationStore {
    sessions: Vec<Session>,
    active: Option<SessionId>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session and make it active.
    pub fn new_session(&mut self) -> SessionId {
        self.new_session_at(Local::now())
    }

    /// Start a new session created at `created_at` and make it active.
    ///
    /// Ids look like `chat-20261018-093015.250`; a second session in the same
    /// millisecond gets a `-2` suffix, and so on.
    pub fn new_session_at(&mut self, created_at: DateTime<Local>) -> SessionId {
        let base = format!("chat-{}", created_at.format("%Y%m%d-%H%M%S%.3f"));
        let mut id = SessionId::new(base.clone());
        let mut n = 2;
        while self.get(&id).is_some() {
            id = SessionId::new(format!("{}-{}", base, n));
            n += 1;
        }

        self.sessions.push(Session {
            id: id.clone(),
            created_at,
            turns: Vec::new(),
        });
        self.active = Some(id.clone());
        info!(session = %id, "Chat session created");
        id
    }

    /// Make `id` the active session.
    pub fn switch_session(&mut self, id: &SessionId) -> Result<(), ChatError> {
        self.require(id)?;
        self.active = Some(id.clone());
        info!(session = %id, "Switched chat session");
        Ok(())
    }

    /// Drop every turn of `id`; the session itself stays.
    pub fn clear_session(&mut self, id: &SessionId) -> Result<(), ChatError> {
        let session = self.require_mut(id)?;
        let dropped = session.turns.len();
        session.turns.clear();
        info!(session = %id, dropped, "Chat session cleared");
        Ok(())
    }

    pub fn append_turn(&mut self, id: &SessionId, turn: ConversationTurn) -> Result<(), ChatError> {
        self.require_mut(id)?.turns.push(turn);
        Ok(())
    }

    /// Turns of `id` in the order they were appended.
    pub fn list_turns(&self, id: &SessionId) -> Result<&[ConversationTurn], ChatError> {
        Ok(&self.require(id)?.turns)
    }

    pub fn active_session(&self) -> Option<&SessionId> {
        self.active.as_ref()
    }

    /// The active session, creating one if there is none yet.
    pub fn ensure_active(&mut self) -> SessionId {
        match &self.active {
            Some(id) => id.clone(),
            None => self.new_session(),
        }
    }

    /// Session ids in creation order.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.iter().map(|s| s.id.clone()).collect()
    }

    pub fn summaries(&self) -> Vec<SessionSummary> {
        self.sessions
            .iter()
            .map(|s| SessionSummary {
                id: s.id.clone(),
                created_at: s.created_at,
                turn_count: s.turns.len(),
                active: self.active.as_ref() == Some(&s.id),
            })
            .collect()
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions.iter().find(|s| &s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    // -- Private helpers --

    fn require(&self, id: &SessionId) -> Result<&Session, ChatError> {
        self.get(id)
            .ok_or_else(|| ChatError::SessionNotFound(id.clone()))
    }

    fn require_mut(&mut self, id: &SessionId) -> Result<&mut Session, ChatError> {
        self.sessions
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| ChatError::SessionNotFound(id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sender;
    use chrono::TimeZone;

    fn at(secs: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 10, 18, 9, 30, secs).unwrap()
    }

    // ---- Session creation ----

    #[test]
    fn test_new_store_is_empty() {
        let store = ConversationStore::new();
        assert!(store.is_empty());
        assert!(store.active_session().is_none());
    }

    #[test]
    fn test_session_id_derives_from_timestamp() {
        let mut store = ConversationStore::new();
        let id = store.new_session_at(at(15));
        assert_eq!(id.as_str(), "chat-20261018-093015.000");
    }

    #[test]
    fn test_same_instant_gets_suffix() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(15));
        let b = store.new_session_at(at(15));
        let c = store.new_session_at(at(15));
        assert_eq!(b.as_str(), format!("{}-2", a));
        assert_eq!(c.as_str(), format!("{}-3", a));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_new_session_becomes_active() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        assert_eq!(store.active_session(), Some(&a));
        let b = store.new_session_at(at(2));
        assert_eq!(store.active_session(), Some(&b));
    }

    #[test]
    fn test_ensure_active_creates_once() {
        let mut store = ConversationStore::new();
        let a = store.ensure_active();
        let b = store.ensure_active();
        assert_eq!(a, b);
        assert_eq!(store.len(), 1);
    }

    // ---- Switching ----

    #[test]
    fn test_switch_session() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        let _b = store.new_session_at(at(2));
        store.switch_session(&a).unwrap();
        assert_eq!(store.active_session(), Some(&a));
    }

    #[test]
    fn test_switch_to_unknown_session_fails() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        let err = store.switch_session(&SessionId::from("nope")).unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(_)));
        assert_eq!(store.active_session(), Some(&a));
    }

    // ---- Turns ----

    #[test]
    fn test_turns_keep_insertion_order() {
        let mut store = ConversationStore::new();
        let id = store.new_session_at(at(1));
        store.append_turn(&id, ConversationTurn::user("hello")).unwrap();
        store.append_turn(&id, ConversationTurn::bot("hi there")).unwrap();
        store.append_turn(&id, ConversationTurn::user("bye")).unwrap();

        let turns = store.list_turns(&id).unwrap();
        let texts: Vec<&str> = turns.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "hi there", "bye"]);
        assert_eq!(turns[1].sender, Sender::Bot);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        let b = store.new_session_at(at(2));
        store.append_turn(&a, ConversationTurn::user("in a")).unwrap();
        assert_eq!(store.list_turns(&a).unwrap().len(), 1);
        assert!(store.list_turns(&b).unwrap().is_empty());
    }

    #[test]
    fn test_append_to_unknown_session_fails() {
        let mut store = ConversationStore::new();
        let err = store
            .append_turn(&SessionId::from("ghost"), ConversationTurn::user("x"))
            .unwrap_err();
        assert!(matches!(err, ChatError::SessionNotFound(_)));
    }

    // ---- Clearing ----

    #[test]
    fn test_clear_keeps_session() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        store.append_turn(&a, ConversationTurn::user("hello")).unwrap();
        store.clear_session(&a).unwrap();
        assert!(store.list_turns(&a).unwrap().is_empty());
        assert_eq!(store.session_ids(), vec![a.clone()]);
        assert_eq!(store.active_session(), Some(&a));
    }

    #[test]
    fn test_clear_unknown_session_fails() {
        let mut store = ConversationStore::new();
        assert!(store.clear_session(&SessionId::from("ghost")).is_err());
    }

    // ---- Summaries ----

    #[test]
    fn test_summaries_flag_active_session() {
        let mut store = ConversationStore::new();
        let a = store.new_session_at(at(1));
        let b = store.new_session_at(at(2));
        store.append_turn(&a, ConversationTurn::user("q")).unwrap();

        let summaries = store.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, a);
        assert_eq!(summaries[0].turn_count, 1);
        assert!(!summaries[0].active);
        assert_eq!(summaries[1].id, b);
        assert!(summaries[1].active);
    }
}
