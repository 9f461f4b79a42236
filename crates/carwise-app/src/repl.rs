//! Interactive chat loop.
//!
//! Plain lines are questions for the bot; lines starting with `/` manage
//! sessions. Reads from any async line source so tests can script it.

use std::io::{self, Write};
use std::time::Duration;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use carwise_chat::{ChatOrchestrator, ConversationStore, SessionId};

use crate::reveal::write_revealed;

const HELP: &str = "Commands: /new, /switch <id>, /clear, /sessions, /history, /quit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    New,
    Switch(SessionId),
    Clear,
    Sessions,
    History,
    Help,
    Quit,
    Message(String),
    Invalid(String),
}

impl ReplCommand {
    /// Parse a line; `None` for blank input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(ReplCommand::Message(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        let command = match name {
            "new" => ReplCommand::New,
            "switch" if arg.is_empty() => {
                ReplCommand::Invalid("usage: /switch <session-id>".to_string())
            }
            "switch" => ReplCommand::Switch(SessionId::from(arg)),
            "clear" => ReplCommand::Clear,
            "sessions" => ReplCommand::Sessions,
            "history" => ReplCommand::History,
            "help" => ReplCommand::Help,
            "quit" | "exit" => ReplCommand::Quit,
            other => ReplCommand::Invalid(format!("unknown command: /{}", other)),
        };
        Some(command)
    }
}

/// Run the chat loop until `/quit` or end of input.
pub async fn run<R, W>(
    orchestrator: &ChatOrchestrator,
    store: &mut ConversationStore,
    input: R,
    out: &mut W,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let interval = Duration::from_millis(orchestrator.config().reveal_interval_ms);
    writeln!(out, "🚗 Car Advisory Chatbot. {}", HELP)?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let Some(command) = ReplCommand::parse(&line) else {
            continue;
        };

        match command {
            ReplCommand::Quit => break,
            ReplCommand::Help => writeln!(out, "{}", HELP)?,
            ReplCommand::Invalid(msg) => writeln!(out, "⚠ {}", msg)?,
            ReplCommand::New => {
                let id = store.new_session();
                writeln!(out, "Started chat {}", id)?;
            }
            ReplCommand::Switch(id) => match store.switch_session(&id) {
                Ok(()) => writeln!(out, "Switched to {}", id)?,
                Err(e) => writeln!(out, "⚠ {}", e)?,
            },
            ReplCommand::Clear => match store.active_session().cloned() {
                Some(id) => match store.clear_session(&id) {
                    Ok(()) => writeln!(out, "Cleared {}", id)?,
                    Err(e) => writeln!(out, "⚠ {}", e)?,
                },
                None => writeln!(out, "No active chat.")?,
            },
            ReplCommand::Sessions => {
                let summaries = store.summaries();
                if summaries.is_empty() {
                    writeln!(out, "No chats yet.")?;
                }
                for s in summaries {
                    let marker = if s.active { '*' } else { ' ' };
                    writeln!(out, "{} {} ({} messages)", marker, s.id, s.turn_count)?;
                }
            }
            ReplCommand::History => {
                let turns = store
                    .active_session()
                    .and_then(|id| store.list_turns(id).ok())
                    .unwrap_or_default();
                if turns.is_empty() {
                    writeln!(out, "No messages yet.")?;
                }
                for turn in turns {
                    writeln!(out, "{}: {}", turn.sender.label(), turn.text)?;
                }
            }
            ReplCommand::Message(text) => match orchestrator.handle_message(store, &text) {
                Ok(exchange) => {
                    write!(out, "Bot: ")?;
                    write_revealed(out, &exchange.reply, interval).await?;
                    writeln!(out)?;
                }
                Err(e) => writeln!(out, "⚠ {}", e)?,
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use carwise_chat::Dispatcher;
    use carwise_core::config::ChatConfig;
    use carwise_core::Catalogs;

    fn orchestrator() -> ChatOrchestrator {
        let data = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
        let catalogs =
            Catalogs::load(&data.join("cars.csv"), &data.join("maintenance.csv")).unwrap();
        let config = ChatConfig {
            reveal_interval_ms: 0,
            ..ChatConfig::default()
        };
        ChatOrchestrator::new(Dispatcher::new(catalogs), config)
    }

    async fn run_script(store: &mut ConversationStore, script: &str) -> String {
        let mut out = Vec::new();
        run(&orchestrator(), store, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(ReplCommand::parse("   "), None);
        assert_eq!(ReplCommand::parse("/new"), Some(ReplCommand::New));
        assert_eq!(
            ReplCommand::parse("/switch  chat-1 "),
            Some(ReplCommand::Switch(SessionId::from("chat-1")))
        );
        assert!(matches!(ReplCommand::parse("/switch"), Some(ReplCommand::Invalid(_))));
        assert!(matches!(ReplCommand::parse("/bogus"), Some(ReplCommand::Invalid(_))));
        assert_eq!(ReplCommand::parse("/exit"), Some(ReplCommand::Quit));
        assert_eq!(
            ReplCommand::parse("  Toyota Vios  "),
            Some(ReplCommand::Message("Toyota Vios".to_string()))
        );
    }

    #[tokio::test]
    async fn test_message_creates_session_and_replies() {
        let mut store = ConversationStore::new();
        let output = run_script(&mut store, "Tell me about Toyota Vios\n/quit\n").await;
        assert!(output.contains("Bot: 🚘 **Toyota Vios**"));
        assert_eq!(store.len(), 1);
        let id = store.active_session().unwrap().clone();
        assert_eq!(store.list_turns(&id).unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_history_lists_turns() {
        let mut store = ConversationStore::new();
        let output = run_script(&mut store, "7 seater\n/history\n").await;
        assert!(output.contains("You: 7 seater"));
        assert!(output.contains("Bot: 🚗 **7-Seater Cars from Dataset:**"));
    }

    #[tokio::test]
    async fn test_new_and_sessions() {
        let mut store = ConversationStore::new();
        let output = run_script(&mut store, "/new\n/new\n/sessions\n").await;
        assert_eq!(store.len(), 2);
        assert_eq!(output.matches("Started chat").count(), 2);
        let active = store.active_session().unwrap();
        assert!(output.contains(&format!("* {} (0 messages)", active)));
    }

    #[tokio::test]
    async fn test_clear_keeps_session() {
        let mut store = ConversationStore::new();
        let output = run_script(&mut store, "7 seater\n/clear\n/history\n").await;
        assert!(output.contains("Cleared"));
        assert!(output.contains("No messages yet."));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_switch_unknown_session_reports_error() {
        let mut store = ConversationStore::new();
        let output = run_script(&mut store, "/switch chat-ghost\n").await;
        assert!(output.contains("⚠ session not found: chat-ghost"));
    }

    #[tokio::test]
    async fn test_quit_stops_reading() {
        let mut store = ConversationStore::new();
        run_script(&mut store, "/quit\n7 seater\n").await;
        assert!(store.is_empty());
    }
}
