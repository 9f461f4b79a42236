//! First-match-wins dispatch over [`Intent::PRIORITY`].

use std::sync::Arc;

use carwise_core::Catalogs;
use serde::Serialize;
use tracing::debug;

use crate::intent::Intent;
use crate::knowledge::{normalize, KnowledgeBase};
use crate::response;

/// A reply together with the intent that produced it.
///
/// `intent` is `None` when nothing matched and `reply` is the fallback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routed {
    pub intent: Option<Intent>,
    pub reply: String,
}

/// Maps a query to a reply. Cheap to clone; the catalogs are shared.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    knowledge: Arc<KnowledgeBase>,
}

impl Dispatcher {
    pub fn new(catalogs: Catalogs) -> Self {
        Self {
            knowledge: Arc::new(KnowledgeBase::new(catalogs)),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Try each intent in priority order and keep the first reply.
    pub fn route(&self, query: &str) -> Routed {
        let normalized = normalize(query);
        for intent in Intent::PRIORITY {
            if let Some(reply) = intent.evaluate(&normalized, &self.knowledge) {
                debug!(intent = intent.as_str(), "Intent matched");
                return Routed {
                    intent: Some(intent),
                    reply,
                };
            }
        }
        debug!("No intent matched, using fallback");
        Routed {
            intent: None,
            reply: response::FALLBACK.to_string(),
        }
    }

    /// Reply text for `query`.
    pub fn dispatch(&self, query: &str) -> String {
        self.route(query).reply
    }
}
