//! Conversation Log and Turn Handling
//!
//! The history is an explicit append-only log owned by the caller (the chat
//! binary); the core stays a function of (engine, history, input). Nothing
//! here persists across process restarts.

use serde::{Deserialize, Serialize};

use crate::answer::AnswerEngine;
use crate::query::{self, parse_query};
use crate::sources::Citation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in the conversation. Sources are only set on assistant turns
/// that rendered a successful comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Citation>,
}

impl Turn {
    pub fn user(content: impl Into<String>) -> Self {
        Turn {
            role: Role::User,
            content: content.into(),
            sources: Vec::new(),
        }
    }

    pub fn assistant(content: impl Into<String>, sources: Vec<Citation>) -> Self {
        Turn {
            role: Role::Assistant,
            content: content.into(),
            sources,
        }
    }
}

/// Append-only conversation log, process lifetime only.
#[derive(Debug, Default)]
pub struct History {
    turns: Vec<Turn>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// Reply for questions that name no supported crop or region. Lists the
/// vocabulary verbatim.
pub fn guidance_message() -> String {
    format!(
        "Sorry, I can only answer questions about crops ({}) and regions ({}). Please rephrase your query.",
        query::supported_crops(),
        query::supported_regions(),
    )
}

/// Handle one user message: append the user turn, compute the reply, append
/// and return the assistant turn.
///
/// Every outcome is a normal conversational reply; recoverable errors carry
/// zero citations.
pub fn run_turn(engine: &AnswerEngine, history: &mut History, input: &str) -> Turn {
    history.push(Turn::user(input));

    let parsed = parse_query(input);
    let reply = match (parsed.crop, parsed.region) {
        (Some(crop), Some(region)) => match engine.answer(crop, region) {
            Ok(answer) => Turn::assistant(answer.text, answer.citations),
            Err(err) => Turn::assistant(format!("Error: {err}."), Vec::new()),
        },
        _ => Turn::assistant(guidance_message(), Vec::new()),
    };

    history.push(reply.clone());
    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guidance_lists_full_vocabulary() {
        let message = guidance_message();
        assert!(message.contains("rice, wheat, maize"));
        assert!(message.contains("PUNJAB, UTTAR PRADESH, HARYANA, KERALA, ASSAM"));
    }

    #[test]
    fn history_is_append_only() {
        let mut history = History::new();
        assert!(history.is_empty());

        history.push(Turn::user("hello"));
        history.push(Turn::assistant("hi", Vec::new()));

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].role, Role::User);
        assert_eq!(history.turns()[1].role, Role::Assistant);
    }

    #[test]
    fn turn_serialization_omits_empty_sources() {
        let turn = Turn::assistant("no citations here", Vec::new());
        let json = serde_json::to_string(&turn).unwrap();
        assert!(!json.contains("sources"));
        assert!(json.contains("\"role\":\"assistant\""));
    }
}
