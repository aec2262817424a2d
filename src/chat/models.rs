//! The core models for a multi-turn chat. A `Transcript` is the
//! authoritative, client-side record of a conversation and the same
//! ordered list of `Turn`s is what gets sent to the relay on every
//! request.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "bot")]
    Bot,
}

/// One message in the conversation. Ordering within a transcript is
/// the only context a turn carries.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self::new(Role::User, content)
    }

    pub fn bot(content: &str) -> Self {
        Self::new(Role::Bot, content)
    }
}

pub type TurnListener = Box<dyn Fn(&Turn) + Send + Sync + 'static>;

/// Append-only store of turns. There is no way to
/// remove or reorder a turn once it has been appended.
///
/// An optional listener is called after every append so whatever
/// owns the display can render the new turn.
#[derive(Default)]
pub struct Transcript {
    turns: Vec<Turn>,
    listener: Option<TurnListener>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listener<F>(listener: F) -> Self
    where
        F: Fn(&Turn) + Send + Sync + 'static,
    {
        Self {
            turns: Vec::new(),
            listener: Some(Box::new(listener)),
        }
    }

    pub fn append(&mut self, turn: Turn) {
        self.turns.push(turn);
        if let (Some(listener), Some(turn)) = (&self.listener, self.turns.last()) {
            listener(turn);
        }
    }

    pub fn all(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
