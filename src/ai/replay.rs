//! Rebuilds a stateful chat from a stateless request. Every request
//! carries the whole transcript: everything but the last turn is
//! replayed into a fresh model session as history and the last turn
//! is sent as the live message. Nothing outlives the call.
use std::sync::Arc;

use thiserror::Error;

use crate::chat::models::{Role, Turn};
use crate::gemini::{ChatModel, Content, GeminiRole};

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("history must contain at least one turn")]
    EmptyTranscript,
    #[error("the last turn in history must be from the user")]
    LastTurnNotUser,
    #[error("the last message in history is blank")]
    BlankMessage,
    #[error("history turn at index {0} is blank")]
    BlankContext(usize),
    #[error("failed to generate a reply")]
    Backend(#[from] anyhow::Error),
}

impl ReplayError {
    /// Whether the caller sent something unusable, as opposed to the
    /// model failing.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, ReplayError::Backend(_))
    }
}

/// Maps a transcript role to the model's two-party vocabulary.
pub fn backend_role(role: Role) -> GeminiRole {
    match role {
        Role::User => GeminiRole::User,
        Role::Bot => GeminiRole::Model,
    }
}

/// Returns the most recent `max_turns` of `context`. When the cut
/// lands on a bot turn the window is advanced to the next user turn
/// so replayed history always opens with the user.
pub fn replay_window(context: &[Turn], max_turns: usize) -> &[Turn] {
    if context.len() <= max_turns {
        return context;
    }
    let window = &context[context.len() - max_turns..];
    match window.iter().position(|t| t.role == Role::User) {
        Some(start) => &window[start..],
        None => &[],
    }
}

pub struct SessionReplayer {
    model: Arc<dyn ChatModel>,
    persona: String,
    max_context_turns: usize,
}

impl SessionReplayer {
    pub fn new(model: Arc<dyn ChatModel>, persona: &str, max_context_turns: usize) -> Self {
        Self {
            model,
            persona: persona.to_string(),
            max_context_turns,
        }
    }

    /// Generates the reply to the last turn of `transcript`. Invalid
    /// input is rejected before the model is touched and the model is
    /// asked for exactly one response otherwise.
    pub async fn reply(&self, transcript: &[Turn]) -> Result<String, ReplayError> {
        let (last, context) = transcript
            .split_last()
            .ok_or(ReplayError::EmptyTranscript)?;
        if last.role != Role::User {
            return Err(ReplayError::LastTurnNotUser);
        }
        if last.content.trim().is_empty() {
            return Err(ReplayError::BlankMessage);
        }
        if let Some(idx) = context.iter().position(|t| t.content.trim().is_empty()) {
            return Err(ReplayError::BlankContext(idx));
        }

        let window = replay_window(context, self.max_context_turns);
        if window.len() < context.len() {
            tracing::info!(
                "Dropping {} of {} context turns outside the replay window",
                context.len() - window.len(),
                context.len()
            );
        }
        let history: Vec<Content> = window
            .iter()
            .map(|turn| Content::new(backend_role(turn.role), &turn.content))
            .collect();

        tracing::debug!("Replaying {} turns before the live message", history.len());
        let mut session = self.model.start_chat(&self.persona, history)?;
        let reply = session.send_message(&last.content).await?;

        Ok(reply)
    }
}
