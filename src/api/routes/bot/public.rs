//! Public types for the bot API
use serde::{Deserialize, Serialize};

use crate::chat::models::Turn;

/// The full transcript of a conversation. The last turn is the
/// message to answer and everything before it is context.
#[derive(Serialize, Deserialize, Debug, Default)]
pub struct BotRequest {
    #[serde(default)]
    pub history: Vec<Turn>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct BotResponse {
    pub reply: String,
}
