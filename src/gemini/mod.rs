mod chat;
mod core;

pub use self::chat::{ChatModel, ChatSession, GeminiChat, GeminiModel};
pub use self::core::{Content, GeminiRole, Part, generate_content};
