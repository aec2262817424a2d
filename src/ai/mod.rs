pub mod prompt;
pub mod replay;

pub use replay::{ReplayError, SessionReplayer};
