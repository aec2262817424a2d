use std::sync::Arc;

use anyhow::Result;

use crate::ai::SessionReplayer;
use crate::core::AppConfig;
use crate::gemini::ChatModel;

/// Shared by every request. Nothing in here changes after startup so
/// requests never contend with each other.
pub struct AppState {
    pub config: AppConfig,
    pub replayer: SessionReplayer,
}

impl AppState {
    /// Renders the persona once up front. Fails if the persona can't
    /// be loaded so a bad template is caught at startup.
    pub fn new(config: AppConfig, model: Arc<dyn ChatModel>) -> Result<Self> {
        let persona = config.load_persona()?;
        let replayer = SessionReplayer::new(model, &persona, config.max_context_turns);
        Ok(Self { config, replayer })
    }
}
