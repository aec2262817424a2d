use anyhow::{Error, Result, bail};
use async_trait::async_trait;

use super::core::{Content, GeminiRole, generate_content};
use crate::core::AppConfig;

/// A model that can start a multi-turn chat pre-loaded with a system
/// instruction and prior history.
pub trait ChatModel: Send + Sync {
    fn start_chat(
        &self,
        system_instruction: &str,
        history: Vec<Content>,
    ) -> Result<Box<dyn ChatSession>, Error>;
}

/// A live chat. Each call to `send_message` generates exactly one
/// response.
#[async_trait]
pub trait ChatSession: Send {
    async fn send_message(&mut self, text: &str) -> Result<String, Error>;
}

#[derive(Clone)]
pub struct GeminiModel {
    client: reqwest::Client,
    api_hostname: String,
    api_key: String,
    model: String,
}

impl GeminiModel {
    pub fn new(api_hostname: &str, api_key: &str, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.gemini_api_hostname,
            &config.gemini_api_key,
            &config.gemini_model,
        )
    }
}

impl ChatModel for GeminiModel {
    fn start_chat(
        &self,
        system_instruction: &str,
        history: Vec<Content>,
    ) -> Result<Box<dyn ChatSession>, Error> {
        // Gemini rejects contents without a role or without any text
        for (idx, content) in history.iter().enumerate() {
            if content.role.is_none() {
                bail!("History content at index {} has no role", idx);
            }
            if content.text().trim().is_empty() {
                bail!("History content at index {} has no text", idx);
            }
        }

        Ok(Box::new(GeminiChat {
            model: self.clone(),
            system_instruction: system_instruction.to_string(),
            history,
        }))
    }
}

pub struct GeminiChat {
    model: GeminiModel,
    system_instruction: String,
    history: Vec<Content>,
}

impl GeminiChat {
    pub fn history(&self) -> &[Content] {
        &self.history
    }
}

#[async_trait]
impl ChatSession for GeminiChat {
    async fn send_message(&mut self, text: &str) -> Result<String, Error> {
        let user_content = Content::new(GeminiRole::User, text);
        let mut contents = self.history.clone();
        contents.push(user_content.clone());

        let GeminiModel {
            client,
            api_hostname,
            api_key,
            model,
        } = &self.model;
        tracing::debug!(
            "Generating content with {} for {} contents",
            model,
            contents.len()
        );
        let reply = generate_content(
            client,
            api_hostname,
            api_key,
            model,
            &self.system_instruction,
            &contents,
        )
        .await?;

        // Only a successful exchange becomes part of the history
        self.history.push(user_content);
        self.history.push(Content::new(GeminiRole::Model, &reply));

        Ok(reply)
    }
}
