use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};

use crate::ai::prompt::{DEFAULT_PERSONA_PROMPT, render_persona};

pub const DEFAULT_GEMINI_HOST: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_CONTEXT_TURNS: usize = 40;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_api_hostname: String,
    pub gemini_model: String,
    pub persona_path: Option<PathBuf>,
    pub assistant_name: String,
    pub community_name: String,
    pub max_context_turns: usize,
    pub static_dir: String,
}

impl AppConfig {
    /// Reads the config from the process environment. A missing
    /// `GEMINI_API_KEY` is an error here so the server never starts
    /// without credentials.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let gemini_api_key = var("GEMINI_API_KEY").ok_or(anyhow!("Missing env var GEMINI_API_KEY"))?;
        let gemini_api_hostname =
            var("SENSEI_GEMINI_HOST").unwrap_or_else(|| DEFAULT_GEMINI_HOST.to_string());
        let gemini_model =
            var("SENSEI_GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let persona_path = var("SENSEI_PERSONA_PATH").map(PathBuf::from);
        let assistant_name = var("SENSEI_ASSISTANT_NAME").unwrap_or_else(|| "Sensei".to_string());
        let community_name =
            var("SENSEI_COMMUNITY_NAME").unwrap_or_else(|| "91Ninjas".to_string());
        let max_context_turns = match var("SENSEI_MAX_CONTEXT_TURNS") {
            Some(v) => v
                .trim()
                .parse()
                .with_context(|| format!("Invalid SENSEI_MAX_CONTEXT_TURNS: {}", v))?,
            None => DEFAULT_MAX_CONTEXT_TURNS,
        };
        let static_dir = var("SENSEI_STATIC_DIR").unwrap_or_else(|| "./web-ui".to_string());

        Ok(Self {
            gemini_api_key,
            gemini_api_hostname,
            gemini_model,
            persona_path,
            assistant_name,
            community_name,
            max_context_turns,
            static_dir,
        })
    }

    /// Loads and renders the persona. Falls back to the built-in
    /// template when no persona file is configured.
    pub fn load_persona(&self) -> Result<String> {
        let template = match &self.persona_path {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read persona file {}", path.display()))?,
            None => DEFAULT_PERSONA_PROMPT.to_string(),
        };
        render_persona(&template, &self.assistant_name, &self.community_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();

        assert_eq!(config.gemini_api_key, "secret");
        assert_eq!(config.gemini_api_hostname, DEFAULT_GEMINI_HOST);
        assert_eq!(config.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(config.persona_path, None);
        assert_eq!(config.assistant_name, "Sensei");
        assert_eq!(config.community_name, "91Ninjas");
        assert_eq!(config.max_context_turns, DEFAULT_MAX_CONTEXT_TURNS);
        assert_eq!(config.static_dir, "./web-ui");
    }

    #[test]
    fn test_missing_api_key_fails() {
        let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let blank = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  ")]));
        assert!(blank.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("SENSEI_GEMINI_MODEL", "gemini-2.0-flash"),
            ("SENSEI_MAX_CONTEXT_TURNS", "8"),
            ("SENSEI_ASSISTANT_NAME", "Shifu"),
        ]))
        .unwrap();

        assert_eq!(config.gemini_model, "gemini-2.0-flash");
        assert_eq!(config.max_context_turns, 8);
        assert_eq!(config.assistant_name, "Shifu");
    }

    #[test]
    fn test_invalid_max_context_turns() {
        let result = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "secret"),
            ("SENSEI_MAX_CONTEXT_TURNS", "lots"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_persona_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "I am {{{{assistant_name}}}} of {{{{community_name}}}}.").unwrap();

        let mut config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        config.persona_path = Some(file.path().to_path_buf());

        assert_eq!(config.load_persona().unwrap(), "I am Sensei of 91Ninjas.");
    }

    #[test]
    fn test_load_persona_missing_file() {
        let mut config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        config.persona_path = Some(PathBuf::from("/definitely/not/here.hbs"));

        assert!(config.load_persona().is_err());
    }

    #[test]
    fn test_load_default_persona() {
        let config = AppConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "secret")])).unwrap();
        assert!(config.load_persona().unwrap().contains("Sensei"));
    }
}
