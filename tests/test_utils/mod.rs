//! Test utilities for integration tests
#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use anyhow::{Error, Result, anyhow};
use async_trait::async_trait;
use axum::{Router, body::Body};

use sensei::api::AppState;
use sensei::api::app;
use sensei::core::AppConfig;
use sensei::gemini::{ChatModel, ChatSession, Content};

/// Everything the fake model was asked to do.
#[derive(Default, Debug)]
pub struct Calls {
    pub system_instructions: Vec<String>,
    pub histories: Vec<Vec<Content>>,
    pub messages: Vec<String>,
}

/// Stands in for Gemini. Replies with a fixed text or fails with a
/// fixed error, and records every call.
#[derive(Clone)]
pub struct FakeModel {
    pub calls: Arc<Mutex<Calls>>,
    reply: Result<String, String>,
}

impl FakeModel {
    pub fn replying(text: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Calls::default())),
            reply: Ok(text.to_string()),
        }
    }

    pub fn failing(err: &str) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Calls::default())),
            reply: Err(err.to_string()),
        }
    }
}

struct FakeSession {
    calls: Arc<Mutex<Calls>>,
    reply: Result<String, String>,
}

impl ChatModel for FakeModel {
    fn start_chat(
        &self,
        system_instruction: &str,
        history: Vec<Content>,
    ) -> Result<Box<dyn ChatSession>, Error> {
        let mut calls = self.calls.lock().unwrap();
        calls.system_instructions.push(system_instruction.to_string());
        calls.histories.push(history);
        Ok(Box::new(FakeSession {
            calls: Arc::clone(&self.calls),
            reply: self.reply.clone(),
        }))
    }
}

#[async_trait]
impl ChatSession for FakeSession {
    async fn send_message(&mut self, text: &str) -> Result<String, Error> {
        self.calls.lock().unwrap().messages.push(text.to_string());
        self.reply.clone().map_err(|e| anyhow!(e))
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        gemini_api_key: String::from("test-api-key"),
        gemini_api_hostname: String::from("http://localhost:1"),
        gemini_model: String::from("gemini-1.5-flash"),
        persona_path: None,
        assistant_name: String::from("Sensei"),
        community_name: String::from("91Ninjas"),
        max_context_turns: 40,
        static_dir: String::from("./web-ui"),
    }
}

/// Creates a test application router backed by `model`.
pub fn test_app_with_config(config: AppConfig, model: Arc<dyn ChatModel>) -> Router {
    let app_state = AppState::new(config, model).expect("Failed to build app state");
    app(Arc::new(app_state))
}

pub fn test_app(model: FakeModel) -> Router {
    test_app_with_config(test_config(), Arc::new(model))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

/// In-memory `tracing` output. Pass a clone to
/// `tracing_subscriber::fmt().with_writer(...)` to capture logs.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Installs a subscriber writing to `logs` for the current thread
/// until the guard is dropped.
pub fn capture_logs(logs: &LogBuffer) -> tracing::subscriber::DefaultGuard {
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    tracing::subscriber::set_default(subscriber)
}
