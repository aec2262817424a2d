//! Client side of the relay. The `TurnDispatcher` owns the
//! conversation `Transcript` and sends the entire transcript to the
//! relay on every user turn.
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Error, Result};
use async_trait::async_trait;

use super::models::{Transcript, Turn};
use crate::api::public::bot::{BotRequest, BotResponse};

/// Appended in place of a reply whenever the relay can't be reached
/// or responds with anything other than a reply.
pub const APOLOGY: &str = "Sorry, I ran into an error. Please try again.";

/// Sends a transcript to the relay and returns the reply text.
#[async_trait]
pub trait RelayTransport: Send + Sync {
    async fn post_history(&self, history: &[Turn]) -> Result<String, Error>;
}

/// Talks to the relay over HTTP, e.g. `http://127.0.0.1:2222/api/bot`.
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
        }
    }
}

#[async_trait]
impl RelayTransport for HttpTransport {
    async fn post_history(&self, history: &[Turn]) -> Result<String, Error> {
        let payload = BotRequest {
            history: history.to_vec(),
        };
        let resp: BotResponse = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.reply)
    }
}

/// Clears the busy flag when dropped, including when a `send` future
/// is dropped before the relay answers.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or a request was already in flight. Nothing was
    /// appended or sent.
    Ignored,
    /// The relay replied and the reply was appended.
    Replied,
    /// The request failed and the apology was appended.
    Failed,
}

/// Turns user input into relay requests and records the results.
///
/// The busy flag is the only thing serializing requests: while one
/// is in flight every other `send` is a no-op, so turns can never be
/// appended out of order.
pub struct TurnDispatcher<T: RelayTransport> {
    transcript: Mutex<Transcript>,
    transport: T,
    busy: AtomicBool,
}

impl<T: RelayTransport> TurnDispatcher<T> {
    pub fn new(transcript: Transcript, transport: T) -> Self {
        Self {
            transcript: Mutex::new(transcript),
            transport,
            busy: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Snapshot of every turn so far.
    pub fn turns(&self) -> Vec<Turn> {
        self.transcript
            .lock()
            .expect("Unable to lock transcript")
            .all()
            .to_vec()
    }

    pub async fn send(&self, text: &str) -> SendOutcome {
        if text.trim().is_empty() {
            return SendOutcome::Ignored;
        }
        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::debug!("Request already in flight, ignoring input");
            return SendOutcome::Ignored;
        }
        let _busy = BusyGuard(&self.busy);

        let history = {
            let mut transcript = self.transcript.lock().expect("Unable to lock transcript");
            transcript.append(Turn::user(text));
            transcript.all().to_vec()
        };

        let result = self.transport.post_history(&history).await;

        let (turn, outcome) = match result {
            Ok(reply) => (Turn::bot(&reply), SendOutcome::Replied),
            Err(e) => {
                tracing::warn!("Failed to fetch bot response: {:#}", e);
                (Turn::bot(APOLOGY), SendOutcome::Failed)
            }
        };
        self.transcript
            .lock()
            .expect("Unable to lock transcript")
            .append(turn);

        outcome
    }
}
