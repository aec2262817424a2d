use anyhow::{Error, Result, anyhow, bail};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum GeminiRole {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Part {
    pub text: String,
}

// {
//     "role": "model",
//     "parts": [{ "text": "Hello!" }]
// }
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<GeminiRole>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: GeminiRole, text: &str) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    /// System instructions are sent without a role.
    pub fn instruction(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: &'a [Content],
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<Content>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Calls the `generateContent` endpoint once and returns the text of
/// the first candidate.
pub async fn generate_content(
    client: &reqwest::Client,
    api_hostname: &str,
    api_key: &str,
    model: &str,
    system_instruction: &str,
    contents: &[Content],
) -> Result<String, Error> {
    let payload = GenerateContentRequest {
        system_instruction: if system_instruction.is_empty() {
            None
        } else {
            Some(Content::instruction(system_instruction))
        },
        contents,
    };
    let url = format!(
        "{}/v1beta/models/{}:generateContent",
        api_hostname.trim_end_matches('/'),
        model
    );
    let response = client
        .post(url)
        .header("x-goog-api-key", api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Gemini request failed with status {}: {}", status, body);
    }

    let body: GenerateContentResponse = response.json().await?;
    let candidate = body
        .candidates
        .into_iter()
        .next()
        .ok_or(anyhow!("Gemini response had no candidates"))?;
    let text = candidate
        .content
        .as_ref()
        .map(Content::text)
        .unwrap_or_default();

    if text.trim().is_empty() {
        bail!(
            "Gemini response had no text. Finish reason: {}",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        );
    }

    Ok(text)
}
