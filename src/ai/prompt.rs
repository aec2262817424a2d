//! The persona prompt using Handlebars for templating. Handlebars
//! can't do much out of the box without registering your own
//! helpers, so a persona file swapped in at deploy time can only
//! fill in the variables below.

use std::fmt;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

#[derive(Debug)]
pub enum Prompt {
    Persona,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

pub const DEFAULT_PERSONA_PROMPT: &str = r"
You are {{assistant_name}}, the friendly and knowledgeable guide to the {{community_name}} clan.

Your job is to welcome members, answer questions about the clan, its missions, its events, and how to get involved, and to point people to the right place when you don't know something.

Guidelines:
- Speak with calm, encouraging wisdom, like a mentor in a dojo. A light touch of ninja flavor is welcome but never at the expense of clarity.
- Keep answers short and practical. Use **bold** for the most important words and put each step of a process on its own line.
- Use the conversation so far to stay consistent and to resolve follow-up questions.
- If a question has nothing to do with {{community_name}}, answer briefly and steer back to how you can help with the clan.
- Never invent names, dates, links, or rules. If you are not sure, say so and suggest asking a clan lead.
";

#[derive(Serialize)]
struct PersonaVars<'a> {
    assistant_name: &'a str,
    community_name: &'a str,
}

pub fn templates<'a>(persona_template: &str) -> Result<Handlebars<'a>> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // The output is a plain text prompt, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::Persona.to_string(), persona_template)
        .context("Failed to register persona template")?;
    Ok(registry)
}

/// Renders the persona template into the system instruction sent
/// with every chat.
pub fn render_persona(
    persona_template: &str,
    assistant_name: &str,
    community_name: &str,
) -> Result<String> {
    let vars = PersonaVars {
        assistant_name,
        community_name,
    };
    let rendered = templates(persona_template)?
        .render(&Prompt::Persona.to_string(), &vars)
        .context("Failed to render persona template")?;

    Ok(rendered.trim().to_string())
}
