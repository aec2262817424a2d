//! Terminal rendering for chat turns. This only affects what is
//! printed, the stored content of a turn is never changed.
use std::sync::LazyLock;

use regex::Regex;

use super::models::{Role, Turn};

const BOLD_ON: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

static BOLD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("Invalid bold pattern"));

/// Replaces `**bold**` markers with ANSI bold.
pub fn emphasize(content: &str) -> String {
    BOLD.replace_all(content, format!("{BOLD_ON}$1{RESET}"))
        .into_owned()
}

/// Renders a turn as a labelled block. Continuation lines are
/// indented under the label so multi-line replies stay readable.
pub fn render_turn(turn: &Turn, assistant_name: &str) -> String {
    let label = match turn.role {
        Role::User => "You",
        Role::Bot => assistant_name,
    };
    let indent = " ".repeat(label.chars().count() + 2);
    let body = emphasize(&turn.content)
        .lines()
        .collect::<Vec<_>>()
        .join(&format!("\n{indent}"));

    format!("{BOLD_ON}{label}{RESET}: {body}")
}
