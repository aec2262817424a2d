use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::chat::markup::render_turn;
use crate::chat::{HttpTransport, Role, Transcript, TurnDispatcher};

/// Canned questions that can be sent with `/1`, `/2`, etc.
pub const SUGGESTED_PROMPTS: &[&str] = &[
    "What is the 91Ninjas clan all about?",
    "How do I join my first mission?",
    "What are the ranks and how do I level up?",
    "When is the next clan event?",
    "Who should I talk to if I need help?",
];

#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    ListPrompts,
    Unknown(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix('/') else {
        return Input::Message(line);
    };
    if command == "prompts" {
        return Input::ListPrompts;
    }
    match command.parse::<usize>() {
        Ok(n) if (1..=SUGGESTED_PROMPTS.len()).contains(&n) => {
            Input::Message(SUGGESTED_PROMPTS[n - 1])
        }
        _ => Input::Unknown(trimmed),
    }
}

fn print_prompts() {
    println!("Suggested prompts:");
    for (idx, prompt) in SUGGESTED_PROMPTS.iter().enumerate() {
        println!("  /{} {}", idx + 1, prompt);
    }
}

pub async fn run(url: &str, assistant_name: &str) -> Result<()> {
    let mut rl = DefaultEditor::new()?;

    let name = assistant_name.to_string();
    let transcript = Transcript::with_listener(move |turn| {
        println!("{}\n", render_turn(turn, &name));
        if turn.role == Role::User {
            println!("...");
        }
    });
    let dispatcher = TurnDispatcher::new(transcript, HttpTransport::new(url));

    println!("Chatting with {} at {}", assistant_name, url);
    print_prompts();
    println!();

    loop {
        let readline = rl.readline(">>> ");
        match readline {
            Ok(line) => match parse_input(&line) {
                Input::Message(text) => {
                    let _ = rl.add_history_entry(text);
                    dispatcher.send(text).await;
                }
                Input::ListPrompts => print_prompts(),
                Input::Unknown(cmd) => println!("Unknown command {}. Try /prompts", cmd),
            },
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_text_is_sent_as_typed() {
        assert_eq!(parse_input("  hello  "), Input::Message("  hello  "));
    }

    #[test]
    fn test_numbered_prompt_selects_suggestion() {
        assert_eq!(parse_input("/2"), Input::Message(SUGGESTED_PROMPTS[1]));
        assert_eq!(parse_input(" /1 "), Input::Message(SUGGESTED_PROMPTS[0]));
    }

    #[test]
    fn test_out_of_range_prompt_is_unknown() {
        assert_eq!(parse_input("/0"), Input::Unknown("/0"));
        assert_eq!(parse_input("/99"), Input::Unknown("/99"));
    }

    #[test]
    fn test_list_prompts() {
        assert_eq!(parse_input("/prompts"), Input::ListPrompts);
    }
}
