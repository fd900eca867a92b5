//! Interactive chat command.
//!
//! Drives the same pipeline as the HTTP endpoint, rendering each fragment as
//! it arrives. History lives entirely in this process and is resent in full
//! on every turn, mirroring how the web UI talks to the server.

use crate::chat::{ChatPipeline, ConversationTurn, Role};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::{LektorError, Result};
use console::style;
use futures::StreamExt;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Keep at most this many turns of local history.
const MAX_HISTORY_TURNS: usize = 20;

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, mut settings: Settings) -> Result<()> {
    if let Some(model) = model {
        settings.completion.model = model;
    }

    let pipeline = ChatPipeline::from_settings(&settings)?;
    let mut history: Vec<ConversationTurn> = Vec::new();

    println!("\n{}", style("Lektor Chat").bold().cyan());
    println!(
        "{}\n",
        style("Ask about professors, or 'exit' to quit. Use 'clear' to reset conversation.").dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            history.clear();
            Output::info("Conversation history cleared.");
            continue;
        }

        history.push(ConversationTurn::new(Role::User, input));

        match stream_reply(&pipeline, &history).await {
            Ok(answer) => {
                history.push(ConversationTurn::new(Role::Assistant, answer));
                if history.len() > MAX_HISTORY_TURNS {
                    history.drain(..history.len() - MAX_HISTORY_TURNS);
                }
            }
            Err(LektorError::StreamAborted) => {
                // The user interrupted the reply; drop the turn so it can be
                // resubmitted cleanly.
                history.pop();
                println!();
                Output::info("Response interrupted.");
            }
            Err(e) => {
                history.pop();
                println!();
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}

/// Stream one reply to stdout, returning the full answer text.
async fn stream_reply(pipeline: &ChatPipeline, history: &[ConversationTurn]) -> Result<String> {
    let mut stream = pipeline.respond(history).await?;

    let mut stdout = io::stdout();
    print!("\n{} ", style("Lektor:").cyan().bold());
    stdout.flush()?;

    let mut answer = String::new();

    loop {
        tokio::select! {
            fragment = stream.next() => match fragment {
                Some(Ok(text)) => {
                    print!("{}", text);
                    stdout.flush()?;
                    answer.push_str(&text);
                }
                Some(Err(e)) => return Err(e),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("Chat stream interrupted after {} bytes", answer.len());
                return Err(LektorError::StreamAborted);
            }
        }
    }

    println!("\n");
    Ok(answer)
}
