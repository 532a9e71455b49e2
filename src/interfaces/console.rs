//! Console transport
//!
//! Line-oriented stdin/stdout driver: prompts are printed with their choice
//! tokens, and a typed token selects a choice. One fixed session; `/start`,
//! `/reset` and `/quit` are handled here, everything else goes to the
//! engine.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::error;

use crate::application::intake::{ChoiceToken, IntakeEngine};
use crate::application::ports::{ConversationDriver, PromptChoice};
use crate::shared::shutdown::ShutdownSignal;

const SESSION_ID: &str = "console";
const CHAT_ID: i64 = 1;

pub struct ConsoleDriver;

#[async_trait]
impl ConversationDriver for ConsoleDriver {
    async fn prompt(&self, _session_id: &str, text: &str, choices: &[PromptChoice]) {
        println!("{}", text);
        for choice in choices {
            println!("  [{}] {}", choice.token, choice.label);
        }
    }

    async fn show_receipt(&self, _session_id: &str, text: &str) {
        println!("{}", text);
    }
}

/// Read stdin until EOF, `/quit` or shutdown.
pub async fn run_console(engine: Arc<IntakeEngine>, shutdown: ShutdownSignal) {
    let display_name = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
    println!("Utility billing assistant. Commands: /start, /reset, /quit.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            _ = shutdown.wait() => break,
            line = lines.next_line() => {
                let input = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read stdin: {}", e);
                        break;
                    }
                };
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                match input {
                    "/start" => engine.on_start(SESSION_ID, CHAT_ID, &display_name).await,
                    "/reset" => engine.on_reset(SESSION_ID).await,
                    "/quit" => {
                        shutdown.trigger();
                        break;
                    }
                    _ if ChoiceToken::parse(input).is_some() => {
                        engine.on_choice(SESSION_ID, input).await;
                    }
                    _ => engine.on_text_input(SESSION_ID, input).await,
                }
            }
        }
    }
}
