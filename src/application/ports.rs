//! Outbound ports
//!
//! The conversation transport (chat delivery, keyboard rendering) lives
//! outside this crate. The core only talks to it through
//! [`ConversationDriver`].

use async_trait::async_trait;

/// One selectable option offered with a prompt. The transport decides how
/// to render it (inline keyboard, numbered list, ...); the token comes back
/// through `on_choice` untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptChoice {
    pub label: String,
    pub token: String,
}

impl PromptChoice {
    pub fn new(label: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            token: token.into(),
        }
    }
}

/// Core -> transport interface.
#[async_trait]
pub trait ConversationDriver: Send + Sync {
    /// Ask the user the next question, optionally with selectable choices.
    async fn prompt(&self, session_id: &str, text: &str, choices: &[PromptChoice]);

    /// Deliver a formatted receipt or bill detail view.
    async fn show_receipt(&self, session_id: &str, text: &str);
}
