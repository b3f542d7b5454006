//! Assistant chat panel backing — a pure passthrough to the prompt
//! endpoint.
//!
//! Keeps an in-memory transcript and forwards each prompt through the
//! transport. No retries, no streaming; a transport failure becomes an
//! error line in the transcript instead of surfacing to the caller.

use schedai_proto::normalize::assistant_reply;

use crate::transport::Transport;

/// Opening line shown before the user has said anything.
pub const GREETING: &str =
    "Hi! I'm ready to help organize your schedule.\nSend me anything you want to plan.";

/// Shown when the backend answers without a usable `reply` field.
const FALLBACK_REPLY: &str = "Okay, noted.";

/// Shown when the prompt request fails outright.
const ERROR_REPLY: &str = "Error reaching the server.";

/// Who produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// The local user.
    User,
    /// The assistant (or an error line standing in for it).
    Assistant,
}

/// One line of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLine {
    /// Who said it.
    pub sender: Sender,
    /// The text, as displayed.
    pub text: String,
}

/// Assistant conversation over a [`Transport`].
pub struct AssistantChat<T> {
    transport: T,
    lines: Vec<ChatLine>,
}

impl<T: Transport> AssistantChat<T> {
    /// Creates a conversation opening with the greeting line.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            lines: vec![ChatLine {
                sender: Sender::Assistant,
                text: GREETING.to_string(),
            }],
        }
    }

    /// The transcript so far, oldest first.
    #[must_use]
    pub fn lines(&self) -> &[ChatLine] {
        &self.lines
    }

    /// Sends a prompt and appends both sides to the transcript.
    ///
    /// Returns the assistant's line. Empty or whitespace-only prompts are
    /// ignored and return `None`.
    pub async fn send(&mut self, prompt: &str) -> Option<&ChatLine> {
        if prompt.trim().is_empty() {
            return None;
        }

        self.lines.push(ChatLine {
            sender: Sender::User,
            text: prompt.to_string(),
        });

        let text = match self.transport.assistant_prompt(prompt).await {
            Ok(body) => assistant_reply(&body).unwrap_or_else(|| FALLBACK_REPLY.to_string()),
            Err(error) => {
                tracing::warn!(%error, "assistant prompt failed");
                ERROR_REPLY.to_string()
            }
        };

        self.lines.push(ChatLine {
            sender: Sender::Assistant,
            text,
        });
        self.lines.last()
    }
}
