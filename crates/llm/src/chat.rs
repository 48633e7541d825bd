//! Free-form loan advisor chat

use std::sync::Arc;

use async_trait::async_trait;

use loan_advisor_core::{AdvisorChat, Language, Result, Turn, TurnRole};

use crate::client::{CompletionParams, OpenAiClient};
use crate::prompt::{advisor_system_prompt, Message, Role};

/// Conversational loan advisor backed by the chat completions API
pub struct LoanAdvisorChat {
    client: Arc<OpenAiClient>,
}

impl LoanAdvisorChat {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdvisorChat for LoanAdvisorChat {
    async fn respond(
        &self,
        history: &[Turn],
        message: &str,
        language: Language,
    ) -> Result<String> {
        let mut messages = Vec::with_capacity(history.len() + 3);
        messages.push(Message::system(advisor_system_prompt()));
        messages.push(Message::system(format!(
            "The user's preferred language is {}.",
            language.name()
        )));

        for turn in history {
            messages.push(match turn.role {
                TurnRole::User => Message {
                    role: Role::User,
                    content: turn.content.clone(),
                },
                TurnRole::Agent => Message {
                    role: Role::Assistant,
                    content: turn.content.clone(),
                },
            });
        }

        messages.push(Message::user(message));

        let reply = self
            .client
            .complete(&self.client.chat_model, &messages, CompletionParams::chat())
            .await
            .map_err(loan_advisor_core::Error::from)?;

        Ok(reply)
    }
}
