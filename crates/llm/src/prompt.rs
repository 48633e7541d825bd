//! Chat message types for completion requests

use std::fmt;

use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// System prompt for the free-form loan advisor chat
pub fn advisor_system_prompt() -> &'static str {
    r#"You are a friendly and knowledgeable loan advisor. Your role is to:
1. Guide users through loan options in their preferred language
2. Explain financial concepts in simple terms
3. Collect necessary information for loan assessment
4. Provide personalized advice
5. Maintain a conversational tone

Key behaviors:
- Ask one question at a time
- Explain complex terms
- Be patient and supportive
- Provide clear next steps
- Maintain professional yet friendly tone
- Always respond in the user's preferred language"#
}
