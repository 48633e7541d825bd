//! LLM-backed utterance classification
//!
//! Two classifiers drive the guided conversation: loan-type detection
//! and the per-step understanding check. Non-English utterances are
//! translated to English before classification; a failed translation
//! falls back to the raw utterance rather than aborting.

use std::sync::Arc;

use async_trait::async_trait;

use loan_advisor_core::{Language, LoanClassifier, LoanType, Result, UnderstandingCheck};

use crate::client::{CompletionParams, OpenAiClient};
use crate::prompt::Message;
use crate::translate::LlmTranslator;

const LOAN_TYPE_PROMPT: &str = "You are a helpful assistant that categorizes loan inquiries. \
    Analyze the user message and determine which type of loan they are interested in. \
    The options are: home, personal, business, education, vehicle. \
    Only respond with one of these loan types as a single word, or \"unknown\" if you \
    cannot determine the loan type.";

const UNDERSTANDING_PROMPT: &str = "You are a helpful assistant that analyzes user responses \
    to determine if they understood an explanation. Analyze the user message and determine \
    if they indicate understanding or if they need more explanation. \
    Only respond with \"yes\" if they understood or \"no\" if they need more explanation.";

/// Normalize a possibly non-English utterance to English classifier input
async fn classifier_input(translator: &LlmTranslator, message: &str, language: Language) -> String {
    match translator.to_english(message, language).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "pre-classification translation failed, using raw utterance");
            message.to_string()
        }
    }
}

/// Loan-type classifier backed by the chat completions API
pub struct LlmLoanClassifier {
    client: Arc<OpenAiClient>,
    translator: LlmTranslator,
}

impl LlmLoanClassifier {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            translator: LlmTranslator::new(Arc::clone(&client)),
            client,
        }
    }
}

#[async_trait]
impl LoanClassifier for LlmLoanClassifier {
    async fn classify(&self, message: &str, language: Language) -> Result<Option<LoanType>> {
        let input = classifier_input(&self.translator, message, language).await;

        let messages = [Message::system(LOAN_TYPE_PROMPT), Message::user(input)];
        let reply = self
            .client
            .complete(
                &self.client.utility_model,
                &messages,
                CompletionParams::utility(10),
            )
            .await
            .map_err(loan_advisor_core::Error::from)?;

        Ok(reply.parse::<LoanType>().ok())
    }
}

/// Understanding-check classifier backed by the chat completions API
pub struct LlmUnderstandingCheck {
    client: Arc<OpenAiClient>,
    translator: LlmTranslator,
}

impl LlmUnderstandingCheck {
    pub fn new(client: Arc<OpenAiClient>) -> Self {
        Self {
            translator: LlmTranslator::new(Arc::clone(&client)),
            client,
        }
    }
}

#[async_trait]
impl UnderstandingCheck for LlmUnderstandingCheck {
    async fn confirmed(&self, message: &str, language: Language) -> Result<bool> {
        let input = classifier_input(&self.translator, message, language).await;

        let messages = [Message::system(UNDERSTANDING_PROMPT), Message::user(input)];
        let reply = self
            .client
            .complete(
                &self.client.utility_model,
                &messages,
                CompletionParams::utility(10),
            )
            .await
            .map_err(loan_advisor_core::Error::from)?;

        Ok(reply.trim().eq_ignore_ascii_case("yes"))
    }
}
