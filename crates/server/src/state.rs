//! Application state shared across handlers

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use loan_advisor_config::Settings;
use loan_advisor_core::{AdvisorChat, SpeechToText, Summarizer, TextToSpeech, Turn};
use loan_advisor_guidance::GuidanceController;
use loan_advisor_llm::{
    LlmLoanClassifier, LlmSummarizer, LlmTranslator, LlmUnderstandingCheck, LoanAdvisorChat,
    OpenAiClient,
};
use loan_advisor_speech::{SarvamStt, SarvamTts};

use crate::session::SessionManager;
use crate::ServerError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    pub sessions: Arc<SessionManager>,
    pub controller: Arc<GuidanceController>,
    pub advisor: Arc<dyn AdvisorChat>,
    pub summarizer: Arc<dyn Summarizer>,
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
    pub chat_history: Arc<ChatHistoryStore>,
}

impl AppState {
    /// Wire up the production services from configuration
    pub fn new(config: Settings) -> Result<Self, ServerError> {
        let client = Arc::new(
            OpenAiClient::new(&config.llm).map_err(|e| ServerError::Internal(e.to_string()))?,
        );

        let controller = GuidanceController::new(
            Arc::new(LlmLoanClassifier::new(Arc::clone(&client))),
            Arc::new(LlmUnderstandingCheck::new(Arc::clone(&client))),
            Arc::new(LlmTranslator::new(Arc::clone(&client))),
            config.session.history_limit,
        );

        let advisor = Arc::new(LoanAdvisorChat::new(Arc::clone(&client)));
        let summarizer = Arc::new(LlmSummarizer::new(Arc::clone(&client)));
        let stt = Arc::new(
            SarvamStt::new(&config.speech).map_err(|e| ServerError::Internal(e.to_string()))?,
        );
        let tts = Arc::new(
            SarvamTts::new(&config.speech).map_err(|e| ServerError::Internal(e.to_string()))?,
        );

        Ok(Self::with_services(
            config, controller, advisor, summarizer, stt, tts,
        ))
    }

    /// Assemble state from explicit service implementations
    pub fn with_services(
        config: Settings,
        controller: GuidanceController,
        advisor: Arc<dyn AdvisorChat>,
        summarizer: Arc<dyn Summarizer>,
        stt: Arc<dyn SpeechToText>,
        tts: Arc<dyn TextToSpeech>,
    ) -> Self {
        let sessions = Arc::new(SessionManager::with_config(
            config.session.max_sessions,
            Duration::from_secs(config.session.timeout_seconds),
            Duration::from_secs(config.session.cleanup_interval_seconds),
        ));
        let chat_history = Arc::new(ChatHistoryStore::new(
            config.session.history_limit,
            config.session.history_window,
        ));

        Self {
            config: Arc::new(config),
            sessions,
            controller: Arc::new(controller),
            advisor,
            summarizer,
            stt,
            tts,
            chat_history,
        }
    }
}

/// Per-user chat history for the free-form advisor endpoint
///
/// Retains the most recent `limit` turns per user and hands the last
/// `window` of them to the LLM on each request.
pub struct ChatHistoryStore {
    inner: RwLock<HashMap<String, Vec<Turn>>>,
    limit: usize,
    window: usize,
}

impl ChatHistoryStore {
    pub fn new(limit: usize, window: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
            limit: limit.max(1),
            window: window.max(1),
        }
    }

    /// Most recent turns for the user, up to the LLM window
    pub fn recent(&self, user_id: &str) -> Vec<Turn> {
        let inner = self.inner.read();
        match inner.get(user_id) {
            Some(turns) => {
                let start = turns.len().saturating_sub(self.window);
                turns[start..].to_vec()
            }
            None => Vec::new(),
        }
    }

    /// Append a user/agent exchange, trimming to the retention limit
    pub fn record(&self, user_id: &str, message: &str, response: &str) {
        let mut inner = self.inner.write();
        let turns = inner.entry(user_id.to_string()).or_default();
        turns.push(Turn::user(message));
        turns.push(Turn::agent(response));
        if turns.len() > self.limit {
            let excess = turns.len() - self.limit;
            turns.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_window_and_limit() {
        let store = ChatHistoryStore::new(10, 5);
        for i in 0..8 {
            store.record("u1", &format!("q{i}"), &format!("a{i}"));
        }

        let all_recent = store.recent("u1");
        assert_eq!(all_recent.len(), 5);
        // 16 turns recorded, trimmed to 10, window shows the last 5
        assert_eq!(all_recent.last().unwrap().content, "a7");
    }

    #[test]
    fn test_unknown_user_has_no_history() {
        let store = ChatHistoryStore::new(10, 5);
        assert!(store.recent("nobody").is_empty());
    }
}
