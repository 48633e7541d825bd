//! Conversation controller for the guided application flow

use std::sync::Arc;

use loan_advisor_core::{
    Language, LoanClassifier, LoanType, Translator, Turn, UnderstandingCheck,
};

use crate::steps::{self, StepDefinition, STEP_COUNT};

/// Keywords that signal the user wants the long-form step content
const DETAIL_KEYWORDS: [&str; 5] = ["more", "detail", "explain", "what", "how"];

/// Mutable per-session conversation state
///
/// Owned by the controller for the lifetime of one session. `loan_type`
/// never changes once set, and `step_index` only ever moves forward.
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub loan_type: Option<LoanType>,
    pub step_index: usize,
    pub language: Language,
    pub history: Vec<Turn>,
}

impl ConversationState {
    pub fn new(language: Language) -> Self {
        Self {
            loan_type: None,
            step_index: 0,
            language,
            history: Vec::new(),
        }
    }

    /// 1-based step number for display, present once a loan type is set
    pub fn display_step(&self) -> Option<usize> {
        self.loan_type.map(|_| self.step_index + 1)
    }

    fn push_turn(&mut self, turn: Turn, limit: usize) {
        self.history.push(turn);
        if self.history.len() > limit {
            let excess = self.history.len() - limit;
            self.history.drain(..excess);
        }
    }
}

/// One controller reply along with the state it reflects
#[derive(Debug, Clone)]
pub struct GuidanceReply {
    pub text: String,
    pub loan_type: Option<LoanType>,
    /// 1-based step number, once a loan type is assigned
    pub step: Option<usize>,
}

/// Drives the scripted application flow over the LLM-backed classifiers
///
/// All collaborator failures degrade instead of erroring: an unreadable
/// loan type asks for clarification, an unreadable understanding check
/// counts as understood, and a failed translation falls back to the
/// English text.
pub struct GuidanceController {
    classifier: Arc<dyn LoanClassifier>,
    understanding: Arc<dyn UnderstandingCheck>,
    translator: Arc<dyn Translator>,
    history_limit: usize,
}

impl GuidanceController {
    pub fn new(
        classifier: Arc<dyn LoanClassifier>,
        understanding: Arc<dyn UnderstandingCheck>,
        translator: Arc<dyn Translator>,
        history_limit: usize,
    ) -> Self {
        Self {
            classifier,
            understanding,
            translator,
            history_limit: history_limit.max(1),
        }
    }

    /// Greeting for a newly opened session, in the session language
    pub async fn greeting(&self, language: Language) -> String {
        self.localize(steps::GREETING.to_string(), language).await
    }

    /// Process one user utterance and produce the agent reply
    pub async fn handle_message(
        &self,
        state: &mut ConversationState,
        message: &str,
    ) -> GuidanceReply {
        state.push_turn(Turn::user(message), self.history_limit);

        let reply = match state.loan_type {
            None => self.assign_loan_type(state, message).await,
            Some(loan_type) => self.advance_script(state, loan_type, message).await,
        };

        let text = self.localize(reply, state.language).await;
        state.push_turn(Turn::agent(text.clone()), self.history_limit);

        GuidanceReply {
            text,
            loan_type: state.loan_type,
            step: state.display_step(),
        }
    }

    /// Classify the loan type from the first substantive utterance
    async fn assign_loan_type(&self, state: &mut ConversationState, message: &str) -> String {
        let detected = match self.classifier.classify(message, state.language).await {
            Ok(detected) => detected,
            Err(e) => {
                tracing::warn!(error = %e, "loan type classification failed, asking again");
                None
            }
        };

        match detected {
            Some(loan_type) => {
                state.loan_type = Some(loan_type);
                state.step_index = 0;
                tracing::info!(loan_type = %loan_type, "loan type assigned");

                let first = &steps_at(loan_type, 0);
                format!(
                    "Great! You've selected a {}. Let's start the application process. {}",
                    loan_type.display_name(),
                    compose_step(first, 0, false),
                )
            }
            None => steps::CLARIFICATION.to_string(),
        }
    }

    /// Step progression once a loan type is fixed
    async fn advance_script(
        &self,
        state: &mut ConversationState,
        loan_type: LoanType,
        message: &str,
    ) -> String {
        let wants_detail = requests_detail(message);

        let understood = match self.understanding.confirmed(message, state.language).await {
            Ok(understood) => understood,
            Err(e) => {
                tracing::warn!(error = %e, "understanding check failed, assuming understood");
                true
            }
        };

        if !understood {
            let step = steps_at(loan_type, state.step_index);
            return format!(
                "Let me explain that again. {}",
                compose_step(&step, state.step_index, true)
            );
        }

        if state.step_index + 1 >= STEP_COUNT {
            // Final step stays final; repeated confirmations never advance.
            return steps::COMPLETION.to_string();
        }

        state.step_index += 1;
        let step = steps_at(loan_type, state.step_index);
        compose_step(&step, state.step_index, wants_detail)
    }

    /// Translate to the session language, falling back to the source text
    async fn localize(&self, text: String, language: Language) -> String {
        if language.is_base() {
            return text;
        }
        match self.translator.translate(&text, language).await {
            Ok(translated) => translated,
            Err(e) => {
                tracing::warn!(error = %e, language = language.code(), "translation failed, replying in English");
                text
            }
        }
    }
}

fn steps_at(loan_type: LoanType, step_index: usize) -> StepDefinition {
    steps::steps_for(loan_type)[step_index.min(STEP_COUNT - 1)]
}

/// Render one step: summary, optional detail, then either the
/// understanding question or the completion message
fn compose_step(step: &StepDefinition, step_index: usize, with_detail: bool) -> String {
    let mut text = format!("{}: {}", step.title, step.summary);
    if with_detail {
        text.push_str("\n\nHere are more details: ");
        text.push_str(step.detail);
    }
    text.push_str("\n\n");
    if step_index + 1 < STEP_COUNT {
        text.push_str(steps::understanding_question(step_index));
    } else {
        text.push_str(steps::COMPLETION);
    }
    text
}

fn requests_detail(message: &str) -> bool {
    let lowered = message.to_lowercase();
    DETAIL_KEYWORDS.iter().any(|kw| lowered.contains(kw))
}
