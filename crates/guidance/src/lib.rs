//! Guided loan-application conversation
//!
//! A scripted walk through the eight steps of a loan application. The
//! controller classifies the user's loan type, checks understanding
//! after each step, and advances through the static step tables,
//! translating replies into the session language. Every external call
//! on the path fails open so the conversation always produces a reply.

pub mod controller;
pub mod steps;

pub use controller::{ConversationState, GuidanceController, GuidanceReply};
pub use steps::{steps_for, StepDefinition, STEP_COUNT};
