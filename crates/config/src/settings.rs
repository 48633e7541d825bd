//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// LLM completion API configuration
    #[serde(default)]
    pub llm: LlmConfig,

    /// Speech API (STT/TTS) configuration
    #[serde(default)]
    pub speech: SpeechConfig,

    /// Turn-taking recorder configuration
    #[serde(default)]
    pub recorder: RecorderConfig,

    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.recorder.base_timeout_ms > self.recorder.max_timeout_ms {
            return Err(ConfigError::InvalidValue {
                field: "recorder.base_timeout_ms".to_string(),
                message: "base timeout exceeds max timeout".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&self.recorder.energy_threshold) {
            return Err(ConfigError::InvalidValue {
                field: "recorder.energy_threshold".to_string(),
                message: "energy threshold must be within [0, 1]".to_string(),
            });
        }

        if self.session.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "session.history_limit".to_string(),
                message: "history limit must be at least 1".to_string(),
            });
        }

        if self.llm.api_key.is_empty() {
            tracing::warn!("llm.api_key is empty; LLM calls will fail and fall back");
        }
        if self.speech.api_key.is_empty() {
            tracing::warn!("speech.api_key is empty; STT/TTS calls will fail and fall back");
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Enable permissive CORS
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: default_true(),
        }
    }
}

/// LLM completion API configuration (OpenAI-compatible)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// API base URL
    #[serde(default = "default_llm_base_url")]
    pub base_url: String,

    /// API key (set via LOAN_ADVISOR__LLM__API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// Model for free-form advisor chat
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model for translation, classification, and summarization
    #[serde(default = "default_utility_model")]
    pub utility_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

fn default_llm_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_chat_model() -> String {
    "gpt-4".to_string()
}
fn default_utility_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_llm_base_url(),
            api_key: String::new(),
            chat_model: default_chat_model(),
            utility_model: default_utility_model(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

/// Speech API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// API base URL
    #[serde(default = "default_speech_base_url")]
    pub base_url: String,

    /// API subscription key (set via LOAN_ADVISOR__SPEECH__API_KEY)
    #[serde(default)]
    pub api_key: String,

    /// STT model name
    #[serde(default = "default_stt_model")]
    pub stt_model: String,

    /// TTS speaker voice
    #[serde(default = "default_tts_speaker")]
    pub tts_speaker: String,

    /// TTS speaking pace
    #[serde(default = "default_pace")]
    pub tts_pace: f32,

    /// TTS loudness
    #[serde(default = "default_pace")]
    pub tts_loudness: f32,

    /// Maximum characters per TTS chunk
    #[serde(default = "default_tts_chunk_chars")]
    pub tts_chunk_chars: usize,

    /// Request timeout in seconds
    #[serde(default = "default_speech_timeout")]
    pub timeout_seconds: u64,
}

fn default_speech_base_url() -> String {
    "https://api.sarvam.ai".to_string()
}
fn default_stt_model() -> String {
    "saarika:v2".to_string()
}
fn default_tts_speaker() -> String {
    "meera".to_string()
}
fn default_pace() -> f32 {
    1.0
}
fn default_tts_chunk_chars() -> usize {
    200
}
fn default_speech_timeout() -> u64 {
    30
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            base_url: default_speech_base_url(),
            api_key: String::new(),
            stt_model: default_stt_model(),
            tts_speaker: default_tts_speaker(),
            tts_pace: default_pace(),
            tts_loudness: default_pace(),
            tts_chunk_chars: default_tts_chunk_chars(),
            timeout_seconds: default_speech_timeout(),
        }
    }
}

/// Turn-taking recorder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Mean-absolute-amplitude threshold for the speaking state
    #[serde(default = "default_energy_threshold")]
    pub energy_threshold: f32,

    /// Silence hang before an utterance is emitted, in milliseconds
    #[serde(default = "default_silence_hang")]
    pub silence_hang_ms: u64,

    /// Hard timeout floor, in milliseconds
    #[serde(default = "default_base_timeout")]
    pub base_timeout_ms: u64,

    /// Additional timeout per word of the previous agent reply
    #[serde(default = "default_per_word_timeout")]
    pub per_word_timeout_ms: u64,

    /// Hard timeout ceiling, in milliseconds
    #[serde(default = "default_max_timeout")]
    pub max_timeout_ms: u64,
}

fn default_energy_threshold() -> f32 {
    0.02
}
fn default_silence_hang() -> u64 {
    800
}
fn default_base_timeout() -> u64 {
    5_000
}
fn default_per_word_timeout() -> u64 {
    200
}
fn default_max_timeout() -> u64 {
    30_000
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            energy_threshold: default_energy_threshold(),
            silence_hang_ms: default_silence_hang(),
            base_timeout_ms: default_base_timeout(),
            per_word_timeout_ms: default_per_word_timeout(),
            max_timeout_ms: default_max_timeout(),
        }
    }
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Maximum concurrent sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Inactivity timeout in seconds
    #[serde(default = "default_session_timeout")]
    pub timeout_seconds: u64,

    /// Cleanup sweep interval in seconds
    #[serde(default = "default_cleanup_interval")]
    pub cleanup_interval_seconds: u64,

    /// Maximum retained history entries per conversation
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// History entries handed to the LLM per chat request
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_max_sessions() -> usize {
    100
}
fn default_session_timeout() -> u64 {
    3_600
}
fn default_cleanup_interval() -> u64 {
    300
}
fn default_history_limit() -> usize {
    10
}
fn default_history_window() -> usize {
    5
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            timeout_seconds: default_session_timeout(),
            cleanup_interval_seconds: default_cleanup_interval(),
            history_limit: default_history_limit(),
            history_window: default_history_window(),
        }
    }
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (LOAN_ADVISOR_ prefix)
/// 2. config/{env}.yaml (if env specified)
/// 3. config/default.yaml
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("LOAN_ADVISOR")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
