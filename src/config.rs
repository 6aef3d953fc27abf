//! Process configuration, read once at startup from the environment.
//!
//! `.env` files are loaded by the binary before [`Settings::from_env`] runs,
//! so every field here can be set either way. The struct is passed to the
//! server by value — there is no ambient global configuration.

use std::time::Duration;

use crate::error::{GreenroomError, Result};

/// Fallback OpenAI model for interview answers.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
/// Fallback OpenAI model for vision questions.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o-mini";
/// Position assumed when the client form omits one.
pub const DEFAULT_POSITION: &str = "Python Developer";

/// Runtime settings for the greenroom server.
#[derive(Debug, Clone)]
pub struct Settings {
    /// OpenAI API key. Empty only in tests; `serve` refuses to start without it.
    pub openai_api_key: String,
    /// Bind address for the HTTP server.
    pub bind: String,
    /// Port for the HTTP server.
    pub port: u16,
    /// How long a history record stays visible after it is written.
    pub history_ttl: Duration,
    /// Per-session history capacity; the oldest record drops beyond this.
    pub history_capacity: usize,
    /// Chat model used for interview answers unless the form overrides it.
    pub default_model: String,
    /// Model used for image questions unless the form overrides it.
    pub vision_model: String,
    /// Position used when the interview form leaves it blank.
    pub default_position: String,
    /// Allowed CORS origins; `["*"]` means any origin.
    pub allow_origins: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            openai_api_key: String::new(),
            bind: "0.0.0.0".to_string(),
            port: 8000,
            history_ttl: Duration::from_secs(60 * 60 * 24),
            history_capacity: 50,
            default_model: DEFAULT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            default_position: DEFAULT_POSITION.to_string(),
            allow_origins: vec!["*".to_string()],
        }
    }
}

impl Settings {
    /// Build settings from environment variables, falling back to defaults.
    ///
    /// Malformed numeric values are a hard error rather than a silent
    /// fallback, so a typo in `HISTORY_TTL_SECONDS` does not quietly turn
    /// into a 24-hour default.
    pub fn from_env() -> Result<Self> {
        let mut settings = Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
            ..Self::default()
        };

        if let Ok(bind) = std::env::var("GREENROOM_BIND") {
            if !bind.is_empty() {
                settings.bind = bind;
            }
        }
        if let Some(port) = parse_env("GREENROOM_PORT")? {
            settings.port = port;
        }
        if let Some(secs) = parse_env::<u64>("HISTORY_TTL_SECONDS")? {
            settings.history_ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = parse_env("HISTORY_MAX_ENTRIES")? {
            settings.history_capacity = capacity;
        }
        if let Ok(model) = std::env::var("DEFAULT_MODEL") {
            if !model.is_empty() {
                settings.default_model = model;
            }
        }
        if let Ok(model) = std::env::var("VISION_MODEL") {
            if !model.is_empty() {
                settings.vision_model = model;
            }
        }
        if let Ok(position) = std::env::var("DEFAULT_POSITION") {
            if !position.is_empty() {
                settings.default_position = position;
            }
        }
        if let Ok(origins) = std::env::var("ALLOW_ORIGINS") {
            let parsed: Vec<String> = origins
                .split(',')
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if !parsed.is_empty() {
                settings.allow_origins = parsed;
            }
        }

        Ok(settings)
    }

    /// Fail unless an OpenAI API key is configured.
    pub fn require_api_key(&self) -> Result<()> {
        if self.openai_api_key.is_empty() {
            return Err(GreenroomError::Config(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse an env var into `T`, treating absence and empty values as `None`.
fn parse_env<T: std::str::FromStr>(name: &str) -> Result<Option<T>> {
    match std::env::var(name) {
        Ok(raw) if !raw.is_empty() => raw.parse::<T>().map(Some).map_err(|_| {
            GreenroomError::Config(format!("{} has an invalid value: {:?}", name, raw))
        }),
        _ => Ok(None),
    }
}
