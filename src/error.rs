//! Crate-wide error type and result alias.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GreenroomError>;

/// All failure modes surfaced by greenroom.
///
/// History operations never construct any of these: history is best-effort
/// and degrades silently. Errors come from configuration at startup, the
/// OpenAI API, or unusable client requests.
#[derive(Debug, Error)]
pub enum GreenroomError {
    /// Startup misconfiguration (missing API key, malformed numeric env var).
    #[error("configuration error: {0}")]
    Config(String),

    /// The OpenAI API request failed or returned an unparseable response.
    #[error("provider error: {0}")]
    Provider(String),

    /// The client sent a request the handlers cannot work with
    /// (missing file part, empty upload).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// I/O failure (socket bind, file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GreenroomError::Config("OPENAI_API_KEY is not set".into());
        assert_eq!(
            err.to_string(),
            "configuration error: OPENAI_API_KEY is not set"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::AddrInUse, "busy"))?;
            Ok(())
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, GreenroomError::Io(_)));
    }
}
