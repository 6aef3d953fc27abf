//! Greenroom — AI interview copilot backend.
//!
//! The browser records an audio snippet or screenshot and posts it here;
//! greenroom forwards it to the OpenAI API (Whisper transcription, chat
//! completions, vision), returns formatted answers, and keeps a bounded,
//! time-expiring per-session history of recent answers.

pub mod answers;
pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod providers;

pub use error::{GreenroomError, Result};
