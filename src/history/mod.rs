//! Per-session answer history with TTL expiry.

pub mod record;
pub mod store;

pub use record::{AnswerDraft, AnswerRecord, EntryKind};
pub use store::HistoryStore;
