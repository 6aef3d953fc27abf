//! History record shapes.
//!
//! The wire format is a flat object: an `entry_type` tag plus the fields of
//! whichever answer flow produced the record. Fields belonging to the other
//! flow are absent from the serialized form entirely.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which answer flow produced a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Interview,
    Vision,
}

/// One saved answer. Immutable once inserted — the store only ever creates,
/// lists, and expires records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Unique identifier, minted at insert time.
    pub id: String,
    /// Tags which variant fields below are populated.
    pub entry_type: EntryKind,
    /// Insert timestamp; also the basis for TTL expiry.
    pub created_at: DateTime<Utc>,

    // Interview fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quick_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    // Vision fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_option: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

/// A record as handed to the store, before `id` and `created_at` are
/// assigned. The enum keeps the variant invariant structural: an interview
/// draft cannot carry vision fields and vice versa.
#[derive(Debug, Clone)]
pub enum AnswerDraft {
    Interview {
        transcript: String,
        quick_answer: String,
        full_answer: String,
        position: Option<String>,
        model: Option<String>,
    },
    Vision {
        answer: String,
        selected_option: Option<String>,
        prompt: Option<String>,
        options: Option<Vec<String>>,
    },
}

impl AnswerDraft {
    /// Stamp the draft into a full record.
    pub(crate) fn into_record(self, id: String, created_at: DateTime<Utc>) -> AnswerRecord {
        let mut record = AnswerRecord {
            id,
            entry_type: EntryKind::Interview,
            created_at,
            transcript: None,
            quick_answer: None,
            full_answer: None,
            position: None,
            model: None,
            answer: None,
            selected_option: None,
            prompt: None,
            options: None,
        };
        match self {
            Self::Interview {
                transcript,
                quick_answer,
                full_answer,
                position,
                model,
            } => {
                record.entry_type = EntryKind::Interview;
                record.transcript = Some(transcript);
                record.quick_answer = Some(quick_answer);
                record.full_answer = Some(full_answer);
                record.position = position;
                record.model = model;
            }
            Self::Vision {
                answer,
                selected_option,
                prompt,
                options,
            } => {
                record.entry_type = EntryKind::Vision;
                record.answer = Some(answer);
                record.selected_option = selected_option;
                record.prompt = prompt;
                record.options = options;
            }
        }
        record
    }
}
