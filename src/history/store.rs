//! In-memory session history with TTL expiry and bounded capacity.
//!
//! Sessions are partition keys minted by the browser and carried on the
//! `X-Session-Id` header; the store treats them as opaque strings. Each
//! session maps to a newest-first list of answer records. Expired records
//! are purged lazily on the next read of their session, and a session whose
//! list drains to empty is dropped from the map.
//!
//! Every operation is infallible: history is a best-effort convenience, so
//! capacity pressure drops the oldest record silently instead of failing
//! the write.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use super::record::{AnswerDraft, AnswerRecord};

/// A record plus its precomputed expiry instant.
#[derive(Debug, Clone)]
struct StoredRecord {
    record: AnswerRecord,
    expires_at: DateTime<Utc>,
}

/// Process-wide answer history, shared across request handlers as
/// `Arc<HistoryStore>`.
///
/// A single mutex serializes writes against the purge-on-read mutation in
/// [`list`](Self::list); no lock is ever held across an await point.
pub struct HistoryStore {
    ttl: chrono::Duration,
    capacity: usize,
    sessions: Mutex<HashMap<String, VecDeque<StoredRecord>>>,
}

impl HistoryStore {
    /// Create a store with the given retention window and per-session
    /// capacity. `capacity` is clamped to a minimum of 1.
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX);
        Self {
            ttl,
            capacity: capacity.max(1),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Append a record to a session, stamping `id` and `created_at`.
    ///
    /// The session list is created lazily on first write. When the list is
    /// at capacity the oldest record is dropped. An empty `session_id`
    /// skips persistence entirely — the primary answer response must not
    /// depend on history bookkeeping.
    pub fn put(&self, session_id: &str, draft: AnswerDraft) {
        if session_id.is_empty() {
            warn!("missing session id, skipping history persistence");
            return;
        }

        let created_at = Utc::now();
        let record = draft.into_record(Uuid::new_v4().to_string(), created_at);
        let expires_at = created_at
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        debug!(session = %session_id, id = %record.id, "recording history entry");

        let mut sessions = self.lock_sessions();
        let entries = sessions.entry(session_id.to_string()).or_default();
        entries.push_front(StoredRecord { record, expires_at });
        while entries.len() > self.capacity {
            if let Some(dropped) = entries.pop_back() {
                debug!(session = %session_id, id = %dropped.record.id, "history at capacity, dropping oldest entry");
            }
        }
    }

    /// Return a session's live records, most recent first.
    ///
    /// Purges expired records as a side effect. An unknown or fully-expired
    /// session yields an empty list, never an error.
    pub fn list(&self, session_id: &str) -> Vec<AnswerRecord> {
        if session_id.is_empty() {
            return Vec::new();
        }

        let now = Utc::now();
        let mut sessions = self.lock_sessions();
        let Some(entries) = sessions.get_mut(session_id) else {
            return Vec::new();
        };

        entries.retain(|stored| stored.expires_at > now);
        if entries.is_empty() {
            sessions.remove(session_id);
            return Vec::new();
        }
        entries.iter().map(|stored| stored.record.clone()).collect()
    }

    /// Number of sessions currently holding at least one record, expired
    /// or not. Purging happens on [`list`](Self::list), not here.
    pub fn session_count(&self) -> usize {
        self.lock_sessions().len()
    }

    fn lock_sessions(&self) -> std::sync::MutexGuard<'_, HashMap<String, VecDeque<StoredRecord>>> {
        // A panic while holding the lock cannot leave a half-inserted
        // record, so recover from poisoning instead of propagating it.
        self.sessions
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn interview_draft(transcript: &str) -> AnswerDraft {
        AnswerDraft::Interview {
            transcript: transcript.into(),
            quick_answer: "Hi".into(),
            full_answer: "Hi there".into(),
            position: None,
            model: None,
        }
    }

    fn test_store() -> HistoryStore {
        HistoryStore::new(Duration::from_secs(3600), 50)
    }

    /// Backdate every record in a session by `secs`, as if it had been
    /// written that long ago.
    fn backdate(store: &HistoryStore, session: &str, secs: i64) {
        let mut sessions = store.sessions.lock().unwrap();
        for stored in sessions.get_mut(session).unwrap().iter_mut() {
            stored.record.created_at -= chrono::Duration::seconds(secs);
            stored.expires_at -= chrono::Duration::seconds(secs);
        }
    }

    #[test]
    fn test_round_trip() {
        let store = test_store();
        store.put("abc", interview_draft("hello"));

        let entries = store.list("abc");
        assert_eq!(entries.len(), 1);
        let entry = &entries[0];
        assert_eq!(entry.entry_type, crate::history::EntryKind::Interview);
        assert_eq!(entry.transcript.as_deref(), Some("hello"));
        assert_eq!(entry.quick_answer.as_deref(), Some("Hi"));
        assert_eq!(entry.full_answer.as_deref(), Some("Hi there"));
        assert!(!entry.id.is_empty());
        assert!(Utc::now() - entry.created_at < chrono::Duration::seconds(1));
    }

    #[test]
    fn test_list_newest_first() {
        let store = test_store();
        for i in 0..3 {
            store.put("s", interview_draft(&format!("question {i}")));
        }

        let entries = store.list("s");
        let transcripts: Vec<&str> = entries
            .iter()
            .map(|e| e.transcript.as_deref().unwrap())
            .collect();
        assert_eq!(transcripts, vec!["question 2", "question 1", "question 0"]);
        // Insertion order breaks timestamp ties, so ordering stays strict
        // even when all three writes land in the same instant.
        assert!(entries.windows(2).all(|w| w[0].created_at >= w[1].created_at));
    }

    #[test]
    fn test_expired_records_purged_on_read() {
        let store = HistoryStore::new(Duration::from_secs(3600), 50);
        store.put("s", interview_draft("old"));
        store.put("s", interview_draft("fresh"));

        // Age only the older record past the TTL.
        {
            let mut sessions = store.sessions.lock().unwrap();
            let entries = sessions.get_mut("s").unwrap();
            let oldest = entries.back_mut().unwrap();
            oldest.expires_at = Utc::now() - chrono::Duration::seconds(1);
        }

        let entries = store.list("s");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transcript.as_deref(), Some("fresh"));
    }

    #[test]
    fn test_record_survives_until_ttl() {
        let store = HistoryStore::new(Duration::from_secs(3600), 50);
        store.put("s", interview_draft("still here"));
        backdate(&store, "s", 3599);
        assert_eq!(store.list("s").len(), 1);

        backdate(&store, "s", 2);
        assert!(store.list("s").is_empty());
    }

    #[test]
    fn test_sessions_are_isolated() {
        let store = test_store();
        store.put("alice", interview_draft("hers"));
        store.put("bob", interview_draft("his"));

        let alice = store.list("alice");
        assert_eq!(alice.len(), 1);
        assert_eq!(alice[0].transcript.as_deref(), Some("hers"));
        assert_eq!(store.list("bob").len(), 1);
    }

    #[test]
    fn test_unknown_session_is_empty_not_error() {
        let store = test_store();
        assert!(store.list("never-written").is_empty());
    }

    #[test]
    fn test_empty_session_id_is_noop() {
        let store = test_store();
        store.put("", interview_draft("dropped"));
        assert_eq!(store.session_count(), 0);
        assert!(store.list("").is_empty());
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let store = HistoryStore::new(Duration::from_secs(3600), 3);
        for i in 0..5 {
            store.put("s", interview_draft(&format!("q{i}")));
        }

        let entries = store.list("s");
        assert_eq!(entries.len(), 3);
        let transcripts: Vec<&str> = entries
            .iter()
            .map(|e| e.transcript.as_deref().unwrap())
            .collect();
        assert_eq!(transcripts, vec!["q4", "q3", "q2"]);
    }

    #[test]
    fn test_capacity_zero_clamped_to_one() {
        let store = HistoryStore::new(Duration::from_secs(3600), 0);
        store.put("s", interview_draft("a"));
        store.put("s", interview_draft("b"));
        let entries = store.list("s");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].transcript.as_deref(), Some("b"));
    }

    #[test]
    fn test_drained_session_removed_from_map() {
        let store = test_store();
        store.put("s", interview_draft("ephemeral"));
        assert_eq!(store.session_count(), 1);

        backdate(&store, "s", 7200);
        assert!(store.list("s").is_empty());
        assert_eq!(store.session_count(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_puts_lose_nothing() {
        let store = Arc::new(HistoryStore::new(Duration::from_secs(3600), 200));

        let mut handles = Vec::new();
        for i in 0..100 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.put("shared", interview_draft(&format!("q{i}")));
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let entries = store.list("shared");
        assert_eq!(entries.len(), 100);
        // Every record is distinct — no torn or overwritten inserts.
        let mut ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }
}
