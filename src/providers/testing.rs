//! In-memory [`LlmProvider`] double for unit tests.
//!
//! Scripted replies pop in order; every request is recorded so tests can
//! assert on the prompts that reached the provider boundary.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::Result;

use super::{AudioClip, CompletionRequest, LlmProvider, VisionRequest};

pub struct StubProvider {
    transcript: String,
    completions: Mutex<VecDeque<String>>,
    vision_replies: Mutex<VecDeque<String>>,
    seen_clips: Mutex<Vec<AudioClip>>,
    seen_completions: Mutex<Vec<CompletionRequest>>,
    seen_visions: Mutex<Vec<VisionRequest>>,
}

impl StubProvider {
    pub fn new() -> Self {
        Self {
            transcript: "stub transcript".to_string(),
            completions: Mutex::new(VecDeque::new()),
            vision_replies: Mutex::new(VecDeque::new()),
            seen_clips: Mutex::new(Vec::new()),
            seen_completions: Mutex::new(Vec::new()),
            seen_visions: Mutex::new(Vec::new()),
        }
    }

    pub fn with_transcript(mut self, transcript: impl Into<String>) -> Self {
        self.transcript = transcript.into();
        self
    }

    pub fn with_completions<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.completions
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(Into::into));
        self
    }

    pub fn with_vision_replies<I, S>(self, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.vision_replies
            .lock()
            .unwrap()
            .extend(replies.into_iter().map(Into::into));
        self
    }

    pub fn seen_clips(&self) -> Vec<AudioClip> {
        self.seen_clips.lock().unwrap().clone()
    }

    pub fn seen_completions(&self) -> Vec<CompletionRequest> {
        self.seen_completions.lock().unwrap().clone()
    }

    pub fn seen_visions(&self) -> Vec<VisionRequest> {
        self.seen_visions.lock().unwrap().clone()
    }
}

impl Default for StubProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for StubProvider {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String> {
        self.seen_clips.lock().unwrap().push(clip.clone());
        Ok(self.transcript.clone())
    }

    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        self.seen_completions.lock().unwrap().push(request);
        Ok(self
            .completions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "stub answer".to_string()))
    }

    async fn vision(&self, request: VisionRequest) -> Result<String> {
        self.seen_visions.lock().unwrap().push(request);
        Ok(self
            .vision_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "stub vision answer".to_string()))
    }
}
