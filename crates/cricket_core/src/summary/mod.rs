//! # Highlight Summaries
//!
//! Turns the commentary transcript into a short highlights summary through
//! an opaque [`Summarizer`]. The summarizer only sees a copy of the text and
//! never touches match state.

pub mod key_moments;

pub use key_moments::KeyMomentsSummarizer;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::notify::{Notification, Severity};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub commentary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

impl SummaryRequest {
    pub fn new(commentary: impl Into<String>) -> Self {
        Self { commentary: commentary.into() }
    }

    pub fn to_json(&self) -> Result<String, SummaryError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl SummaryResponse {
    pub fn from_json(json: &str) -> Result<Self, SummaryError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Commentary is empty. Please add some commentary first.")]
    EmptyCommentary,

    #[error("Summarization failed: {0}")]
    Failed(String),

    #[error("Malformed summary payload: {0}")]
    Payload(#[from] serde_json::Error),
}

impl SummaryError {
    pub fn to_notification(&self) -> Notification {
        let title = match self {
            SummaryError::EmptyCommentary => "Empty Commentary",
            _ => "Summarization Failed",
        };
        Notification::new(title, self.to_string(), Severity::Error)
    }
}

/// Anything that can turn commentary into a summary: a remote model, a
/// local heuristic, a canned response in tests.
pub trait Summarizer {
    fn summarize(&self, request: &SummaryRequest) -> Result<SummaryResponse, SummaryError>;
}

/// Latest summary and error for a highlights view.
///
/// A failed attempt keeps the previous summary so the scorer can retry
/// without losing it.
#[derive(Debug)]
pub struct HighlightSummarizer<S> {
    summarizer: S,
    summary: Option<String>,
    error: Option<String>,
}

impl<S: Summarizer> HighlightSummarizer<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer, summary: None, error: None }
    }

    pub fn summary(&self) -> Option<&str> {
        self.summary.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Summarize `commentary`, returning the feedback to show the scorer.
    pub fn summarize(&mut self, commentary: &str) -> Notification {
        match self.try_summarize(commentary) {
            Ok(()) => {
                Notification::info("Summary Generated!", "Match highlights have been summarized.")
            }
            Err(e) => {
                log::warn!("Highlight summary failed: {}", e);
                self.error = Some(e.to_string());
                e.to_notification()
            }
        }
    }

    fn try_summarize(&mut self, commentary: &str) -> Result<(), SummaryError> {
        if commentary.trim().is_empty() {
            return Err(SummaryError::EmptyCommentary);
        }
        let response = self.summarizer.summarize(&SummaryRequest::new(commentary))?;
        self.summary = Some(response.summary);
        self.error = None;
        Ok(())
    }
}
