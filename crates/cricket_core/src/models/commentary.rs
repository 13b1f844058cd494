//! Commentary log
//!
//! Entries are kept in chronological order. A scoring action reserves its
//! line up front as a placeholder and writes the final text once, after the
//! score has been updated; from then on the entry is immutable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::CommentaryId;
use crate::error::{Result, ScoringError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryEntry {
    pub id: CommentaryId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "finalized_default")]
    pub finalized: bool,
}

fn finalized_default() -> bool {
    true
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentaryLog {
    entries: Vec<CommentaryEntry>,
}

impl CommentaryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finished line.
    pub fn push(&mut self, text: impl Into<String>) -> CommentaryId {
        let entry = CommentaryEntry {
            id: CommentaryId::new(),
            text: text.into(),
            timestamp: Utc::now(),
            finalized: true,
        };
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    /// Reserve a line whose text is written later with [`finalize`](Self::finalize).
    pub fn placeholder(&mut self) -> CommentaryId {
        let entry = CommentaryEntry {
            id: CommentaryId::new(),
            text: String::new(),
            timestamp: Utc::now(),
            finalized: false,
        };
        let id = entry.id;
        self.entries.push(entry);
        id
    }

    pub fn finalize(&mut self, id: CommentaryId, text: impl Into<String>) -> Result<()> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(ScoringError::UnknownCommentary)?;
        if entry.finalized {
            return Err(ScoringError::CommentaryFinalized);
        }
        entry.text = text.into();
        entry.finalized = true;
        Ok(())
    }

    pub fn remove(&mut self, id: CommentaryId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn get(&self, id: CommentaryId) -> Option<&CommentaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Oldest first
    pub fn entries(&self) -> &[CommentaryEntry] {
        &self.entries
    }

    /// Newest first, the order a live feed shows
    pub fn newest_first(&self) -> impl Iterator<Item = &CommentaryEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&CommentaryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Chronological "HH:MM:SS: text" lines joined by newlines. Unwritten
    /// placeholders are skipped.
    pub fn transcript(&self) -> String {
        self.entries
            .iter()
            .filter(|e| e.finalized)
            .map(|e| format!("{}: {}", e.timestamp.format("%H:%M:%S"), e.text))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
