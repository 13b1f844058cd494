//! # cricket_core - Live Cricket Scoring Engine
//!
//! Ball-by-ball scoring for a two-innings limited-overs match.
//!
//! ## Features
//! - Delivery processing with strike rotation, over and innings transitions
//! - Batting and bowling figures, maidens, extras
//! - Single-step undo of the last delivery
//! - Timestamped commentary log with a transcript for highlight summaries
//! - Compressed, checksummed match history

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod notify;
pub mod save;
pub mod summary;

pub use config::{MatchConfig, BALLS_PER_OVER};
pub use engine::{
    Delivery, DeliveryReport, End, InningsStats, MatchEngine, MatchPhase, MatchResult, Outcome,
    WinMargin,
};
pub use error::{Result, ScoringError};
pub use models::{
    Batter, BatterId, Bowler, BowlerId, CommentaryEntry, CommentaryId, CommentaryLog, PlayerRole,
    Side, TeamInnings,
};
pub use notify::{Notification, Severity};
pub use save::{FileHistoryStore, HistoryStore, InMemoryHistoryStore, MatchRecord, SaveError};
pub use summary::{
    HighlightSummarizer, KeyMomentsSummarizer, Summarizer, SummaryError, SummaryRequest,
    SummaryResponse,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
