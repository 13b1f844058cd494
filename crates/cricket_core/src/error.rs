use thiserror::Error;

use crate::models::PlayerRole;
use crate::notify::{Notification, Severity};

/// Every way a scoring operation can be refused.
///
/// All variants are recoverable: the engine state is untouched when one is
/// returned, and the caller is expected to surface it as user feedback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error("Please select a bowler.")]
    NeedsBowler,

    #[error("Please select the batter on strike.")]
    NeedsStriker,

    #[error("{team}'s innings is over.")]
    InningsOver { team: String },

    #[error("The match has already been decided.")]
    MatchComplete,

    #[error("Cannot start the next innings: {team} are still batting.")]
    InningsInProgress { team: String },

    #[error("{role} name cannot be empty.")]
    EmptyName { role: PlayerRole },

    #[error("A {} named '{name}' already exists.", .role.noun())]
    DuplicateName { role: PlayerRole, name: String },

    #[error("Batting lineup is full ({max} batters).")]
    LineupFull { max: u32 },

    #[error("Bowling roster is full ({max} bowlers).")]
    RosterFull { max: u32 },

    #[error("Batter does not exist.")]
    UnknownBatter,

    #[error("Bowler does not exist.")]
    UnknownBowler,

    #[error("{name} is already out.")]
    BatterOut { name: String },

    #[error("{name} cannot be at both ends.")]
    SameBatterBothEnds { name: String },

    #[error("{name} bowled the previous over.")]
    ConsecutiveOvers { name: String },

    #[error("{name} is in the middle of an over.")]
    BowlerLocked { name: String },

    #[error("Invalid delivery: {0}")]
    InvalidDelivery(&'static str),

    #[error("No action to undo.")]
    NothingToUndo,

    #[error("Match settings cannot change once the match has started.")]
    ConfigLocked,

    #[error("Invalid match settings: {0}")]
    InvalidConfig(String),

    #[error("Commentary text cannot be empty.")]
    EmptyCommentary,

    #[error("Commentary entry does not exist.")]
    UnknownCommentary,

    #[error("Commentary entry has already been finalized.")]
    CommentaryFinalized,
}

impl ScoringError {
    /// Short heading used when the error is shown to the scorer.
    pub fn title(&self) -> &'static str {
        match self {
            ScoringError::NeedsBowler => "Bowler Needed",
            ScoringError::NeedsStriker => "Striker Needed",
            ScoringError::InningsOver { .. } => "Innings Over",
            ScoringError::MatchComplete => "Match Concluded",
            ScoringError::InningsInProgress { .. } => "Innings In Progress",
            ScoringError::EmptyName { .. } => "Invalid Name",
            ScoringError::DuplicateName { .. } => "Duplicate Name",
            ScoringError::LineupFull { .. } => "Lineup Full",
            ScoringError::RosterFull { .. } => "Bowling Roster Full",
            ScoringError::UnknownBatter
            | ScoringError::BatterOut { .. }
            | ScoringError::SameBatterBothEnds { .. } => "Invalid Selection",
            ScoringError::UnknownBowler => "Unknown Bowler",
            ScoringError::ConsecutiveOvers { .. } => "Consecutive Overs Not Allowed",
            ScoringError::BowlerLocked { .. } => "Bowler Locked",
            ScoringError::InvalidDelivery(_) => "Invalid Delivery",
            ScoringError::NothingToUndo => "Cannot Undo",
            ScoringError::ConfigLocked => "Settings Locked",
            ScoringError::InvalidConfig(_) => "Invalid Settings",
            ScoringError::EmptyCommentary
            | ScoringError::UnknownCommentary
            | ScoringError::CommentaryFinalized => "Commentary Error",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            ScoringError::InningsOver { .. }
            | ScoringError::MatchComplete
            | ScoringError::InningsInProgress { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn to_notification(&self) -> Notification {
        Notification::new(self.title(), self.to_string(), self.severity())
    }
}

pub type Result<T> = std::result::Result<T, ScoringError>;
