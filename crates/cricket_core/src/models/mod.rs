pub mod batter;
pub mod bowler;
pub mod commentary;
pub mod ids;
pub mod team;

pub use batter::Batter;
pub use bowler::Bowler;
pub use commentary::{CommentaryEntry, CommentaryLog};
pub use ids::{BatterId, BowlerId, CommentaryId};
pub use team::{Side, TeamInnings};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerRole {
    Batter,
    Bowler,
}

impl PlayerRole {
    /// Lower-case noun for use mid-sentence
    pub fn noun(&self) -> &'static str {
        match self {
            PlayerRole::Batter => "batter",
            PlayerRole::Bowler => "bowler",
        }
    }
}

impl std::fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerRole::Batter => write!(f, "Batter"),
            PlayerRole::Bowler => write!(f, "Bowler"),
        }
    }
}
