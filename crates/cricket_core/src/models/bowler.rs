use serde::{Deserialize, Serialize};

use super::BowlerId;
use crate::config::BALLS_PER_OVER;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bowler {
    pub id: BowlerId,
    pub name: String,
    /// Legal deliveries only
    pub balls_bowled: u32,
    pub maidens: u32,
    pub runs_conceded: u32,
    pub wickets: u32,
}

impl Bowler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: BowlerId::new(),
            name: name.into(),
            balls_bowled: 0,
            maidens: 0,
            runs_conceded: 0,
            wickets: 0,
        }
    }

    pub fn completed_overs(&self) -> u32 {
        self.balls_bowled / BALLS_PER_OVER
    }

    /// Overs in cricket notation, e.g. "3.4"
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.completed_overs(), self.balls_bowled % BALLS_PER_OVER)
    }

    /// Runs conceded per six legal balls
    pub fn economy(&self) -> f64 {
        if self.balls_bowled == 0 {
            return 0.0;
        }
        self.runs_conceded as f64 * BALLS_PER_OVER as f64 / self.balls_bowled as f64
    }

    /// "O M R W" figures line
    pub fn figures(&self) -> String {
        format!(
            "{} O, {} M, {} R, {} W",
            self.overs_display(),
            self.maidens,
            self.runs_conceded,
            self.wickets
        )
    }
}
