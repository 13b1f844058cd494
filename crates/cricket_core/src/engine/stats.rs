//! Live innings statistics for score views.

use serde::{Deserialize, Serialize};

use super::MatchEngine;
use crate::config::BALLS_PER_OVER;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InningsStats {
    pub score: String,
    pub overs: String,
    pub run_rate: f64,
    pub target: Option<u32>,
    pub runs_needed: Option<u32>,
    pub balls_remaining: u32,
    /// None without a target or with no balls left
    pub required_rate: Option<f64>,
}

/// Runs per over.
pub fn run_rate(runs: u32, legal_balls: u32) -> f64 {
    if legal_balls == 0 {
        return 0.0;
    }
    runs as f64 * BALLS_PER_OVER as f64 / legal_balls as f64
}

impl MatchEngine {
    /// Figures for the side currently batting.
    pub fn innings_stats(&self) -> InningsStats {
        let team = self.batting_team();
        let legal_balls = team.legal_balls();
        let balls_remaining = self.config.max_legal_balls().saturating_sub(legal_balls);
        let target = self.target();
        let runs_needed = target.map(|t| t.saturating_sub(team.runs));

        let required_rate = match runs_needed {
            None => None,
            Some(0) => Some(0.0),
            Some(_) if balls_remaining == 0 => None,
            Some(needed) => Some(run_rate(needed, balls_remaining)),
        };

        InningsStats {
            score: team.score_line(),
            overs: team.overs_display(),
            run_rate: run_rate(team.runs, legal_balls),
            target,
            runs_needed,
            balls_remaining,
            required_rate,
        }
    }
}
