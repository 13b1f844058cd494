use serde::{Deserialize, Serialize};

use super::BatterId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batter {
    pub id: BatterId,
    pub name: String,
    pub runs: u32,
    pub balls_faced: u32,
    pub fours: u32,
    pub sixes: u32,
    pub is_out: bool,
    /// Dismissal description, e.g. "b Starc"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_out: Option<String>,
    /// Batting order, starting at 1
    pub order: u32,
}

impl Batter {
    pub fn new(name: impl Into<String>, order: u32) -> Self {
        Self {
            id: BatterId::new(),
            name: name.into(),
            runs: 0,
            balls_faced: 0,
            fours: 0,
            sixes: 0,
            is_out: false,
            how_out: None,
            order,
        }
    }

    /// Runs per 100 balls
    pub fn strike_rate(&self) -> f64 {
        if self.balls_faced == 0 {
            return 0.0;
        }
        self.runs as f64 * 100.0 / self.balls_faced as f64
    }

    /// Dismissal text for the scorecard.
    pub fn status(&self) -> &str {
        match (&self.how_out, self.is_out) {
            (Some(how), true) => how,
            (None, true) => "out",
            _ => "not out",
        }
    }

    pub(crate) fn credit_runs(&mut self, runs: u32) {
        self.runs += runs;
        match runs {
            4 => self.fours += 1,
            6 => self.sixes += 1,
            _ => {}
        }
    }

    pub(crate) fn face_ball(&mut self) {
        self.balls_faced += 1;
    }

    pub(crate) fn dismiss(&mut self, how_out: impl Into<String>) {
        self.is_out = true;
        self.how_out = Some(how_out.into());
    }

    /// Wipe batting figures, keeping identity and order.
    pub(crate) fn reset_figures(&mut self) {
        self.runs = 0;
        self.balls_faced = 0;
        self.fours = 0;
        self.sixes = 0;
        self.is_out = false;
        self.how_out = None;
    }
}
