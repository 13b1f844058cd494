use serde::{Deserialize, Serialize};

use super::{Batter, BatterId, Bowler, BowlerId};
use crate::config::{MatchConfig, BALLS_PER_OVER};

/// Which of the two sides. `Home` always bats first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// One side's batting record for its innings plus the bowlers it fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInnings {
    pub name: String,
    /// False until the side's innings begins ("did not bat")
    pub has_batted: bool,
    pub runs: u32,
    pub wickets: u32,
    /// Completed overs
    pub overs: u32,
    /// Legal balls in the current over, 0..=5
    pub balls: u32,
    pub extras: u32,
    /// Batting order
    pub batters: Vec<Batter>,
    /// Roster used while this side fields
    pub bowlers: Vec<Bowler>,
}

impl TeamInnings {
    /// A side that opens the batting.
    pub fn batting_first(name: impl Into<String>) -> Self {
        Self { has_batted: true, ..Self::yet_to_bat(name) }
    }

    /// A side that has not batted yet.
    pub fn yet_to_bat(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            has_batted: false,
            runs: 0,
            wickets: 0,
            overs: 0,
            balls: 0,
            extras: 0,
            batters: Vec::new(),
            bowlers: Vec::new(),
        }
    }

    /// Zero the innings counters and any batting figures already on the
    /// roster. Bowling figures are kept.
    pub(crate) fn begin_innings(&mut self) {
        self.has_batted = true;
        self.runs = 0;
        self.wickets = 0;
        self.overs = 0;
        self.balls = 0;
        self.extras = 0;
        for batter in &mut self.batters {
            batter.reset_figures();
        }
    }

    pub fn legal_balls(&self) -> u32 {
        self.overs * BALLS_PER_OVER + self.balls
    }

    /// All out or overs exhausted.
    pub fn is_complete(&self, config: &MatchConfig) -> bool {
        self.has_batted && (self.wickets >= config.max_wickets || self.overs >= config.max_overs)
    }

    /// "R/W", or "DNB" for a side that never batted
    pub fn score_line(&self) -> String {
        if !self.has_batted {
            return "DNB".to_string();
        }
        format!("{}/{}", self.runs, self.wickets)
    }

    /// "O.B"
    pub fn overs_display(&self) -> String {
        format!("{}.{}", self.overs, self.balls)
    }

    pub fn batter(&self, id: BatterId) -> Option<&Batter> {
        self.batters.iter().find(|b| b.id == id)
    }

    pub(crate) fn batter_mut(&mut self, id: BatterId) -> Option<&mut Batter> {
        self.batters.iter_mut().find(|b| b.id == id)
    }

    pub fn bowler(&self, id: BowlerId) -> Option<&Bowler> {
        self.bowlers.iter().find(|b| b.id == id)
    }

    pub(crate) fn bowler_mut(&mut self, id: BowlerId) -> Option<&mut Bowler> {
        self.bowlers.iter_mut().find(|b| b.id == id)
    }

    /// Case-insensitive name lookup in the batting lineup.
    pub fn find_batter(&self, name: &str) -> Option<&Batter> {
        let name = name.trim();
        self.batters.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    /// Case-insensitive name lookup in the bowling roster.
    pub fn find_bowler(&self, name: &str) -> Option<&Bowler> {
        let name = name.trim();
        self.bowlers.iter().find(|b| b.name.eq_ignore_ascii_case(name))
    }

    pub(crate) fn next_batting_order(&self) -> u32 {
        self.batters.iter().map(|b| b.order).max().unwrap_or(0) + 1
    }

    /// Batters who can still come to the crease.
    pub fn available_batters(&self) -> impl Iterator<Item = &Batter> {
        self.batters.iter().filter(|b| !b.is_out)
    }
}
