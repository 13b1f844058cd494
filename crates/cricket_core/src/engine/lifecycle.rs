//! Innings and match lifecycle: innings end, the break, the chase, the
//! result and starting over.

use serde::{Deserialize, Serialize};

use super::{MatchEngine, Spell};
use crate::error::{Result, ScoringError};
use crate::models::{CommentaryLog, Side, TeamInnings};
use crate::notify::Notification;
use crate::save::MatchRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    FirstInnings,
    /// First innings complete, chase not yet started
    InningsBreak,
    SecondInnings,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinMargin {
    Runs(u32),
    Wickets(u32),
}

impl std::fmt::Display for WinMargin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (n, unit) = match *self {
            WinMargin::Runs(n) => (n, "run"),
            WinMargin::Wickets(n) => (n, "wicket"),
        };
        write!(f, "{} {}{}", n, unit, if n == 1 { "" } else { "s" })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Won { winner: Side, winner_name: String, margin: WinMargin },
    Tied,
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Won { winner_name, margin, .. } => {
                write!(f, "{} won by {}.", winner_name, margin)
            }
            MatchResult::Tied => write!(f, "Match Tied!"),
        }
    }
}

impl MatchEngine {
    pub fn phase(&self) -> MatchPhase {
        if self.result().is_some() {
            return MatchPhase::Complete;
        }
        match self.batting_side {
            Side::Home if self.home.is_complete(&self.config) => MatchPhase::InningsBreak,
            Side::Home => MatchPhase::FirstInnings,
            Side::Away => MatchPhase::SecondInnings,
        }
    }

    /// Decided result, derived from the scores alone.
    pub fn result(&self) -> Option<MatchResult> {
        if self.batting_side != Side::Away {
            return None;
        }
        let (defending, chasing) = (&self.home, &self.away);

        if chasing.runs > defending.runs {
            let margin = self.config.max_wickets.saturating_sub(chasing.wickets);
            return Some(MatchResult::Won {
                winner: Side::Away,
                winner_name: chasing.name.clone(),
                margin: WinMargin::Wickets(margin),
            });
        }
        if !chasing.is_complete(&self.config) {
            return None;
        }
        if defending.runs > chasing.runs {
            Some(MatchResult::Won {
                winner: Side::Home,
                winner_name: defending.name.clone(),
                margin: WinMargin::Runs(defending.runs - chasing.runs),
            })
        } else {
            Some(MatchResult::Tied)
        }
    }

    /// Runs the chasing side needs to win, once the chase has begun.
    pub fn target(&self) -> Option<u32> {
        (self.batting_side == Side::Away).then(|| self.home.runs + 1)
    }

    /// Start the chase. Only allowed during the innings break.
    pub fn switch_innings(&mut self) -> Result<()> {
        match self.phase() {
            MatchPhase::InningsBreak => {}
            MatchPhase::Complete => return self.reject(ScoringError::MatchComplete),
            MatchPhase::FirstInnings | MatchPhase::SecondInnings => {
                let team = self.batting_team().name.clone();
                return self.reject(ScoringError::InningsInProgress { team });
            }
        }

        let balls = self.spell.balls;
        let partial = self.current_bowler().filter(|_| balls > 0).map(|bowler| {
            format!(
                "{} bowled a partial over ({} ball{}) before the innings ended.",
                bowler.name,
                balls,
                if balls == 1 { "" } else { "s" }
            )
        });
        if let Some(line) = partial {
            self.commentary.push(line);
        }

        self.away.begin_innings();
        self.batting_side = Side::Away;
        self.current_bowler = None;
        self.on_strike = None;
        self.off_strike = None;
        self.spell = Spell::default();
        self.last_over_bowler = None;
        self.revoke_undo();

        let target = self.home.runs + 1;
        self.commentary.push(format!(
            "--- Innings Break: {} scored {}. {} to bat. Target: {} ---",
            self.home.name,
            self.home.score_line(),
            self.away.name,
            target
        ));
        self.notify(Notification::info(
            "Innings Changed",
            format!("{} need {} runs to win.", self.away.name, target),
        ));
        log::info!("Second innings started: {} chasing {}", self.away.name, target);
        Ok(())
    }

    /// Back to a fresh first innings with the same teams and format.
    pub fn reset_match(&mut self) {
        self.home = TeamInnings::batting_first(self.home.name.clone());
        self.away = TeamInnings::yet_to_bat(self.away.name.clone());
        self.batting_side = Side::Home;
        self.current_bowler = None;
        self.on_strike = None;
        self.off_strike = None;
        self.spell = Spell::default();
        self.last_over_bowler = None;
        self.commentary = CommentaryLog::new();
        self.undo = None;
        self.history_saved = false;
        self.notify(Notification::info("Match Reset", "Scores and commentary have been cleared."));
        log::info!("Match reset");
    }

    /// Called once the batting side is all out or out of overs.
    pub(crate) fn close_innings(&mut self) {
        let team = self.batting_team();
        let line = if team.wickets >= self.config.max_wickets {
            format!("Innings ended for {}. All out. Final Score: {}", team.name, team.score_line())
        } else {
            format!(
                "Innings ended for {} after {} over{}. Final Score: {}",
                team.name,
                team.overs,
                if team.overs == 1 { "" } else { "s" },
                team.score_line()
            )
        };
        let name = team.name.clone();
        let score = team.score_line();

        self.commentary.push(line);
        if self.batting_side == Side::Home {
            self.notify(Notification::info(
                "Innings Over",
                format!("{} finished on {}. Switch innings to start the chase.", name, score),
            ));
        }
        self.revoke_undo();
        log::info!("Innings over: {} {}", name, score);
    }

    /// Record the result the first time the match is decided.
    pub(crate) fn settle_result(&mut self) -> Option<MatchResult> {
        let result = self.result()?;
        if self.history_saved {
            return Some(result);
        }
        self.history_saved = true;

        let text = result.to_string();
        let record = MatchRecord::new(&self.home, &self.away, text.clone());
        match self.history.append(record) {
            Ok(()) => log::info!("Match saved to history: {}", text),
            Err(e) => {
                log::warn!("Could not save match to history: {}", e);
                self.notify(Notification::warning("History Not Saved", e.to_string()));
            }
        }

        self.commentary.push(format!("Match over! {}", text));
        self.notify(Notification::info("Match Concluded", text));
        self.revoke_undo();
        Some(result)
    }
}
