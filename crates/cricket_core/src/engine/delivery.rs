//! Delivery processor
//!
//! Applies one ball to the match. The order of effects is fixed:
//! preconditions, undo snapshot, runs or wicket, then (for legal balls) the
//! ball count for batter, team and bowler with over/innings completion,
//! and finally the result check.

use serde::{Deserialize, Serialize};

use super::{MatchEngine, MatchResult, Spell};
use crate::config::BALLS_PER_OVER;
use crate::error::{Result, ScoringError};
use crate::models::{BatterId, BowlerId, CommentaryId};
use crate::notify::Notification;

/// Most runs that can come off one ball, overthrows included
pub const MAX_RUNS_PER_BALL: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Runs,
    Wicket,
    Dot,
}

/// One ball as reported by the scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Runs added to the team total by this ball
    pub runs: u32,
    /// Runs go to extras rather than to the striker
    pub is_extra: bool,
    /// Counts towards the over; wides and no-balls are re-bowled
    pub legal: bool,
    pub outcome: Outcome,
}

impl Delivery {
    pub fn new(runs: u32, is_extra: bool, legal: bool, outcome: Outcome) -> Self {
        Self { runs, is_extra, legal, outcome }
    }

    /// Runs off the bat
    pub fn runs(runs: u32) -> Self {
        Self::new(runs, false, true, Outcome::Runs)
    }

    pub fn dot() -> Self {
        Self::new(0, false, true, Outcome::Dot)
    }

    /// Bowled; the striker is out
    pub fn wicket() -> Self {
        Self::new(0, false, true, Outcome::Wicket)
    }

    /// One-run penalty, re-bowled
    pub fn wide() -> Self {
        Self::new(1, true, false, Outcome::Runs)
    }

    /// One-run penalty plus whatever the batters ran, all as extras; re-bowled
    pub fn no_ball(struck: u32) -> Self {
        Self::new(struck.saturating_add(1), true, false, Outcome::Runs)
    }

    /// Legal ball, runs taken without touching the bat
    pub fn byes(runs: u32) -> Self {
        Self::new(runs, true, true, Outcome::Runs)
    }

    fn validate(&self) -> Result<()> {
        match self.outcome {
            Outcome::Dot if self.runs != 0 || self.is_extra || !self.legal => {
                Err(ScoringError::InvalidDelivery("a dot ball is a legal ball with no runs"))
            }
            Outcome::Wicket if self.runs != 0 || self.is_extra || !self.legal => {
                Err(ScoringError::InvalidDelivery("a wicket ball is a legal ball with no runs"))
            }
            Outcome::Runs if !self.legal && (!self.is_extra || self.runs == 0) => Err(
                ScoringError::InvalidDelivery("a wide or no-ball carries at least one extra run"),
            ),
            Outcome::Runs if !self.legal && self.runs > MAX_RUNS_PER_BALL + 1 => Err(
                ScoringError::InvalidDelivery("at most 7 runs can be taken off a wide or no-ball"),
            ),
            Outcome::Runs if self.legal && self.runs > MAX_RUNS_PER_BALL => {
                Err(ScoringError::InvalidDelivery("at most 7 runs can come off one ball"))
            }
            _ => Ok(()),
        }
    }
}

/// What a recorded delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// The delivery's own commentary line
    pub commentary_id: CommentaryId,
    pub strike_rotated: bool,
    pub over_completed: bool,
    pub innings_ended: bool,
    /// Set when this ball decided the match
    pub result: Option<MatchResult>,
}

impl MatchEngine {
    /// Record one ball.
    ///
    /// Refused without any change when the match is decided, the innings is
    /// over, or no bowler / striker is selected.
    pub fn record_delivery(&mut self, delivery: Delivery) -> Result<DeliveryReport> {
        if let Err(e) = delivery.validate() {
            return self.reject(e);
        }
        self.ensure_in_play()?;
        let (bowler_id, striker_id) = match (self.current_bowler, self.on_strike) {
            (Some(bowler), Some(striker)) => (bowler, striker),
            (None, striker) => {
                if striker.is_none() {
                    self.notify(ScoringError::NeedsStriker.to_notification());
                }
                return self.reject(ScoringError::NeedsBowler);
            }
            (Some(_), None) => return self.reject(ScoringError::NeedsStriker),
        };

        let balls_before = self.batting_team().balls;
        let commentary_id = self.begin_undoable_action();
        let mut report = DeliveryReport {
            commentary_id,
            strike_rotated: false,
            over_completed: false,
            innings_ended: false,
            result: None,
        };

        let mut text = match delivery.outcome {
            Outcome::Runs => self.apply_runs(&delivery, striker_id, bowler_id),
            Outcome::Wicket => self.apply_wicket(striker_id, bowler_id),
            Outcome::Dot => format!(
                "Dot ball. {} facing {}.",
                self.batter_name(striker_id),
                self.bowler_name(bowler_id)
            ),
        };

        let bat_runs = delivery.outcome == Outcome::Runs && !delivery.is_extra;
        if bat_runs && delivery.runs % 2 == 1 && balls_before < BALLS_PER_OVER - 1 {
            let (rotated, line) = self.rotate_strike();
            report.strike_rotated = rotated;
            text.push(' ');
            text.push_str(&line);
        }

        let team = self.batting_team();
        text.push_str(&format!(" Score: {}/{}", team.runs, team.wickets));
        if let Err(e) = self.commentary.finalize(commentary_id, text) {
            log::warn!("Could not finalize delivery commentary: {}", e);
        }

        if delivery.legal {
            self.apply_legal_ball(striker_id, bowler_id, &mut report);
        }

        if !report.innings_ended && self.batting_team().is_complete(&self.config) {
            self.close_innings();
            report.innings_ended = true;
        }

        report.result = self.settle_result();
        log::debug!(
            "Delivery {:?}: {} runs, extra={}, legal={} -> {}",
            delivery.outcome,
            delivery.runs,
            delivery.is_extra,
            delivery.legal,
            self.batting_team().score_line()
        );
        Ok(report)
    }

    /// Team runs, batter credit (off the bat) or extras, bowler runs conceded.
    fn apply_runs(&mut self, delivery: &Delivery, striker: BatterId, bowler: BowlerId) -> String {
        let runs = delivery.runs;
        let (batting, fielding) = self.sides_mut();
        batting.runs += runs;
        if delivery.is_extra {
            batting.extras += runs;
        } else if let Some(batter) = batting.batter_mut(striker) {
            batter.credit_runs(runs);
        }
        if let Some(b) = fielding.bowler_mut(bowler) {
            b.runs_conceded += runs;
        }
        if !delivery.is_extra {
            self.spell.bat_runs += runs;
        }

        let bowler_name = self.bowler_name(bowler);
        let plural = if runs == 1 { "" } else { "s" };
        if !delivery.legal {
            return format!("Extra delivery! {} extra run{} off {}.", runs, plural, bowler_name);
        }
        if delivery.is_extra {
            return format!("{} bye{} off {}.", runs, plural, bowler_name);
        }
        let shout = match runs {
            4 => "FOUR! ",
            6 => "SIX! ",
            _ => "",
        };
        format!(
            "{}{} run{} scored by {}! Off {}.",
            shout,
            runs,
            plural,
            self.batter_name(striker),
            bowler_name
        )
    }

    /// Dismiss the striker, credit the bowler, and leave the striker's end
    /// empty until a new batter is selected.
    fn apply_wicket(&mut self, striker: BatterId, bowler: BowlerId) -> String {
        let bowler_name = self.bowler_name(bowler);
        let batter_name = self.batter_name(striker);
        let (batting, fielding) = self.sides_mut();
        batting.wickets += 1;
        if let Some(batter) = batting.batter_mut(striker) {
            batter.dismiss(format!("b {}", bowler_name));
        }
        if let Some(b) = fielding.bowler_mut(bowler) {
            b.wickets += 1;
        }
        let wickets = batting.wickets;
        let team_name = batting.name.clone();
        self.on_strike = None;

        if wickets < self.config.max_wickets {
            self.notify(Notification::info(
                "Wicket!",
                format!("Select the next batter for {}.", team_name),
            ));
        }
        format!(
            "WICKET! {} is out! That's wicket number {}. Bowler: {}.",
            batter_name, wickets, bowler_name
        )
    }

    /// Ball counts for striker, team over and bowler spell, with the over
    /// rollover and the end-of-over strike change.
    fn apply_legal_ball(&mut self, striker: BatterId, bowler: BowlerId, report: &mut DeliveryReport) {
        let config = self.config.clone();
        let (batting, fielding) = self.sides_mut();

        if let Some(batter) = batting.batter_mut(striker) {
            batter.face_ball();
        }
        batting.balls += 1;
        let team_over_done = batting.balls >= BALLS_PER_OVER;
        if team_over_done {
            batting.overs += 1;
            batting.balls = 0;
        }
        let innings_over = batting.is_complete(&config);

        if let Some(b) = fielding.bowler_mut(bowler) {
            b.balls_bowled += 1;
        }
        self.spell.balls += 1;

        if self.spell.balls >= BALLS_PER_OVER {
            self.complete_bowler_over(bowler);
            report.over_completed = true;
        }

        if team_over_done && !innings_over && self.on_strike.is_some() && self.off_strike.is_some()
        {
            let (rotated, line) = self.rotate_strike();
            report.strike_rotated |= rotated;
            self.commentary.push(format!("End of over. {}", line));
        }

        if innings_over {
            self.close_innings();
            report.innings_ended = true;
        }
    }

    /// Maiden check, over figures, and hand the ball to a new bowler.
    fn complete_bowler_over(&mut self, bowler_id: BowlerId) {
        let spell = self.spell;
        let team = self.batting_team();
        let score = format!("{}/{}", team.runs, team.wickets);

        let mut summary = String::new();
        let mut name = String::from("Unknown");
        if let Some(bowler) = self.fielding_mut().bowler_mut(bowler_id) {
            if spell.bat_runs == 0 {
                bowler.maidens += 1;
            }
            name = bowler.name.clone();
            summary = format!(
                "Over {} completed by {}.{} Runs off the bat this over: {}. Figures: {}.",
                bowler.completed_overs(),
                bowler.name,
                if spell.bat_runs == 0 { " It's a MAIDEN!" } else { "" },
                spell.bat_runs,
                bowler.figures()
            );
        }
        if !summary.is_empty() {
            self.commentary.push(summary);
        }
        self.commentary.push(format!(
            "End of the over by {}. Score: {}. A new bowler is needed.",
            name, score
        ));
        self.notify(Notification::info(
            "Over Complete!",
            format!("{} has finished their over. Score: {}. Select next bowler.", name, score),
        ));

        self.current_bowler = None;
        self.last_over_bowler = Some(bowler_id);
        self.spell = Spell::default();
        self.revoke_undo();
        log::debug!("Over complete for {} at {}", name, score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_validate() {
        assert!(Delivery::runs(4).validate().is_ok());
        assert!(Delivery::dot().validate().is_ok());
        assert!(Delivery::wicket().validate().is_ok());
        assert!(Delivery::wide().validate().is_ok());
        assert!(Delivery::no_ball(4).validate().is_ok());
        assert!(Delivery::byes(2).validate().is_ok());
    }

    #[test]
    fn test_no_ball_total_includes_struck_runs() {
        let nb = Delivery::no_ball(3);
        assert_eq!(nb.runs, 4);
        assert!(nb.is_extra);
        assert!(!nb.legal);
    }

    #[test]
    fn test_inconsistent_deliveries_rejected() {
        assert!(Delivery::new(1, false, true, Outcome::Dot).validate().is_err());
        assert!(Delivery::new(0, false, false, Outcome::Wicket).validate().is_err());
        assert!(Delivery::new(2, false, false, Outcome::Runs).validate().is_err());
        assert!(Delivery::new(0, true, false, Outcome::Runs).validate().is_err());
    }

    #[test]
    fn test_run_cap_per_ball() {
        assert!(Delivery::runs(MAX_RUNS_PER_BALL).validate().is_ok());
        assert!(Delivery::runs(MAX_RUNS_PER_BALL + 1).validate().is_err());
        assert!(Delivery::byes(8).validate().is_err());
        assert!(Delivery::no_ball(MAX_RUNS_PER_BALL).validate().is_ok());
        assert!(Delivery::no_ball(MAX_RUNS_PER_BALL + 1).validate().is_err());

        let huge = Delivery::no_ball(u32::MAX);
        assert_eq!(huge.runs, u32::MAX);
        assert!(matches!(huge.validate(), Err(ScoringError::InvalidDelivery(_))));
    }
}
