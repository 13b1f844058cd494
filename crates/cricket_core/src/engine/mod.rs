//! # Match Engine
//!
//! `MatchEngine` owns the whole match state and its methods are the only
//! mutators. Every operation checks all of its preconditions before the
//! first write, so a refused call leaves the state exactly as it was and
//! queues a notification explaining why.
//!
//! ## Modules
//! - `delivery`: one ball's effect on score, batter, bowler and strike
//! - `bowling` / `batting`: who is bowling and who is at the crease
//! - `lifecycle`: innings end, innings switch, result, reset
//! - `undo`: single-level snapshot/restore of the last delivery
//! - `stats`: run rates and chase arithmetic for views

pub mod batting;
pub mod bowling;
pub mod delivery;
pub mod lifecycle;
pub mod stats;
pub mod undo;

#[cfg(test)]
mod tests;

pub use batting::End;
pub use delivery::{Delivery, DeliveryReport, Outcome};
pub use lifecycle::{MatchPhase, MatchResult, WinMargin};
pub use stats::InningsStats;

use serde::{Deserialize, Serialize};

use crate::config::MatchConfig;
use crate::error::{Result, ScoringError};
use crate::models::{Batter, BatterId, Bowler, BowlerId, CommentaryLog, Side, TeamInnings};
use crate::notify::Notification;
use crate::save::{HistoryStore, InMemoryHistoryStore, MatchRecord, SaveError};

use undo::UndoSnapshot;

pub const DEFAULT_HOME_NAME: &str = "Team Alpha";
pub const DEFAULT_AWAY_NAME: &str = "Team Bravo";

/// The current bowler's in-progress over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    /// Legal balls bowled in this spell
    pub balls: u32,
    /// Runs off the bat conceded in this spell (extras excluded)
    pub bat_runs: u32,
}

pub struct MatchEngine {
    config: MatchConfig,
    home: TeamInnings,
    away: TeamInnings,
    batting_side: Side,
    current_bowler: Option<BowlerId>,
    on_strike: Option<BatterId>,
    off_strike: Option<BatterId>,
    spell: Spell,
    /// Bowler who completed the most recent over
    last_over_bowler: Option<BowlerId>,
    commentary: CommentaryLog,
    undo: Option<UndoSnapshot>,
    history: Box<dyn HistoryStore>,
    history_saved: bool,
    notifications: Vec<Notification>,
}

impl Default for MatchEngine {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine")
            .field("config", &self.config)
            .field("home", &self.home)
            .field("away", &self.away)
            .field("batting_side", &self.batting_side)
            .field("current_bowler", &self.current_bowler)
            .field("on_strike", &self.on_strike)
            .field("off_strike", &self.off_strike)
            .field("spell", &self.spell)
            .field("last_over_bowler", &self.last_over_bowler)
            .field("commentary", &self.commentary.len())
            .field("can_undo", &self.undo.is_some())
            .field("history_saved", &self.history_saved)
            .finish()
    }
}

impl MatchEngine {
    /// Engine with an in-memory history store and the default team names.
    pub fn new(config: MatchConfig) -> Self {
        Self::with_history(config, Box::new(InMemoryHistoryStore::new()))
    }

    pub fn with_history(config: MatchConfig, history: Box<dyn HistoryStore>) -> Self {
        Self {
            config,
            home: TeamInnings::batting_first(DEFAULT_HOME_NAME),
            away: TeamInnings::yet_to_bat(DEFAULT_AWAY_NAME),
            batting_side: Side::Home,
            current_bowler: None,
            on_strike: None,
            off_strike: None,
            spell: Spell::default(),
            last_over_bowler: None,
            commentary: CommentaryLog::new(),
            undo: None,
            history,
            history_saved: false,
            notifications: Vec::new(),
        }
    }

    /// Engine configured from the settings saved in `history`, falling back
    /// to `fallback` when none are stored or they fail validation.
    pub fn from_store(history: Box<dyn HistoryStore>, fallback: MatchConfig) -> Result<Self> {
        let config = match history.load_settings() {
            Ok(Some(saved)) if saved.check().is_ok() => saved,
            Ok(_) => fallback,
            Err(e) => {
                log::warn!("Could not read saved match settings: {}", e);
                fallback
            }
        };
        config.check()?;
        Ok(Self::with_history(config, history))
    }

    /// Rename both sides. Names are trimmed; empty names are rejected.
    pub fn with_team_names(mut self, home: &str, away: &str) -> Result<Self> {
        let (home, away) = (home.trim(), away.trim());
        if home.is_empty() || away.is_empty() {
            return Err(ScoringError::InvalidConfig("team names cannot be empty".to_string()));
        }
        self.home.name = home.to_string();
        self.away.name = away.to_string();
        Ok(self)
    }

    // ========================
    // Read access
    // ========================

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn team(&self, side: Side) -> &TeamInnings {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn batting_side(&self) -> Side {
        self.batting_side
    }

    pub fn batting_team(&self) -> &TeamInnings {
        self.team(self.batting_side)
    }

    pub fn fielding_team(&self) -> &TeamInnings {
        self.team(self.batting_side.other())
    }

    pub fn current_bowler_id(&self) -> Option<BowlerId> {
        self.current_bowler
    }

    pub fn current_bowler(&self) -> Option<&Bowler> {
        self.current_bowler.and_then(|id| self.fielding_team().bowler(id))
    }

    pub fn on_strike_id(&self) -> Option<BatterId> {
        self.on_strike
    }

    pub fn off_strike_id(&self) -> Option<BatterId> {
        self.off_strike
    }

    pub fn on_strike_batter(&self) -> Option<&Batter> {
        self.on_strike.and_then(|id| self.batting_team().batter(id))
    }

    pub fn off_strike_batter(&self) -> Option<&Batter> {
        self.off_strike.and_then(|id| self.batting_team().batter(id))
    }

    pub fn spell(&self) -> Spell {
        self.spell
    }

    pub fn last_over_bowler_id(&self) -> Option<BowlerId> {
        self.last_over_bowler
    }

    pub fn commentary(&self) -> &CommentaryLog {
        &self.commentary
    }

    /// Chronological, timestamp-prefixed commentary for summarization.
    pub fn commentary_text(&self) -> String {
        self.commentary.transcript()
    }

    pub fn history(&self) -> &dyn HistoryStore {
        self.history.as_ref()
    }

    /// Saved matches, newest first.
    pub fn match_history(&self) -> std::result::Result<Vec<MatchRecord>, SaveError> {
        self.history.load_newest_first()
    }

    pub fn clear_history(&mut self) -> std::result::Result<(), SaveError> {
        self.history.clear()?;
        self.notify(Notification::info("History Cleared", "All saved matches were removed."));
        Ok(())
    }

    pub fn is_history_saved(&self) -> bool {
        self.history_saved
    }

    /// Pending notifications, oldest first.
    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    // ========================
    // Settings and manual commentary
    // ========================

    /// Any ball, run or wicket recorded, or the second innings reached.
    pub fn has_started(&self) -> bool {
        self.batting_side == Side::Away
            || self.home.legal_balls() > 0
            || self.home.runs > 0
            || self.home.wickets > 0
    }

    /// Change the match format. Locked once play has begun. The new settings
    /// are persisted on a best-effort basis.
    pub fn set_config(&mut self, config: MatchConfig) -> Result<()> {
        if self.has_started() {
            return self.reject(ScoringError::ConfigLocked);
        }
        if let Err(e) = config.check() {
            return self.reject(e);
        }
        if let Err(e) = self.history.save_settings(&config) {
            log::warn!("Could not persist match settings: {}", e);
        }
        log::info!(
            "Match format set: {} overs, {} wickets",
            config.max_overs,
            config.max_wickets
        );
        self.config = config;
        self.notify(Notification::info(
            "Settings Updated",
            format!("{} overs, {} wickets per innings.", self.config.max_overs, self.config.max_wickets),
        ));
        Ok(())
    }

    pub fn add_manual_commentary(&mut self, text: &str) -> Result<()> {
        let text = text.trim();
        if text.is_empty() {
            return self.reject(ScoringError::EmptyCommentary);
        }
        self.commentary.push(format!("(Manual) {}", text));
        Ok(())
    }

    // ========================
    // Internal helpers
    // ========================

    fn batting_mut(&mut self) -> &mut TeamInnings {
        match self.batting_side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }

    fn fielding_mut(&mut self) -> &mut TeamInnings {
        match self.batting_side {
            Side::Home => &mut self.away,
            Side::Away => &mut self.home,
        }
    }

    /// (batting, fielding)
    fn sides_mut(&mut self) -> (&mut TeamInnings, &mut TeamInnings) {
        match self.batting_side {
            Side::Home => (&mut self.home, &mut self.away),
            Side::Away => (&mut self.away, &mut self.home),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Refuse an operation: log it, tell the scorer, and hand back the error.
    fn reject<T>(&mut self, err: ScoringError) -> Result<T> {
        log::warn!("Rejected: {}", err);
        self.notify(err.to_notification());
        Err(err)
    }

    /// Innings still open and match undecided.
    fn ensure_in_play(&mut self) -> Result<()> {
        if self.result().is_some() {
            return self.reject(ScoringError::MatchComplete);
        }
        if self.batting_team().is_complete(&self.config) {
            let team = self.batting_team().name.clone();
            return self.reject(ScoringError::InningsOver { team });
        }
        Ok(())
    }

    fn bowler_name(&self, id: BowlerId) -> String {
        self.fielding_team().bowler(id).map(|b| b.name.clone()).unwrap_or_else(|| "Unknown".into())
    }

    fn batter_name(&self, id: BatterId) -> String {
        self.batting_team().batter(id).map(|b| b.name.clone()).unwrap_or_else(|| "Batter".into())
    }
}
