use super::{MatchEngine, Spell};
use crate::error::{Result, ScoringError};
use crate::models::{BatterId, Bowler, BowlerId, CommentaryId, TeamInnings};
use crate::notify::Notification;

/// Everything a delivery can change, captured just before it is applied.
#[derive(Debug, Clone)]
pub(crate) struct UndoSnapshot {
    batting: TeamInnings,
    fielding_bowlers: Vec<Bowler>,
    current_bowler: Option<BowlerId>,
    on_strike: Option<BatterId>,
    off_strike: Option<BatterId>,
    spell: Spell,
    last_over_bowler: Option<BowlerId>,
    /// Placeholder entry created for the action
    commentary_id: CommentaryId,
}

impl MatchEngine {
    /// Reserve the action's commentary line and snapshot the state it may
    /// touch. Replaces any earlier snapshot.
    pub(crate) fn begin_undoable_action(&mut self) -> CommentaryId {
        let commentary_id = self.commentary.placeholder();
        self.undo = Some(UndoSnapshot {
            batting: self.batting_team().clone(),
            fielding_bowlers: self.fielding_team().bowlers.clone(),
            current_bowler: self.current_bowler,
            on_strike: self.on_strike,
            off_strike: self.off_strike,
            spell: self.spell,
            last_over_bowler: self.last_over_bowler,
            commentary_id,
        });
        commentary_id
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Reverse the last delivery. Single level: a second call fails until
    /// another delivery is recorded.
    pub fn undo(&mut self) -> Result<()> {
        let Some(snapshot) = self.undo.take() else {
            return self.reject(ScoringError::NothingToUndo);
        };

        *self.batting_mut() = snapshot.batting;
        self.fielding_mut().bowlers = snapshot.fielding_bowlers;
        self.current_bowler = snapshot.current_bowler;
        self.on_strike = snapshot.on_strike;
        self.off_strike = snapshot.off_strike;
        self.spell = snapshot.spell;
        self.last_over_bowler = snapshot.last_over_bowler;
        self.commentary.remove(snapshot.commentary_id);

        let striker = self
            .on_strike_batter()
            .map(|b| b.name.clone())
            .unwrap_or_else(|| "No striker".to_string());
        let score = self.batting_team().score_line();
        self.commentary.push(format!(
            "(Action Undone) Last recorded action has been reversed. Score: {}. Striker: {}",
            score, striker
        ));
        self.notify(Notification::info("Action Undone", format!("Score is back to {}.", score)));
        log::info!("Undid last delivery, score {}", score);
        Ok(())
    }

    /// Drop the snapshot without restoring it.
    pub(crate) fn revoke_undo(&mut self) {
        if self.undo.take().is_some() {
            log::debug!("Undo snapshot discarded");
        }
    }
}
