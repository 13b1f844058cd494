use super::{MatchEngine, Spell};
use crate::error::{Result, ScoringError};
use crate::models::{Bowler, BowlerId, PlayerRole};

impl MatchEngine {
    /// Bring a bowler on by name, adding them to the fielding roster if they
    /// have not bowled yet. Lookup ignores case.
    pub fn select_or_create_bowler(&mut self, name: &str) -> Result<BowlerId> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(ScoringError::EmptyName { role: PlayerRole::Bowler });
        }
        self.ensure_in_play()?;

        match self.fielding_team().find_bowler(name).map(|b| b.id) {
            Some(id) => {
                self.check_bowler_change(id)?;
                self.assign_bowler(id, false);
                Ok(id)
            }
            None => {
                self.check_spell_open()?;
                let max = self.config.max_bowlers;
                if self.fielding_team().bowlers.len() as u32 >= max {
                    return self.reject(ScoringError::RosterFull { max });
                }
                let bowler = Bowler::new(name);
                let id = bowler.id;
                self.fielding_mut().bowlers.push(bowler);
                self.assign_bowler(id, true);
                Ok(id)
            }
        }
    }

    /// Bring on a rostered bowler by id.
    pub fn set_current_bowler(&mut self, id: BowlerId) -> Result<()> {
        if self.fielding_team().bowler(id).is_none() {
            return self.reject(ScoringError::UnknownBowler);
        }
        self.ensure_in_play()?;
        self.check_bowler_change(id)?;
        self.assign_bowler(id, false);
        Ok(())
    }

    pub fn rename_bowler(&mut self, id: BowlerId, new_name: &str) -> Result<()> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return self.reject(ScoringError::EmptyName { role: PlayerRole::Bowler });
        }
        let Some(old_name) = self.fielding_team().bowler(id).map(|b| b.name.clone()) else {
            return self.reject(ScoringError::UnknownBowler);
        };
        let clash = self
            .fielding_team()
            .find_bowler(new_name)
            .filter(|other| other.id != id)
            .map(|other| other.name.clone());
        if let Some(name) = clash {
            return self.reject(ScoringError::DuplicateName { role: PlayerRole::Bowler, name });
        }
        if self.current_bowler == Some(id) && self.spell.balls > 0 {
            return self.reject(ScoringError::BowlerLocked { name: old_name });
        }

        if let Some(bowler) = self.fielding_mut().bowler_mut(id) {
            bowler.name = new_name.to_string();
        }
        self.revoke_undo();
        self.commentary.push(format!("Bowler {} is now listed as {}.", old_name, new_name));
        Ok(())
    }

    /// A bowler in the middle of an over keeps the ball.
    fn check_spell_open(&mut self) -> Result<()> {
        if let Some(current) = self.current_bowler {
            if self.spell.balls > 0 {
                let name = self.bowler_name(current);
                return self.reject(ScoringError::BowlerLocked { name });
            }
        }
        Ok(())
    }

    fn check_bowler_change(&mut self, id: BowlerId) -> Result<()> {
        if self.current_bowler == Some(id) {
            return Ok(());
        }
        self.check_spell_open()?;
        if self.config.no_consecutive_overs && self.last_over_bowler == Some(id) {
            let name = self.bowler_name(id);
            return self.reject(ScoringError::ConsecutiveOvers { name });
        }
        Ok(())
    }

    fn assign_bowler(&mut self, id: BowlerId, is_new: bool) {
        if self.current_bowler == Some(id) {
            return;
        }
        self.current_bowler = Some(id);
        self.spell = Spell::default();
        self.revoke_undo();

        let name = self.bowler_name(id);
        let line = if is_new {
            format!("New bowler {} comes into the attack.", name)
        } else {
            format!("{} is bowling.", name)
        };
        self.commentary.push(line);
        log::debug!("Bowler selected: {}", name);
    }
}
