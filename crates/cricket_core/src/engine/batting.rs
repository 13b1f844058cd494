use serde::{Deserialize, Serialize};

use super::MatchEngine;
use crate::error::{Result, ScoringError};
use crate::models::{Batter, BatterId, PlayerRole};

/// The two batting positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum End {
    OnStrike,
    OffStrike,
}

impl MatchEngine {
    /// Add a batter to the batting side's lineup. The first two free ends
    /// are filled automatically, striker's end first.
    pub fn add_batter(&mut self, name: &str) -> Result<BatterId> {
        let name = name.trim();
        if name.is_empty() {
            return self.reject(ScoringError::EmptyName { role: PlayerRole::Batter });
        }
        self.ensure_in_play()?;
        if let Some(name) = self.batting_team().find_batter(name).map(|b| b.name.clone()) {
            return self.reject(ScoringError::DuplicateName { role: PlayerRole::Batter, name });
        }
        let max = self.config.max_batters;
        if self.batting_team().batters.len() as u32 >= max {
            return self.reject(ScoringError::LineupFull { max });
        }

        let order = self.batting_team().next_batting_order();
        let batter = Batter::new(name, order);
        let id = batter.id;
        self.batting_mut().batters.push(batter);
        self.revoke_undo();
        self.commentary.push(format!("{} comes out to bat at number {}.", name, order));

        if self.on_strike.is_none() {
            self.on_strike = Some(id);
            self.commentary.push(format!("{} is on strike.", name));
        } else if self.off_strike.is_none() {
            self.off_strike = Some(id);
            self.commentary.push(format!("{} is at the non-striker's end.", name));
        }
        log::debug!("Batter added: {} (#{})", name, order);
        Ok(id)
    }

    /// Put a rostered, not-out batter at one end.
    pub fn select_batter(&mut self, end: End, id: BatterId) -> Result<()> {
        let Some((name, is_out)) =
            self.batting_team().batter(id).map(|b| (b.name.clone(), b.is_out))
        else {
            return self.reject(ScoringError::UnknownBatter);
        };
        if is_out {
            return self.reject(ScoringError::BatterOut { name });
        }
        self.ensure_in_play()?;
        let other = match end {
            End::OnStrike => self.off_strike,
            End::OffStrike => self.on_strike,
        };
        if other == Some(id) {
            return self.reject(ScoringError::SameBatterBothEnds { name });
        }

        let line = match end {
            End::OnStrike => {
                self.on_strike = Some(id);
                format!("{} is on strike.", name)
            }
            End::OffStrike => {
                self.off_strike = Some(id);
                format!("{} is at the non-striker's end.", name)
            }
        };
        self.revoke_undo();
        self.commentary.push(line);
        Ok(())
    }

    /// Swap the batters by hand. With an end empty nothing moves and the
    /// commentary says so. Returns whether strike changed.
    pub fn swap_strike(&mut self) -> bool {
        let (rotated, line) = self.rotate_strike();
        if rotated {
            self.revoke_undo();
        }
        self.commentary.push(line);
        rotated
    }

    /// Exchange the strike ids, returning the commentary for it.
    pub(crate) fn rotate_strike(&mut self) -> (bool, String) {
        match (self.on_strike, self.off_strike) {
            (Some(on), Some(off)) => {
                self.on_strike = Some(off);
                self.off_strike = Some(on);
                let line = format!("Strike rotated. {} is now on strike.", self.batter_name(off));
                (true, line)
            }
            _ => (false, "Cannot rotate strike: both ends need a batter.".to_string()),
        }
    }
}
