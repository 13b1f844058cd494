//! # Match Format Configuration
//!
//! Every format limit the engine enforces lives here.
//!
//! ```rust
//! use cricket_core::config::MatchConfig;
//!
//! let t20 = MatchConfig::default();
//! let odi = MatchConfig::odi();
//! assert_eq!(t20.max_overs, 20);
//! assert_eq!(odi.max_overs, 50);
//! ```

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::ScoringError;

/// Legal deliveries in one over.
pub const BALLS_PER_OVER: u32 = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_lineup"))]
pub struct MatchConfig {
    /// Overs per innings
    #[validate(range(min = 1, max = 50))]
    pub max_overs: u32,
    /// Wickets that end an innings (all out)
    #[validate(range(min = 1, max = 10))]
    pub max_wickets: u32,
    /// Batters a side may name
    #[validate(range(min = 2, max = 11))]
    pub max_batters: u32,
    /// Bowlers a fielding side may use
    #[validate(range(min = 1, max = 11))]
    pub max_bowlers: u32,
    /// A bowler may not bowl two overs in a row
    #[serde(default = "default_no_consecutive_overs")]
    pub no_consecutive_overs: bool,
}

fn default_no_consecutive_overs() -> bool {
    true
}

fn validate_lineup(config: &MatchConfig) -> Result<(), ValidationError> {
    // The last batter cannot bat alone, so all-out is one short of the lineup.
    if config.max_wickets >= config.max_batters {
        return Err(ValidationError::new("max_wickets_not_below_max_batters"));
    }
    Ok(())
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::t20()
    }
}

impl MatchConfig {
    /// 20 overs, 10 wickets
    pub fn t20() -> Self {
        Self {
            max_overs: 20,
            max_wickets: 10,
            max_batters: 11,
            max_bowlers: 11,
            no_consecutive_overs: true,
        }
    }

    /// 50 overs, 10 wickets
    pub fn odi() -> Self {
        Self { max_overs: 50, ..Self::t20() }
    }

    /// Short practice format: one wicket, two batters, one bowler allowed to
    /// bowl every over.
    pub fn single_wicket(overs: u32) -> Self {
        Self {
            max_overs: overs,
            max_wickets: 1,
            max_batters: 2,
            max_bowlers: 1,
            no_consecutive_overs: false,
        }
    }

    pub fn max_legal_balls(&self) -> u32 {
        self.max_overs * BALLS_PER_OVER
    }

    /// Validate and convert failures into a scoring error.
    pub fn check(&self) -> Result<(), ScoringError> {
        self.validate().map_err(|e| ScoringError::InvalidConfig(e.to_string()))
    }
}
