// Setup parameters for a run and their bounds.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::AuctionError;
use crate::export::export_file_stem;
use crate::money::Crores;
use crate::player::DEFAULT_POOL_SIZE;
use crate::team::TeamSpec;

pub const MIN_TEAMS: usize = 2;
pub const MAX_TEAMS: usize = 10;
pub const MIN_PURSE: Crores = Crores::from_hundredths(500);
pub const MAX_PURSE: Crores = Crores::from_hundredths(10_000);
/// Purses are entered in half-crore steps.
pub const PURSE_STEP: Crores = Crores::from_hundredths(50);
pub const MIN_SQUAD_SIZE: usize = 11;
pub const MAX_SQUAD_SIZE: usize = 25;
pub const MAX_POOL_SIZE: usize = 1000;

/// Everything fixed at the start of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSetup {
    pub teams: Vec<TeamSpec>,
    pub max_squad_size: usize,
    pub pool_size: usize,
}

impl AuctionSetup {
    pub fn new(teams: Vec<TeamSpec>, max_squad_size: usize) -> Self {
        AuctionSetup {
            teams,
            max_squad_size,
            pool_size: DEFAULT_POOL_SIZE,
        }
    }

    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Reject out-of-bounds setups before any run is created.
    pub fn validate(&self) -> Result<(), AuctionError> {
        let count = self.teams.len();
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&count) {
            return Err(AuctionError::invalid_setup(
                "teams",
                format!("need between {MIN_TEAMS} and {MAX_TEAMS} teams, got {count}"),
            ));
        }

        if !(MIN_SQUAD_SIZE..=MAX_SQUAD_SIZE).contains(&self.max_squad_size) {
            return Err(AuctionError::invalid_setup(
                "max_squad_size",
                format!(
                    "must be between {MIN_SQUAD_SIZE} and {MAX_SQUAD_SIZE}, got {}",
                    self.max_squad_size
                ),
            ));
        }

        if !(1..=MAX_POOL_SIZE).contains(&self.pool_size) {
            return Err(AuctionError::invalid_setup(
                "pool_size",
                format!("must be between 1 and {MAX_POOL_SIZE}, got {}", self.pool_size),
            ));
        }

        let mut seen = HashSet::new();
        for (i, spec) in self.teams.iter().enumerate() {
            let field = format!("teams[{i}]");
            let name = spec.name.trim();
            if name.is_empty() {
                return Err(AuctionError::invalid_setup(&field, "name must not be empty"));
            }
            // Export files are named after teams, so their file stems must
            // not collide either.
            if !seen.insert(export_file_stem(name).to_lowercase()) {
                return Err(AuctionError::invalid_setup(
                    &field,
                    format!("duplicate team name '{name}'"),
                ));
            }
            if spec.purse < MIN_PURSE || spec.purse > MAX_PURSE {
                return Err(AuctionError::invalid_setup(
                    &field,
                    format!(
                        "purse must be between {MIN_PURSE} and {MAX_PURSE}, got {}",
                        spec.purse
                    ),
                ));
            }
            if spec.purse.hundredths() % PURSE_STEP.hundredths() != 0 {
                return Err(AuctionError::invalid_setup(
                    &field,
                    format!("purse must be a multiple of {PURSE_STEP}, got {}", spec.purse),
                ));
            }
        }

        Ok(())
    }
}
