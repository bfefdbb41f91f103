// Team registry: purses, squads and bidding eligibility.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::{Crores, MIN_BID_UNIT};
use crate::player::Player;

/// Stable team identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamId(pub Uuid);

impl TeamId {
    pub fn new() -> Self {
        TeamId(Uuid::now_v7())
    }
}

impl Default for TeamId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A (name, purse) pair entered at setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    pub purse: Crores,
}

impl TeamSpec {
    pub fn new(name: impl Into<String>, purse: Crores) -> Self {
        TeamSpec {
            name: name.into(),
            purse,
        }
    }
}

/// A franchise taking part in the auction.
///
/// `purse` only ever goes down, and always equals `original_purse` minus the
/// prices of everyone in `squad`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub purse: Crores,
    pub original_purse: Crores,
    pub squad: Vec<Player>,
    pub can_bid: bool,
}

/// Why a team is out of the bidding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamStatus {
    Active,
    SquadFull,
    InsufficientFunds,
}

impl TeamStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TeamStatus::Active => "Can bid",
            TeamStatus::SquadFull => "Squad Full",
            TeamStatus::InsufficientFunds => "Insufficient Funds",
        }
    }
}

impl Team {
    /// Amount spent so far.
    pub fn spent(&self) -> Crores {
        self.original_purse - self.purse
    }

    pub fn squad_size(&self) -> usize {
        self.squad.len()
    }

    /// Classify the team against the squad cap. A full squad takes
    /// precedence over an empty purse.
    pub fn status(&self, max_squad_size: usize) -> TeamStatus {
        if self.squad.len() >= max_squad_size {
            TeamStatus::SquadFull
        } else if self.purse < MIN_BID_UNIT {
            TeamStatus::InsufficientFunds
        } else {
            TeamStatus::Active
        }
    }
}

/// Build teams from setup specs. Every team starts with an empty squad and
/// `original_purse == purse`; eligibility is computed against the squad cap.
///
/// Bounds are checked by [`crate::setup::AuctionSetup::validate`], not here.
pub fn create_teams(specs: &[TeamSpec], max_squad_size: usize) -> Vec<Team> {
    specs
        .iter()
        .map(|spec| {
            let mut team = Team {
                id: TeamId::new(),
                name: spec.name.clone(),
                purse: spec.purse,
                original_purse: spec.purse,
                squad: Vec::new(),
                can_bid: false,
            };
            recompute_eligibility(&mut team, max_squad_size);
            team
        })
        .collect()
}

/// Refresh `can_bid` from the current squad and purse. Call after every
/// purse or squad mutation.
pub fn recompute_eligibility(team: &mut Team, max_squad_size: usize) {
    team.can_bid = team.squad.len() < max_squad_size && team.purse >= MIN_BID_UNIT;
}
