// Player records and the randomized player pool.

use std::fmt;

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::money::Crores;
use crate::team::TeamId;

// ---------------------------------------------------------------------------
// Identifiers and enums
// ---------------------------------------------------------------------------

/// Stable player identifier, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        PlayerId(Uuid::now_v7())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Cricket playing role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Batsman,
    Bowler,
    #[serde(rename = "All-rounder")]
    AllRounder,
    #[serde(rename = "Wicket-keeper")]
    WicketKeeper,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Batsman,
        Role::Bowler,
        Role::AllRounder,
        Role::WicketKeeper,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Batsman => "Batsman",
            Role::Bowler => "Bowler",
            Role::AllRounder => "All-rounder",
            Role::WicketKeeper => "Wicket-keeper",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Countries a generated player can come from.
pub const COUNTRIES: [&str; 8] = [
    "India",
    "Australia",
    "England",
    "New Zealand",
    "South Africa",
    "West Indies",
    "Pakistan",
    "Sri Lanka",
];

/// Opening prices a generated player can carry, in hundredths of a crore.
pub const BASE_PRICES: [i64; 5] = [50, 75, 100, 150, 200];

/// Pool size used when the setup does not say otherwise.
pub const DEFAULT_POOL_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// Display-only career numbers. They never influence the auction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub batting_avg: f64,
    pub bowling_avg: f64,
    pub matches_played: u32,
}

/// Sale metadata recorded when the hammer falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleInfo {
    pub sold_to: TeamId,
    pub sold_price: Crores,
}

/// Whether a player has been bought. An unsold player carries no sale data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerStatus {
    #[default]
    Unsold,
    Sold(SaleInfo),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub country: String,
    pub base_price: Crores,
    pub stats: PlayerStats,
    pub status: PlayerStatus,
}

impl Player {
    pub fn is_sold(&self) -> bool {
        matches!(self.status, PlayerStatus::Sold(_))
    }

    pub fn sale(&self) -> Option<SaleInfo> {
        match self.status {
            PlayerStatus::Sold(info) => Some(info),
            PlayerStatus::Unsold => None,
        }
    }

    /// Price paid, or zero for an unsold player.
    pub fn sold_price(&self) -> Crores {
        self.sale().map(|s| s.sold_price).unwrap_or(Crores::ZERO)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Generate `count` players named `Player 1` .. `Player {count}`.
///
/// Role, country and base price are drawn uniformly from their fixed sets.
/// Batting average falls in [20, 60] and bowling average in [18, 40], both
/// rounded to one decimal; matches played falls in [10, 200].
pub fn generate<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let role = *Role::ALL.choose(rng).unwrap_or(&Role::Batsman);
            let country = COUNTRIES.choose(rng).copied().unwrap_or("India");
            let base = BASE_PRICES.choose(rng).copied().unwrap_or(50);
            Player {
                id: PlayerId::new(),
                name: format!("Player {}", i + 1),
                role,
                country: country.to_string(),
                base_price: Crores::from_hundredths(base),
                stats: PlayerStats {
                    batting_avg: round_one(rng.random_range(20.0..=60.0)),
                    bowling_avg: round_one(rng.random_range(18.0..=40.0)),
                    matches_played: rng.random_range(10..=200),
                },
                status: PlayerStatus::Unsold,
            }
        })
        .collect()
}

fn round_one(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
