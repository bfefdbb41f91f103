// Error taxonomy for the auction core.
//
// Every rejected action leaves the run untouched; callers surface the
// error as a declined action, never as a crash.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::Crores;
use crate::team::TeamId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuctionError {
    #[error("invalid setup for `{field}`: {message}")]
    InvalidSetup { field: String, message: String },

    #[error("{team} cannot bid: {reason}")]
    IneligibleBid { team: String, reason: BidRejection },

    #[error("no lot is open")]
    NoActiveLot,

    #[error("no bid has been placed on the current lot")]
    NoLeadingBid,

    #[error("a lot is already open")]
    LotAlreadyOpen,

    #[error("the auction is complete")]
    AuctionComplete,

    #[error("unknown team {0}")]
    UnknownTeam(TeamId),
}

impl AuctionError {
    pub(crate) fn invalid_setup(field: &str, message: impl Into<String>) -> Self {
        AuctionError::InvalidSetup {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Short machine-readable reason code.
    pub fn code(&self) -> &'static str {
        match self {
            AuctionError::InvalidSetup { .. } => "invalid_setup",
            AuctionError::IneligibleBid { .. } => "ineligible_bid",
            AuctionError::NoActiveLot => "no_active_lot",
            AuctionError::NoLeadingBid => "no_leading_bid",
            AuctionError::LotAlreadyOpen => "lot_already_open",
            AuctionError::AuctionComplete => "auction_complete",
            AuctionError::UnknownTeam(_) => "unknown_team",
        }
    }
}

/// Why a particular team's bid was declined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BidRejection {
    SquadFull,
    InsufficientPurse { purse: Crores, required: Crores },
    AlreadyLeading,
}

impl fmt::Display for BidRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidRejection::SquadFull => write!(f, "squad is full"),
            BidRejection::InsufficientPurse { purse, required } => {
                write!(f, "purse {purse} is short of {required}")
            }
            BidRejection::AlreadyLeading => write!(f, "already holds the highest bid"),
        }
    }
}
