// Cricket player auction: data model, state machine and results.
//
// `AuctionRun` is the single owned aggregate. Front ends feed it events one
// at a time and read snapshots back; nothing else mutates it.

pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod money;
pub mod player;
pub mod results;
pub mod setup;
pub mod snapshot;
pub mod team;

pub use engine::{AuctionEvent, AuctionRun, Lot, LotResult, Outcome, Phase, Sale};
pub use error::{AuctionError, BidRejection};
pub use money::Crores;
pub use player::{Player, PlayerId, Role};
pub use setup::AuctionSetup;
pub use snapshot::AuctionSnapshot;
pub use team::{Team, TeamId, TeamSpec};
