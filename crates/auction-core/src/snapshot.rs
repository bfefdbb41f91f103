// Read-only views of a run for renderers and exporters.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{AuctionRun, Phase, Sale};
use crate::money::Crores;
use crate::player::{PlayerStats, Role};
use crate::team::{TeamId, TeamStatus};

/// Everything a front end needs to draw the auction floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSnapshot {
    pub phase: Phase,
    pub lots_drawn: u32,
    pub max_squad_size: usize,
    pub current_lot: Option<LotView>,
    pub teams: Vec<TeamView>,
    pub progress: Progress,
    pub sales: Vec<Sale>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotView {
    pub lot_number: u32,
    pub player_name: String,
    pub role: Role,
    pub country: String,
    pub base_price: Crores,
    pub stats: PlayerStats,
    pub current_bid: Crores,
    pub leading_team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamView {
    pub id: TeamId,
    pub name: String,
    pub purse: Crores,
    pub original_purse: Crores,
    pub squad_size: usize,
    pub can_bid: bool,
    pub status: TeamStatus,
    /// What this team would bid on the open lot, if it may bid at all.
    pub next_bid: Option<Crores>,
    pub is_leading: bool,
    /// Players bought so far, in purchase order.
    pub squad: Vec<SquadEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadEntry {
    pub name: String,
    pub role: Role,
    pub price: Crores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub sold: usize,
    pub passed: usize,
    pub remaining: usize,
    pub total: usize,
}

impl<R: Rng> AuctionRun<R> {
    pub fn snapshot(&self) -> AuctionSnapshot {
        let leading = self.current_lot().and_then(|l| l.leading_team);

        let current_lot = self.current_lot().and_then(|lot| {
            let player = self.player(lot.player)?;
            Some(LotView {
                lot_number: lot.lot_number,
                player_name: player.name.clone(),
                role: player.role,
                country: player.country.clone(),
                base_price: player.base_price,
                stats: player.stats,
                current_bid: lot.current_bid,
                leading_team: leading
                    .and_then(|id| self.team(id))
                    .map(|t| t.name.clone()),
            })
        });

        let teams = self
            .teams()
            .iter()
            .map(|t| TeamView {
                id: t.id,
                name: t.name.clone(),
                purse: t.purse,
                original_purse: t.original_purse,
                squad_size: t.squad_size(),
                can_bid: t.can_bid,
                status: t.status(self.max_squad_size()),
                next_bid: self.next_bid_for(t.id),
                is_leading: leading == Some(t.id),
                squad: t
                    .squad
                    .iter()
                    .map(|p| SquadEntry {
                        name: p.name.clone(),
                        role: p.role,
                        price: p.sold_price(),
                    })
                    .collect(),
            })
            .collect();

        AuctionSnapshot {
            phase: self.phase(),
            lots_drawn: self.lots_drawn(),
            max_squad_size: self.max_squad_size(),
            current_lot,
            teams,
            progress: Progress {
                sold: self.sold_count(),
                passed: self.passed_count(),
                remaining: self.remaining_count(),
                total: self.players().len(),
            },
            sales: self.sales().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::AuctionSetup;
    use crate::team::TeamSpec;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn run() -> AuctionRun {
        let teams = vec![
            TeamSpec::new("Kolkata", Crores::from_f64(20.0)),
            TeamSpec::new("Delhi", Crores::from_f64(20.0)),
        ];
        AuctionRun::new(&AuctionSetup::new(teams, 15).with_pool_size(12), StdRng::seed_from_u64(8))
            .unwrap()
    }

    #[test]
    fn idle_snapshot_has_no_lot_and_no_bids() {
        let snap = run().snapshot();
        assert_eq!(snap.phase, Phase::Idle);
        assert!(snap.current_lot.is_none());
        assert!(snap.teams.iter().all(|t| t.next_bid.is_none() && !t.is_leading));
        assert_eq!(snap.progress, Progress { sold: 0, passed: 0, remaining: 12, total: 12 });
    }

    #[test]
    fn open_lot_snapshot_shows_bidder_and_next_bids() {
        let mut run = run();
        run.draw().unwrap();
        let kolkata = run.teams()[0].id;
        run.bid(kolkata).unwrap();
        let snap = run.snapshot();

        let lot = snap.current_lot.expect("lot should be open");
        assert_eq!(lot.lot_number, 1);
        assert_eq!(lot.leading_team.as_deref(), Some("Kolkata"));
        assert!(lot.current_bid > lot.base_price);

        assert!(snap.teams[0].is_leading);
        assert_eq!(snap.teams[0].next_bid, None);
        assert_eq!(snap.teams[1].next_bid, Some(crate::money::next_bid(lot.current_bid)));
        assert_eq!(snap.teams[1].status.label(), "Can bid");
    }

    #[test]
    fn snapshot_counts_sales_and_passes() {
        let mut run = run();
        let delhi = run.teams()[1].id;
        run.draw().unwrap();
        run.bid(delhi).unwrap();
        run.sold().unwrap();
        run.draw().unwrap();
        run.pass().unwrap();

        let snap = run.snapshot();
        assert_eq!(snap.progress.sold, 1);
        assert_eq!(snap.progress.passed, 1);
        assert_eq!(snap.progress.remaining, 10);
        assert_eq!(snap.sales.len(), 1);
        assert_eq!(snap.sales[0].team_name, "Delhi");
        assert_eq!(snap.teams[1].squad_size, 1);
        let bought = &snap.teams[1].squad;
        assert_eq!(bought.len(), 1);
        assert_eq!(bought[0].name, snap.sales[0].player_name);
        assert_eq!(bought[0].price, snap.sales[0].price);
        assert!(snap.teams[0].squad.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let mut run = run();
        run.draw().unwrap();
        let json = serde_json::to_value(run.snapshot()).unwrap();
        assert_eq!(json["phase"], "LotOpen");
        assert!(json["current_lot"]["current_bid"].is_number());
    }
}
