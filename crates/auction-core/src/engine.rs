// Auction engine: the lot-by-lot state machine.
//
// Idle --Draw--> LotOpen --Bid--> LotOpen --Sold/Pass--> Idle
//   \                                                     |
//    +------------------- Complete <----------------------+
//
// The engine owns the player catalog, the remaining pool, the teams and the
// current lot. One event is applied at a time; a rejected event leaves every
// field untouched.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AuctionError, BidRejection};
use crate::money::{next_bid, Crores};
use crate::player::{self, Player, PlayerId, PlayerStatus, Role, SaleInfo};
use crate::setup::AuctionSetup;
use crate::team::{create_teams, recompute_eligibility, Team, TeamId, TeamStatus};

/// How many of the most expensive remaining players a draw chooses among.
pub const CANDIDATE_WINDOW: usize = 10;

// ---------------------------------------------------------------------------
// Supporting types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No lot open, players remain and someone can still bid.
    Idle,
    /// A player is under the hammer.
    LotOpen,
    /// Terminal. No further lots open.
    Complete,
}

/// The player currently under auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    /// 1-based count of lots drawn in this run.
    pub lot_number: u32,
    pub player: PlayerId,
    pub current_bid: Crores,
    /// Only ever set while the lot is open.
    pub leading_team: Option<TeamId>,
}

/// External inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionEvent {
    Draw,
    Bid(TeamId),
    Sold,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LotResult {
    Sold {
        player: PlayerId,
        team: TeamId,
        price: Crores,
    },
    Passed {
        player: PlayerId,
    },
}

/// What an accepted event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    LotOpened {
        lot_number: u32,
        player: PlayerId,
        opening_bid: Crores,
    },
    BidAccepted {
        team: TeamId,
        amount: Crores,
    },
    LotClosed {
        result: LotResult,
        /// Set when closing this lot also ended the auction.
        auction_complete: bool,
    },
    Completed,
}

/// One line of the transaction log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub lot_number: u32,
    pub player_id: PlayerId,
    pub player_name: String,
    pub role: Role,
    pub team_id: TeamId,
    pub team_name: String,
    pub price: Crores,
    pub at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// AuctionRun
// ---------------------------------------------------------------------------

/// A single auction from setup to completion.
///
/// The random source drives player selection only; inject a seeded one to
/// make draws reproducible.
#[derive(Debug)]
pub struct AuctionRun<R: Rng = StdRng> {
    max_squad_size: usize,
    /// Catalog in generation order. Status and sale data change here.
    players: Vec<Player>,
    /// Undrawn players. Shrinks monotonically.
    remaining: Vec<PlayerId>,
    /// Players drawn and passed. They never return to the pool.
    passed: Vec<PlayerId>,
    teams: Vec<Team>,
    lot: Option<Lot>,
    lots_drawn: u32,
    sales: Vec<Sale>,
    complete: bool,
    rng: R,
}

impl AuctionRun<StdRng> {
    /// Start a run with a freshly generated pool, seeded from `seed` when
    /// given and from the OS otherwise.
    pub fn start(setup: &AuctionSetup, seed: Option<u64>) -> Result<Self, AuctionError> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        AuctionRun::new(setup, rng)
    }
}

impl<R: Rng> AuctionRun<R> {
    /// Validate `setup`, generate `setup.pool_size` players and create the teams.
    pub fn new(setup: &AuctionSetup, mut rng: R) -> Result<Self, AuctionError> {
        setup.validate()?;
        let players = player::generate(setup.pool_size, &mut rng);
        Ok(Self::assemble(setup, players, rng))
    }

    /// Start a run over a caller-provided pool. The pool size in `setup` is
    /// ignored in favour of `players.len()`. Every player must be unsold and
    /// carry a distinct id.
    pub fn with_players(
        setup: &AuctionSetup,
        players: Vec<Player>,
        rng: R,
    ) -> Result<Self, AuctionError> {
        let setup = setup.clone().with_pool_size(players.len());
        setup.validate()?;

        let mut ids = HashSet::with_capacity(players.len());
        for (i, p) in players.iter().enumerate() {
            let field = format!("players[{i}]");
            if !ids.insert(p.id) {
                return Err(AuctionError::invalid_setup(
                    &field,
                    format!("duplicate player id {}", p.id),
                ));
            }
            if p.is_sold() {
                return Err(AuctionError::invalid_setup(
                    &field,
                    format!("{} is already sold", p.name),
                ));
            }
        }
        Ok(Self::assemble(&setup, players, rng))
    }

    fn assemble(setup: &AuctionSetup, players: Vec<Player>, rng: R) -> Self {
        let teams = create_teams(&setup.teams, setup.max_squad_size);
        let remaining = players.iter().map(|p| p.id).collect();
        info!(
            "Auction run created: {} teams, {} players, max squad {}",
            teams.len(),
            players.len(),
            setup.max_squad_size
        );
        let mut run = AuctionRun {
            max_squad_size: setup.max_squad_size,
            players,
            remaining,
            passed: Vec::new(),
            teams,
            lot: None,
            lots_drawn: 0,
            sales: Vec::new(),
            complete: false,
            rng,
        };
        run.settle();
        run
    }

    // --- Queries ---

    pub fn phase(&self) -> Phase {
        if self.complete {
            Phase::Complete
        } else if self.lot.is_some() {
            Phase::LotOpen
        } else {
            Phase::Idle
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn max_squad_size(&self) -> usize {
        self.max_squad_size
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Every player in the run, in generation order.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Players not yet drawn.
    pub fn remaining_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.remaining.iter().filter_map(|id| self.player(*id))
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// Players drawn and left unsold.
    pub fn passed_players(&self) -> impl Iterator<Item = &Player> + '_ {
        self.passed.iter().filter_map(|id| self.player(*id))
    }

    pub fn passed_count(&self) -> usize {
        self.passed.len()
    }

    pub fn sold_count(&self) -> usize {
        self.sales.len()
    }

    pub fn current_lot(&self) -> Option<&Lot> {
        self.lot.as_ref()
    }

    /// The player under the hammer, if any.
    pub fn current_player(&self) -> Option<&Player> {
        self.lot.as_ref().and_then(|l| self.player(l.player))
    }

    pub fn lots_drawn(&self) -> u32 {
        self.lots_drawn
    }

    /// Sales in the order they happened.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    /// The bid `team` would place right now, or `None` when it may not bid.
    pub fn next_bid_for(&self, team: TeamId) -> Option<Crores> {
        self.check_bid(team).ok()
    }

    // --- Transitions ---

    /// Apply one event. On error nothing changes.
    pub fn apply(&mut self, event: AuctionEvent) -> Result<Outcome, AuctionError> {
        if self.complete {
            debug!("Rejected {:?}: auction complete", event);
            return Err(AuctionError::AuctionComplete);
        }
        let result = match event {
            AuctionEvent::Draw => self.open_lot(),
            AuctionEvent::Bid(team) => self.place_bid(team),
            AuctionEvent::Sold => self.close_sold(),
            AuctionEvent::Pass => self.close_passed(),
        };
        if let Err(ref e) = result {
            debug!("Rejected {:?}: {}", event, e);
        }
        result
    }

    pub fn draw(&mut self) -> Result<Outcome, AuctionError> {
        self.apply(AuctionEvent::Draw)
    }

    pub fn bid(&mut self, team: TeamId) -> Result<Outcome, AuctionError> {
        self.apply(AuctionEvent::Bid(team))
    }

    pub fn sold(&mut self) -> Result<Outcome, AuctionError> {
        self.apply(AuctionEvent::Sold)
    }

    pub fn pass(&mut self) -> Result<Outcome, AuctionError> {
        self.apply(AuctionEvent::Pass)
    }

    fn open_lot(&mut self) -> Result<Outcome, AuctionError> {
        if self.lot.is_some() {
            return Err(AuctionError::LotAlreadyOpen);
        }
        if self.settle() {
            return Ok(Outcome::Completed);
        }

        let candidates: Vec<(PlayerId, Crores)> = self
            .remaining_players()
            .map(|p| (p.id, p.base_price))
            .collect();
        let Some(player_id) = pick_candidate(&candidates, &mut self.rng) else {
            // settle() already ruled out an empty pool
            return Err(AuctionError::AuctionComplete);
        };
        self.remaining.retain(|id| *id != player_id);

        let opening_bid = candidates
            .iter()
            .find(|(id, _)| *id == player_id)
            .map(|(_, price)| *price)
            .unwrap_or(Crores::ZERO);
        self.lots_drawn += 1;
        self.lot = Some(Lot {
            lot_number: self.lots_drawn,
            player: player_id,
            current_bid: opening_bid,
            leading_team: None,
        });

        if let Some(p) = self.player(player_id) {
            info!(
                "Lot {} opened: {} ({}, {}) base {}",
                self.lots_drawn, p.name, p.role, p.country, p.base_price
            );
        }
        Ok(Outcome::LotOpened {
            lot_number: self.lots_drawn,
            player: player_id,
            opening_bid,
        })
    }

    /// Guard for a bid by `team_id`; returns the amount it would bid.
    fn check_bid(&self, team_id: TeamId) -> Result<Crores, AuctionError> {
        let lot = self.lot.as_ref().ok_or(AuctionError::NoActiveLot)?;
        let team = self
            .team(team_id)
            .ok_or(AuctionError::UnknownTeam(team_id))?;
        let proposed = next_bid(lot.current_bid);
        let reject = |reason| AuctionError::IneligibleBid {
            team: team.name.clone(),
            reason,
        };

        if lot.leading_team == Some(team_id) {
            return Err(reject(BidRejection::AlreadyLeading));
        }
        if !team.can_bid && team.status(self.max_squad_size) == TeamStatus::SquadFull {
            return Err(reject(BidRejection::SquadFull));
        }
        if !team.can_bid || team.purse < proposed {
            return Err(reject(BidRejection::InsufficientPurse {
                purse: team.purse,
                required: proposed,
            }));
        }
        Ok(proposed)
    }

    fn place_bid(&mut self, team_id: TeamId) -> Result<Outcome, AuctionError> {
        let amount = self.check_bid(team_id)?;
        let lot = self.lot.as_mut().ok_or(AuctionError::NoActiveLot)?;
        lot.current_bid = amount;
        lot.leading_team = Some(team_id);
        debug!("Lot {}: {} bids {}", lot.lot_number, team_id, amount);
        Ok(Outcome::BidAccepted {
            team: team_id,
            amount,
        })
    }

    fn close_sold(&mut self) -> Result<Outcome, AuctionError> {
        let lot = self.lot.ok_or(AuctionError::NoActiveLot)?;
        let team_id = lot.leading_team.ok_or(AuctionError::NoLeadingBid)?;
        let team_idx = self
            .teams
            .iter()
            .position(|t| t.id == team_id)
            .ok_or(AuctionError::UnknownTeam(team_id))?;
        let player_idx = self
            .players
            .iter()
            .position(|p| p.id == lot.player)
            .ok_or(AuctionError::NoActiveLot)?;

        let price = lot.current_bid;
        let player = &mut self.players[player_idx];
        player.status = PlayerStatus::Sold(SaleInfo {
            sold_to: team_id,
            sold_price: price,
        });
        let sold_player = player.clone();

        let team = &mut self.teams[team_idx];
        team.purse -= price;
        team.squad.push(sold_player.clone());

        info!(
            "Lot {}: {} sold to {} for {} (purse left {})",
            lot.lot_number, sold_player.name, team.name, price, team.purse
        );

        self.sales.push(Sale {
            lot_number: lot.lot_number,
            player_id: sold_player.id,
            player_name: sold_player.name,
            role: sold_player.role,
            team_id,
            team_name: team.name.clone(),
            price,
            at: Utc::now(),
        });

        for team in &mut self.teams {
            recompute_eligibility(team, self.max_squad_size);
        }
        self.lot = None;
        let auction_complete = self.settle();

        Ok(Outcome::LotClosed {
            result: LotResult::Sold {
                player: lot.player,
                team: team_id,
                price,
            },
            auction_complete,
        })
    }

    fn close_passed(&mut self) -> Result<Outcome, AuctionError> {
        let lot = self.lot.take().ok_or(AuctionError::NoActiveLot)?;
        self.passed.push(lot.player);
        if let Some(p) = self.player(lot.player) {
            info!("Lot {}: {} passed unsold", lot.lot_number, p.name);
        }
        let auction_complete = self.settle();
        Ok(Outcome::LotClosed {
            result: LotResult::Passed { player: lot.player },
            auction_complete,
        })
    }

    /// Move an idle run to Complete when the pool is empty or nobody can
    /// bid. Returns whether the run is complete.
    fn settle(&mut self) -> bool {
        if self.complete {
            return true;
        }
        if self.lot.is_some() {
            return false;
        }
        let pool_empty = self.remaining.is_empty();
        let nobody_can_bid = !self.teams.iter().any(|t| t.can_bid);
        if pool_empty || nobody_can_bid {
            self.complete = true;
            info!(
                "Auction complete after {} lots: {} sold, {} passed, {} never drawn{}",
                self.lots_drawn,
                self.sales.len(),
                self.passed.len(),
                self.remaining.len(),
                if nobody_can_bid { " (no eligible teams)" } else { "" }
            );
        }
        self.complete
    }
}

/// Pick the next player: sort by base price, highest first, and choose
/// uniformly among the top [`CANDIDATE_WINDOW`]. Ties keep pool order.
pub fn pick_candidate<R: Rng + ?Sized>(
    candidates: &[(PlayerId, Crores)],
    rng: &mut R,
) -> Option<PlayerId> {
    if candidates.is_empty() {
        return None;
    }
    let mut sorted = candidates.to_vec();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));
    let window = CANDIDATE_WINDOW.min(sorted.len());
    let idx = rng.random_range(0..window);
    Some(sorted[idx].0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerStats;
    use crate::team::TeamSpec;

    fn cr(v: f64) -> Crores {
        Crores::from_f64(v)
    }

    fn setup(n: usize, purse: f64, squad: usize) -> AuctionSetup {
        let teams = (1..=n)
            .map(|i| TeamSpec::new(format!("Team {i}"), cr(purse)))
            .collect();
        AuctionSetup::new(teams, squad)
    }

    fn fixed_player(name: &str, base: f64) -> Player {
        Player {
            id: PlayerId::new(),
            name: name.to_string(),
            role: Role::Batsman,
            country: "India".to_string(),
            base_price: cr(base),
            stats: PlayerStats {
                batting_avg: 40.0,
                bowling_avg: 30.0,
                matches_played: 50,
            },
            status: PlayerStatus::Unsold,
        }
    }

    fn seeded(setup: &AuctionSetup, seed: u64) -> AuctionRun {
        AuctionRun::new(setup, StdRng::seed_from_u64(seed)).unwrap()
    }

    #[test]
    fn new_run_starts_idle_with_full_pool() {
        let run = seeded(&setup(3, 90.0, 15), 1);
        assert_eq!(run.phase(), Phase::Idle);
        assert_eq!(run.remaining_count(), 100);
        assert_eq!(run.teams().len(), 3);
        assert!(run.current_lot().is_none());
    }

    #[test]
    fn invalid_setup_is_rejected_before_run() {
        let err = AuctionRun::new(&setup(1, 90.0, 15), StdRng::seed_from_u64(1)).unwrap_err();
        assert_eq!(err.code(), "invalid_setup");
    }

    #[test]
    fn pool_with_duplicate_ids_is_rejected() {
        let first = fixed_player("Alpha", 1.0);
        let mut twin = fixed_player("Beta", 1.0);
        twin.id = first.id;
        let err = AuctionRun::with_players(&setup(2, 90.0, 15), vec![first, twin], StdRng::seed_from_u64(0))
            .unwrap_err();
        match err {
            AuctionError::InvalidSetup { field, .. } => assert_eq!(field, "players[1]"),
            other => panic!("expected InvalidSetup, got {other:?}"),
        }
    }

    #[test]
    fn pool_with_sold_player_is_rejected() {
        let s = setup(2, 90.0, 15);
        let mut donor = AuctionRun::with_players(&s, vec![fixed_player("Alpha", 1.0)], StdRng::seed_from_u64(0))
            .unwrap();
        let a = donor.teams()[0].id;
        donor.draw().unwrap();
        donor.bid(a).unwrap();
        donor.sold().unwrap();
        let sold = donor.players()[0].clone();
        assert!(sold.is_sold());

        let err = AuctionRun::with_players(&s, vec![fixed_player("Beta", 1.0), sold], StdRng::seed_from_u64(0))
            .unwrap_err();
        assert_eq!(err.code(), "invalid_setup");
    }

    #[test]
    fn draw_opens_lot_at_base_price_and_removes_player() {
        let mut run = seeded(&setup(3, 90.0, 15), 2);
        let outcome = run.draw().unwrap();
        let Outcome::LotOpened { player, opening_bid, lot_number } = outcome else {
            panic!("expected LotOpened, got {outcome:?}");
        };
        assert_eq!(lot_number, 1);
        assert_eq!(run.phase(), Phase::LotOpen);
        assert_eq!(run.remaining_count(), 99);
        assert!(run.remaining_players().all(|p| p.id != player));
        let drawn = run.player(player).unwrap();
        assert_eq!(opening_bid, drawn.base_price);
        assert!(run.current_lot().unwrap().leading_team.is_none());
    }

    #[test]
    fn draw_while_lot_open_is_rejected() {
        let mut run = seeded(&setup(2, 90.0, 15), 3);
        run.draw().unwrap();
        assert_eq!(run.draw().unwrap_err(), AuctionError::LotAlreadyOpen);
        assert_eq!(run.remaining_count(), 99);
    }

    #[test]
    fn draw_takes_from_the_top_ten_by_base_price() {
        let mut players: Vec<Player> = (0..10).map(|i| fixed_player(&format!("Star {i}"), 2.0)).collect();
        players.extend((0..30).map(|i| fixed_player(&format!("Squad {i}"), 0.5)));
        let s = setup(2, 90.0, 15);
        for seed in 0..20 {
            let mut run = AuctionRun::with_players(&s, players.clone(), StdRng::seed_from_u64(seed)).unwrap();
            run.draw().unwrap();
            assert!(run.current_player().unwrap().name.starts_with("Star"));
        }
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let s = setup(2, 90.0, 15);
        let players: Vec<Player> = (0..25).map(|i| fixed_player(&format!("P{i}"), 1.0)).collect();
        let mut a = AuctionRun::with_players(&s, players.clone(), StdRng::seed_from_u64(9)).unwrap();
        let mut b = AuctionRun::with_players(&s, players, StdRng::seed_from_u64(9)).unwrap();
        for _ in 0..10 {
            a.draw().unwrap();
            b.draw().unwrap();
            assert_eq!(a.current_player().unwrap().name, b.current_player().unwrap().name);
            a.pass().unwrap();
            b.pass().unwrap();
        }
    }

    #[test]
    fn bid_follows_increment_ladder() {
        let s = setup(2, 90.0, 15);
        let mut run =
            AuctionRun::with_players(&s, vec![fixed_player("Solo", 1.0)], StdRng::seed_from_u64(0)).unwrap();
        let a = run.teams()[0].id;
        let b = run.teams()[1].id;
        run.draw().unwrap();

        assert_eq!(run.bid(a).unwrap(), Outcome::BidAccepted { team: a, amount: cr(1.10) });
        let mut bidder = b;
        while run.current_lot().unwrap().current_bid < cr(2.0) {
            run.bid(bidder).unwrap();
            bidder = if bidder == a { b } else { a };
        }
        assert_eq!(run.current_lot().unwrap().current_bid, cr(2.0));
        run.bid(bidder).unwrap();
        assert_eq!(run.current_lot().unwrap().current_bid, cr(2.2));
    }

    #[test]
    fn current_bid_equals_base_plus_increments() {
        let s = setup(2, 90.0, 15);
        let mut run =
            AuctionRun::with_players(&s, vec![fixed_player("Solo", 0.75)], StdRng::seed_from_u64(0)).unwrap();
        let ids = [run.teams()[0].id, run.teams()[1].id];
        run.draw().unwrap();
        let mut expected = cr(0.75);
        let mut last = expected;
        for i in 0..40 {
            expected = next_bid(expected);
            run.bid(ids[i % 2]).unwrap();
            let current = run.current_lot().unwrap().current_bid;
            assert_eq!(current, expected);
            assert!(current > last);
            last = current;
        }
    }

    #[test]
    fn leading_team_cannot_raise_its_own_bid() {
        let mut run = seeded(&setup(2, 90.0, 15), 4);
        let a = run.teams()[0].id;
        run.draw().unwrap();
        run.bid(a).unwrap();
        let before = run.current_lot().copied();
        let err = run.bid(a).unwrap_err();
        assert!(matches!(
            err,
            AuctionError::IneligibleBid { reason: BidRejection::AlreadyLeading, .. }
        ));
        assert_eq!(run.current_lot().copied(), before);
        assert_eq!(run.next_bid_for(a), None);
    }

    #[test]
    fn bid_without_lot_is_rejected() {
        let mut run = seeded(&setup(2, 90.0, 15), 5);
        let a = run.teams()[0].id;
        assert_eq!(run.bid(a).unwrap_err(), AuctionError::NoActiveLot);
        assert_eq!(run.next_bid_for(a), None);
    }

    #[test]
    fn bid_from_unknown_team_is_rejected() {
        let mut run = seeded(&setup(2, 90.0, 15), 5);
        run.draw().unwrap();
        let stranger = TeamId::new();
        assert_eq!(run.bid(stranger).unwrap_err(), AuctionError::UnknownTeam(stranger));
    }

    #[test]
    fn bid_beyond_purse_is_rejected() {
        let s = setup(2, 5.0, 15);
        let mut run =
            AuctionRun::with_players(&s, vec![fixed_player("Pricey", 4.9)], StdRng::seed_from_u64(0)).unwrap();
        let a = run.teams()[0].id;
        run.draw().unwrap();
        // 4.90 + 0.20 = 5.10 > 5.00
        let err = run.bid(a).unwrap_err();
        assert!(matches!(
            err,
            AuctionError::IneligibleBid { reason: BidRejection::InsufficientPurse { .. }, .. }
        ));
        assert!(run.current_lot().unwrap().leading_team.is_none());
    }

    #[test]
    fn sold_without_bid_is_rejected_and_lot_stays_open() {
        let mut run = seeded(&setup(2, 90.0, 15), 6);
        run.draw().unwrap();
        assert_eq!(run.sold().unwrap_err(), AuctionError::NoLeadingBid);
        assert_eq!(run.phase(), Phase::LotOpen);
    }

    #[test]
    fn sold_and_pass_without_lot_are_rejected() {
        let mut run = seeded(&setup(2, 90.0, 15), 6);
        assert_eq!(run.sold().unwrap_err(), AuctionError::NoActiveLot);
        assert_eq!(run.pass().unwrap_err(), AuctionError::NoActiveLot);
        assert_eq!(run.phase(), Phase::Idle);
    }

    #[test]
    fn sold_transfers_player_and_money() {
        let s = setup(2, 10.0, 15);
        let players = vec![fixed_player("Alpha", 1.0), fixed_player("Beta", 1.0)];
        let mut run = AuctionRun::with_players(&s, players, StdRng::seed_from_u64(0)).unwrap();
        let a = run.teams()[0].id;
        let b = run.teams()[1].id;
        run.draw().unwrap();
        run.bid(a).unwrap();
        run.bid(b).unwrap();
        let player_id = run.current_lot().unwrap().player;

        let outcome = run.sold().unwrap();
        assert_eq!(
            outcome,
            Outcome::LotClosed {
                result: LotResult::Sold { player: player_id, team: b, price: cr(1.2) },
                auction_complete: false,
            }
        );
        let team_b = run.team(b).unwrap();
        assert_eq!(team_b.purse, cr(8.8));
        assert_eq!(team_b.squad.len(), 1);
        assert_eq!(team_b.squad[0].id, player_id);
        let sale = run.player(player_id).unwrap().sale().unwrap();
        assert_eq!(sale.sold_to, b);
        assert_eq!(sale.sold_price, cr(1.2));
        assert_eq!(run.team(a).unwrap().purse, cr(10.0));
        assert_eq!(run.sales().len(), 1);
        assert_eq!(run.sales()[0].team_name, "Team 2");
        assert_eq!(run.phase(), Phase::Idle);
    }

    #[test]
    fn passed_player_never_returns() {
        let s = setup(2, 90.0, 15);
        let players = vec![fixed_player("Alpha", 1.0), fixed_player("Beta", 1.0)];
        let mut run = AuctionRun::with_players(&s, players, StdRng::seed_from_u64(0)).unwrap();
        let a = run.teams()[0].id;
        run.draw().unwrap();
        run.bid(a).unwrap();
        let passed = run.current_lot().unwrap().player;
        let outcome = run.pass().unwrap();
        assert_eq!(
            outcome,
            Outcome::LotClosed { result: LotResult::Passed { player: passed }, auction_complete: false }
        );
        assert_eq!(run.player(passed).unwrap().status, PlayerStatus::Unsold);
        assert!(run.remaining_players().all(|p| p.id != passed));
        assert_eq!(run.passed_count(), 1);
        assert_eq!(run.team(a).unwrap().purse, cr(90.0));

        run.draw().unwrap();
        assert_ne!(run.current_lot().unwrap().player, passed);
    }

    #[test]
    fn closing_the_last_lot_completes_the_run() {
        let s = setup(2, 90.0, 15);
        let mut run =
            AuctionRun::with_players(&s, vec![fixed_player("Last", 1.0)], StdRng::seed_from_u64(0)).unwrap();
        run.draw().unwrap();
        let outcome = run.pass().unwrap();
        assert!(matches!(outcome, Outcome::LotClosed { auction_complete: true, .. }));
        assert!(run.is_complete());
        assert_eq!(run.draw().unwrap_err(), AuctionError::AuctionComplete);
        assert_eq!(run.phase(), Phase::Complete);
    }

    #[test]
    fn broke_teams_end_the_auction_with_players_left() {
        // 3 teams at 5.00; each 4.60 player goes for 4.80 and leaves 0.20.
        let s = setup(3, 5.0, 11);
        let players: Vec<Player> = (0..5).map(|i| fixed_player(&format!("P{i}"), 4.6)).collect();
        let mut run = AuctionRun::with_players(&s, players, StdRng::seed_from_u64(11)).unwrap();
        let ids: Vec<TeamId> = run.teams().iter().map(|t| t.id).collect();

        for (i, team) in ids.iter().enumerate() {
            run.draw().unwrap();
            run.bid(*team).unwrap();
            let outcome = run.sold().unwrap();
            let done = matches!(outcome, Outcome::LotClosed { auction_complete: true, .. });
            assert_eq!(done, i == ids.len() - 1);
            assert!(!run.team(*team).unwrap().can_bid);
        }

        assert!(run.is_complete());
        assert_eq!(run.remaining_count(), 2);
        assert!(run.remaining_players().all(|p| p.status == PlayerStatus::Unsold));
        assert_eq!(run.draw().unwrap_err(), AuctionError::AuctionComplete);
    }

    #[test]
    fn ineligible_team_cannot_win_later_lots() {
        let s = setup(2, 5.0, 11);
        let players: Vec<Player> = vec![
            fixed_player("Big", 4.6),
            fixed_player("Small A", 0.5),
            fixed_player("Small B", 0.5),
        ];
        let mut run = AuctionRun::with_players(&s, players, StdRng::seed_from_u64(0)).unwrap();
        let a = run.teams()[0].id;
        // all three fit in the window, so pass until Big comes up
        loop {
            run.draw().unwrap();
            if run.current_player().unwrap().name == "Big" {
                break;
            }
            run.pass().unwrap();
        }
        run.bid(a).unwrap();
        run.sold().unwrap();
        let team_a = run.team(a).unwrap();
        assert!(!team_a.can_bid);
        assert_eq!(team_a.purse, cr(0.2));

        if !run.is_complete() {
            run.draw().unwrap();
            let err = run.bid(a).unwrap_err();
            assert_eq!(err.code(), "ineligible_bid");
        }
    }

    #[test]
    fn pick_candidate_prefers_higher_base_prices() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut candidates: Vec<(PlayerId, Crores)> =
            (0..5).map(|_| (PlayerId::new(), cr(2.0))).collect();
        let cheap: Vec<(PlayerId, Crores)> = (0..50).map(|_| (PlayerId::new(), cr(0.5))).collect();
        candidates.extend(cheap.iter().copied());
        for _ in 0..200 {
            let picked = pick_candidate(&candidates, &mut rng).unwrap();
            let pos = candidates.iter().position(|(id, _)| *id == picked).unwrap();
            // top five plus the first five cheap ones, in pool order
            assert!(pos < 10, "picked index {pos} outside the window");
        }
        assert!(pick_candidate(&[], &mut rng).is_none());
    }
}
