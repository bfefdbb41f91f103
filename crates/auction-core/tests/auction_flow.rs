// Integration tests for the auction core.
//
// These drive whole runs through the public API with seeded random sources
// and check the invariants that must hold across many lots: purses never go
// negative and always match squad prices, players are drawn at most once,
// bids only climb, and every run terminates.

use std::collections::HashSet;

use auction_core::engine::{AuctionRun, Outcome, Phase};
use auction_core::error::AuctionError;
use auction_core::export;
use auction_core::money::{next_bid, Crores, MIN_BID_UNIT};
use auction_core::player::{PlayerId, PlayerStatus};
use auction_core::results::summarize;
use auction_core::setup::AuctionSetup;
use auction_core::team::{TeamId, TeamSpec};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ===========================================================================
// Test helpers
// ===========================================================================

fn league(n: usize, purse: f64, squad: usize) -> AuctionSetup {
    let teams = (1..=n)
        .map(|i| TeamSpec::new(format!("Franchise {i}"), Crores::from_f64(purse)))
        .collect();
    AuctionSetup::new(teams, squad)
}

/// Drive a run to completion with random bidders. Each lot gets up to
/// `max_bids` bids from random teams, then is sold (if anyone bid) or passed.
/// Returns the number of lots drawn.
fn play_out(run: &mut AuctionRun, driver: &mut StdRng, max_bids: usize) -> usize {
    let mut lots = 0;
    let mut seen: HashSet<PlayerId> = HashSet::new();

    while !run.is_complete() {
        match run.draw().expect("draw should succeed on an idle run") {
            Outcome::LotOpened { player, opening_bid, .. } => {
                assert!(seen.insert(player), "player drawn twice");
                lots += 1;

                let mut expected = opening_bid;
                for _ in 0..driver.random_range(0..=max_bids) {
                    let teams: Vec<TeamId> = run.teams().iter().map(|t| t.id).collect();
                    let team = teams[driver.random_range(0..teams.len())];
                    match run.bid(team) {
                        Ok(Outcome::BidAccepted { amount, .. }) => {
                            expected = next_bid(expected);
                            assert_eq!(amount, expected);
                        }
                        Ok(other) => panic!("unexpected outcome {other:?}"),
                        Err(AuctionError::IneligibleBid { .. }) => {
                            // rejected bids leave the lot untouched
                            assert_eq!(run.current_lot().unwrap().current_bid, expected);
                        }
                        Err(e) => panic!("unexpected error {e}"),
                    }
                }

                if run.current_lot().unwrap().leading_team.is_some() && driver.random_bool(0.8) {
                    run.sold().unwrap();
                } else {
                    run.pass().unwrap();
                }
            }
            Outcome::Completed => break,
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_invariants(run);
    }
    lots
}

fn assert_invariants(run: &AuctionRun) {
    for team in run.teams() {
        let squad_total: Crores = team.squad.iter().map(|p| p.sold_price()).sum();
        assert_eq!(team.purse, team.original_purse - squad_total, "{}", team.name);
        assert!(team.purse >= Crores::ZERO, "{} went negative", team.name);
        assert!(team.squad.len() <= run.max_squad_size());
        let expected_can_bid =
            team.squad.len() < run.max_squad_size() && team.purse >= MIN_BID_UNIT;
        assert_eq!(team.can_bid, expected_can_bid);
        for p in &team.squad {
            assert!(p.sold_price() >= p.base_price);
        }
    }
    if run.current_lot().is_none() {
        let accounted = run.sold_count() + run.passed_count() + run.remaining_count();
        assert_eq!(accounted, run.players().len());
    }
}

// ===========================================================================
// Whole-run tests
// ===========================================================================

#[test]
fn reference_auction_runs_to_completion() {
    let setup = league(3, 90.0, 15);
    let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(2024)).unwrap();
    let mut driver = StdRng::seed_from_u64(1);

    let lots = play_out(&mut run, &mut driver, 12);

    assert!(run.is_complete());
    assert_eq!(run.phase(), Phase::Complete);
    assert!(lots <= 100);
    let pool_empty = run.remaining_count() == 0;
    let nobody_can_bid = run.teams().iter().all(|t| !t.can_bid);
    assert!(pool_empty || nobody_can_bid);
}

#[test]
fn many_seeds_keep_invariants() {
    for seed in 0..25 {
        let setup = league(2 + (seed as usize % 9), 5.0 + (seed as f64) * 3.5, 11);
        let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(seed)).unwrap();
        let mut driver = StdRng::seed_from_u64(seed + 1000);
        let lots = play_out(&mut run, &mut driver, 30);
        assert!(run.is_complete(), "seed {seed} did not finish");
        assert!(lots <= run.players().len());
    }
}

#[test]
fn tight_purses_still_terminate() {
    // Five-crore purses can strand a team just above the minimum bid unit, so
    // the run may end either way; it must still end.
    let setup = league(2, 5.0, 25);
    let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(77)).unwrap();
    let mut driver = StdRng::seed_from_u64(78);
    let lots = play_out(&mut run, &mut driver, 40);

    assert!(run.is_complete());
    assert!(lots <= run.players().len());
    if run.remaining_count() > 0 {
        assert!(run.teams().iter().all(|t| !t.can_bid));
    }
    assert!(run.remaining_players().all(|p| p.status == PlayerStatus::Unsold));
}

#[test]
fn sold_players_match_squads_and_results() {
    let setup = league(4, 40.0, 12);
    let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(5)).unwrap();
    let mut driver = StdRng::seed_from_u64(6);
    play_out(&mut run, &mut driver, 10);

    let sold_ids: HashSet<PlayerId> = run
        .players()
        .iter()
        .filter(|p| p.is_sold())
        .map(|p| p.id)
        .collect();
    let squad_ids: HashSet<PlayerId> = run
        .teams()
        .iter()
        .flat_map(|t| t.squad.iter().map(|p| p.id))
        .collect();
    assert_eq!(sold_ids, squad_ids);

    for team in run.teams() {
        for p in &team.squad {
            let catalog = run.player(p.id).unwrap();
            assert_eq!(catalog.sale().unwrap().sold_to, team.id);
        }
    }

    let summary = summarize(&run);
    assert_eq!(summary.players_sold, sold_ids.len());
    assert_eq!(summary.players_sold, run.sales().len());
    let spent: Crores = run.sales().iter().map(|s| s.price).sum();
    assert_eq!(summary.total_spent, spent);

    let table = export::transactions_table(run.teams());
    assert_eq!(table.len(), summary.players_sold);
}

#[test]
fn completed_run_rejects_every_event() {
    let setup = league(2, 90.0, 11).with_pool_size(3);
    let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(3)).unwrap();
    for _ in 0..3 {
        run.draw().unwrap();
        run.pass().unwrap();
    }
    assert!(run.is_complete());

    let team = run.teams()[0].id;
    let before = run.snapshot();
    assert_eq!(run.draw().unwrap_err(), AuctionError::AuctionComplete);
    assert_eq!(run.bid(team).unwrap_err(), AuctionError::AuctionComplete);
    assert_eq!(run.sold().unwrap_err(), AuctionError::AuctionComplete);
    assert_eq!(run.pass().unwrap_err(), AuctionError::AuctionComplete);
    assert_eq!(run.snapshot(), before);
}

#[test]
fn rejected_actions_leave_snapshot_unchanged() {
    let setup = league(2, 5.0, 11);
    let mut run = AuctionRun::new(&setup, StdRng::seed_from_u64(12)).unwrap();
    let a = run.teams()[0].id;

    let idle = run.snapshot();
    assert!(run.sold().is_err());
    assert!(run.pass().is_err());
    assert!(run.bid(a).is_err());
    assert_eq!(run.snapshot(), idle);

    run.draw().unwrap();
    run.bid(a).unwrap();
    let open = run.snapshot();
    assert!(run.bid(a).is_err());
    assert!(run.draw().is_err());
    assert_eq!(run.snapshot(), open);
}

#[test]
fn scenario_one_crore_player_bracket_steps() {
    assert_eq!(next_bid(Crores::from_f64(1.0)), Crores::from_f64(1.10));
    assert_eq!(next_bid(Crores::from_f64(2.05)), Crores::from_f64(2.25));
}

#[test]
fn teams_sharing_an_export_file_cannot_start() {
    let teams = vec![
        TeamSpec::new("Team 1", Crores::from_f64(20.0)),
        TeamSpec::new("Team_1", Crores::from_f64(20.0)),
    ];
    let setup = AuctionSetup::new(teams, 11).with_pool_size(4);
    assert_eq!(export::export_file_stem("Team 1"), export::export_file_stem("Team_1"));
    let err = AuctionRun::new(&setup, StdRng::seed_from_u64(4)).unwrap_err();
    assert!(matches!(err, AuctionError::InvalidSetup { ref field, .. } if field == "teams[1]"));
}
