// Results aggregation over a finished (or in-progress) run.
//
// Everything here is derived on demand from teams and players; nothing is
// cached between calls.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::AuctionRun;
use crate::money::Crores;
use crate::player::{Player, Role};
use crate::team::{Team, TeamId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighestPaid {
    pub player_name: String,
    pub team_name: String,
    pub price: Crores,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCount {
    pub role: Role,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamResult {
    pub team_id: TeamId,
    pub name: String,
    pub acquired: usize,
    pub spent: Crores,
    pub remaining: Crores,
    /// Squad counts per role, in role order, omitting empty roles.
    pub composition: Vec<RoleCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSummary {
    pub total_spent: Crores,
    pub players_sold: usize,
    pub players_unsold: usize,
    /// Zero when nothing sold.
    pub avg_price: Crores,
    pub highest_paid: Option<HighestPaid>,
    pub teams: Vec<TeamResult>,
}

/// Summarise a run.
pub fn summarize<R: Rng>(run: &AuctionRun<R>) -> AuctionSummary {
    let teams = run.teams();
    let total_spent: Crores = teams.iter().map(Team::spent).sum();
    let players_sold: usize = teams.iter().map(Team::squad_size).sum();

    let highest_paid = highest_paid(run.players()).map(|p| HighestPaid {
        player_name: p.name.clone(),
        team_name: p
            .sale()
            .and_then(|s| run.team(s.sold_to))
            .map(|t| t.name.clone())
            .unwrap_or_default(),
        price: p.sold_price(),
    });

    AuctionSummary {
        total_spent,
        players_sold,
        players_unsold: run.players().len().saturating_sub(players_sold),
        avg_price: total_spent.average_over(players_sold),
        highest_paid,
        teams: teams.iter().map(team_result).collect(),
    }
}

/// The sold player with the highest price. The first one wins a tie.
pub fn highest_paid(players: &[Player]) -> Option<&Player> {
    players
        .iter()
        .filter(|p| p.is_sold())
        .fold(None, |best: Option<&Player>, p| match best {
            Some(b) if b.sold_price() >= p.sold_price() => Some(b),
            _ => Some(p),
        })
}

/// Count a squad by role.
pub fn composition(squad: &[Player]) -> Vec<RoleCount> {
    Role::ALL
        .iter()
        .map(|&role| RoleCount {
            role,
            count: squad.iter().filter(|p| p.role == role).count(),
        })
        .filter(|rc| rc.count > 0)
        .collect()
}

pub fn team_result(team: &Team) -> TeamResult {
    TeamResult {
        team_id: team.id,
        name: team.name.clone(),
        acquired: team.squad_size(),
        spent: team.spent(),
        remaining: team.purse,
        composition: composition(&team.squad),
    }
}
