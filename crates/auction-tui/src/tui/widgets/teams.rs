// Teams widget: every team's purse, squad and bidding status.
//
// The key column is the digit that bids for the team. The leading team's row
// is highlighted; teams that cannot bid are dimmed.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Row, Table};
use ratatui::Frame;

use auction_core::snapshot::TeamView;
use auction_core::team::TeamStatus;

use super::format_crores;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let header = Row::new(vec![
        Cell::from("Key"),
        Cell::from("Team"),
        Cell::from("Purse"),
        Cell::from("Squad"),
        Cell::from("Next Bid"),
        Cell::from("Status"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = match state.snapshot {
        Some(ref snap) if !snap.teams.is_empty() => snap
            .teams
            .iter()
            .enumerate()
            .map(|(idx, team)| {
                let selected = state.show_squad && idx == state.selected_team;
                team_row(idx, team, snap.max_squad_size, selected)
            })
            .collect(),
        _ => vec![Row::new(vec![Cell::from(""), Cell::from("No teams")])],
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Min(14),
        Constraint::Length(10),
        Constraint::Length(7),
        Constraint::Length(10),
        Constraint::Length(18),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(table, area);
}

fn team_row(idx: usize, team: &TeamView, max_squad_size: usize, selected: bool) -> Row<'static> {
    let next_bid = team
        .next_bid
        .map(format_crores)
        .unwrap_or_else(|| "-".to_string());
    let status = if team.is_leading {
        "Leading".to_string()
    } else {
        team.status.label().to_string()
    };

    Row::new(vec![
        Cell::from(bid_key(idx)),
        Cell::from(team.name.clone()),
        Cell::from(format_crores(team.purse)),
        Cell::from(format!("{}/{}", team.squad_size, max_squad_size)),
        Cell::from(next_bid),
        Cell::from(status),
    ])
    .style(if selected {
        row_style(team).add_modifier(Modifier::REVERSED)
    } else {
        row_style(team)
    })
}

/// Key that bids for the team at `idx`: 1..9, then 0.
pub fn bid_key(idx: usize) -> String {
    match idx {
        0..=8 => (idx + 1).to_string(),
        9 => "0".to_string(),
        _ => String::new(),
    }
}

pub fn row_style(team: &TeamView) -> Style {
    if team.is_leading {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if team.status != TeamStatus::Active {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::White)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
