// Lot banner widget: the player on the block.
//
// Line 1: "LOT {n}: {player} ({role}, {country})"
// Line 2: "Base: X Cr | Current bid: Y Cr | Leading: {team}"
// Line 3: batting / bowling averages and matches played

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use auction_core::snapshot::LotView;

use super::format_crores;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let lot = state.snapshot.as_ref().and_then(|s| s.current_lot.as_ref());
    if let Some(lot) = lot {
        let paragraph = Paragraph::new(build_lot_lines(lot)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("On the Block")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(paragraph, area);
    } else {
        let paragraph = Paragraph::new(Line::from(Span::styled(
            "  No player on the block",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::DIM),
        )))
        .block(Block::default().borders(Borders::ALL).title("On the Block"));
        frame.render_widget(paragraph, area);
    }
}

fn build_lot_lines(lot: &LotView) -> Vec<Line<'static>> {
    let leader = lot.leading_team.clone().unwrap_or_else(|| "--".to_string());
    let leader_style = if lot.leading_team.is_some() {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    vec![
        Line::from(vec![
            Span::styled(
                format!(" LOT {}: ", lot.lot_number),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                lot.player_name.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" ({}, {})", lot.role, lot.country),
                Style::default().fg(Color::Gray),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Base: ", Style::default().fg(Color::Gray)),
            Span::styled(format_crores(lot.base_price), Style::default().fg(Color::White)),
            Span::styled(" | Current bid: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format_crores(lot.current_bid),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | Leading: ", Style::default().fg(Color::Gray)),
            Span::styled(leader, leader_style),
        ]),
        Line::from(Span::styled(
            format!(
                " Bat avg {:.1} | Bowl avg {:.1} | {} matches",
                lot.stats.batting_avg, lot.stats.bowling_avg, lot.stats.matches_played
            ),
            Style::default().fg(Color::Gray),
        )),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
