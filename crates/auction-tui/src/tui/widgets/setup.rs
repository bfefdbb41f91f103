// Setup screen: configured teams, purses and auction limits.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use auction_core::setup::AuctionSetup;

use super::format_crores;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(ref setup) = state.setup else {
        let paragraph = Paragraph::new("Loading configuration...")
            .block(Block::default().borders(Borders::ALL).title("Setup"));
        frame.render_widget(paragraph, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(area);

    let summary = Paragraph::new(summary_lines(setup))
        .block(Block::default().borders(Borders::ALL).title("Setup"));
    frame.render_widget(summary, sections[0]);

    let header = Row::new(vec![Cell::from("#"), Cell::from("Team"), Cell::from("Purse")]).style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );
    let rows: Vec<Row> = setup
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| {
            Row::new(vec![
                Cell::from((i + 1).to_string()),
                Cell::from(t.name.clone()),
                Cell::from(format_crores(t.purse)),
            ])
        })
        .collect();
    let widths = [Constraint::Length(4), Constraint::Min(16), Constraint::Length(12)];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(table, sections[1]);
}

pub fn summary_lines(setup: &AuctionSetup) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            format!(
                " {} teams | max squad {} | {} players in the pool",
                setup.teams.len(),
                setup.max_squad_size,
                setup.pool_size
            ),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            " Edit config/auction.toml and press c to reload it",
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            " Press Enter to start the auction",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
    ]
}
