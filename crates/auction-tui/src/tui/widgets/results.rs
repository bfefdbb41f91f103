// Results panel: auction totals, per-team table, and one team's squad.
//
// Left/right arrows choose which team's squad is listed.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use auction_core::export::TeamSheet;
use auction_core::results::{AuctionSummary, RoleCount};

use super::format_crores;
use crate::protocol::ResultsView;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(ref view) = state.results else {
        let paragraph = Paragraph::new("Waiting for results...")
            .block(Block::default().borders(Borders::ALL).title("Results"));
        frame.render_widget(paragraph, area);
        return;
    };

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(view.summary.teams.len() as u16 + 3),
            Constraint::Min(3),
        ])
        .split(area);

    let totals = Paragraph::new(summary_lines(&view.summary))
        .block(Block::default().borders(Borders::ALL).title("Auction Summary"));
    frame.render_widget(totals, sections[0]);

    render_team_table(frame, sections[1], view, state.selected_team);
    render_squad(frame, sections[2], view.sheets.get(state.selected_team));
}

pub fn summary_lines(summary: &AuctionSummary) -> Vec<Line<'static>> {
    let highest = match summary.highest_paid {
        Some(ref h) => format!(
            "{} ({}) for {}",
            h.player_name,
            h.team_name,
            format_crores(h.price)
        ),
        None => "-".to_string(),
    };
    vec![
        Line::from(format!(
            " Total spent: {} | Players sold: {} | Unsold: {}",
            format_crores(summary.total_spent),
            summary.players_sold,
            summary.players_unsold
        )),
        Line::from(format!(
            " Average price: {}",
            format_crores(summary.avg_price)
        )),
        Line::from(vec![
            Span::raw(" Highest paid: "),
            Span::styled(highest, Style::default().fg(Color::Yellow)),
        ]),
    ]
}

fn render_team_table(frame: &mut Frame, area: Rect, view: &ResultsView, selected: usize) {
    let header = Row::new(vec![
        Cell::from("Team"),
        Cell::from("Players"),
        Cell::from("Spent"),
        Cell::from("Remaining"),
        Cell::from("Composition"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = view
        .summary
        .teams
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let style = if i == selected {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(t.name.clone()),
                Cell::from(t.acquired.to_string()),
                Cell::from(format_crores(t.spent)),
                Cell::from(format_crores(t.remaining)),
                Cell::from(composition_text(&t.composition)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Teams"));
    frame.render_widget(table, area);
}

fn render_squad(frame: &mut Frame, area: Rect, sheet: Option<&TeamSheet>) {
    let Some(sheet) = sheet else {
        frame.render_widget(Block::default().borders(Borders::ALL).title("Squad"), area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Player"),
        Cell::from("Role"),
        Cell::from("Country"),
        Cell::from("Price"),
    ])
    .style(
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if sheet.rows.is_empty() {
        vec![Row::new(vec![Cell::from("No players acquired")])]
    } else {
        sheet
            .rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.name.clone()),
                    Cell::from(r.role.label()),
                    Cell::from(r.country.clone()),
                    Cell::from(format_crores(r.price)),
                ])
            })
            .collect()
    };

    let widths = [
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(14),
        Constraint::Length(10),
    ];
    let title = format!(
        "Squad: {} ({} spent)",
        sheet.team_name,
        format_crores(sheet.spent)
    );
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(table, area);
}

/// "Batsman 2, Bowler 1", or "-" for an empty squad.
pub fn composition_text(composition: &[RoleCount]) -> String {
    if composition.is_empty() {
        return "-".to_string();
    }
    composition
        .iter()
        .map(|rc| format!("{} {}", rc.role.label(), rc.count))
        .collect::<Vec<_>>()
        .join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
