// Progress / transaction log panel.
//
// By default shows auction progress (sold, unsold, remaining). With the log
// toggled on, lists every sale, newest first.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};
use ratatui::Frame;

use auction_core::engine::Sale;
use auction_core::snapshot::Progress;

use super::format_crores;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(ref snap) = state.snapshot else {
        let paragraph = Paragraph::new("No auction in progress")
            .block(Block::default().borders(Borders::ALL).title("Progress"));
        frame.render_widget(paragraph, area);
        return;
    };

    if state.show_log {
        render_log(frame, area, &snap.sales);
    } else {
        render_progress(frame, area, snap.progress);
    }
}

fn render_progress(frame: &mut Frame, area: Rect, progress: Progress) {
    let block = Block::default().borders(Borders::ALL).title("Progress");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(drawn_ratio(progress))
        .label(format!(
            "{}/{} drawn",
            progress.total.saturating_sub(progress.remaining),
            progress.total
        ));
    frame.render_widget(gauge, sections[0]);

    let lines = vec![
        Line::from(vec![
            Span::styled(" Sold:      ", Style::default().fg(Color::Gray)),
            Span::styled(progress.sold.to_string(), Style::default().fg(Color::Green)),
        ]),
        Line::from(vec![
            Span::styled(" Unsold:    ", Style::default().fg(Color::Gray)),
            Span::styled(progress.passed.to_string(), Style::default().fg(Color::Red)),
        ]),
        Line::from(vec![
            Span::styled(" Remaining: ", Style::default().fg(Color::Gray)),
            Span::styled(progress.remaining.to_string(), Style::default().fg(Color::White)),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines), sections[1]);
}

fn render_log(frame: &mut Frame, area: Rect, sales: &[Sale]) {
    let items: Vec<ListItem> = if sales.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No sales yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        sales.iter().rev().map(|s| ListItem::new(sale_line(s))).collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!("Transactions ({})", sales.len())),
    );
    frame.render_widget(list, area);
}

/// Fraction of the pool drawn so far, in [0, 1].
pub fn drawn_ratio(progress: Progress) -> f64 {
    if progress.total == 0 {
        return 0.0;
    }
    let drawn = progress.total.saturating_sub(progress.remaining);
    (drawn as f64 / progress.total as f64).clamp(0.0, 1.0)
}

pub fn sale_line(sale: &Sale) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{} ", sale.at.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("#{} ", sale.lot_number),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            sale.player_name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" -> ", Style::default().fg(Color::Gray)),
        Span::styled(sale.team_name.clone(), Style::default().fg(Color::Cyan)),
        Span::styled(
            format!(" {}", format_crores(sale.price)),
            Style::default().fg(Color::Yellow),
        ),
    ])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
