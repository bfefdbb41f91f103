// Status bar widget: stage, lot counter, and the latest notice.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::protocol::{NoticeLevel, Stage};
use crate::tui::{ExportStatus, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let mut spans = vec![
        Span::styled(
            " CRICKET AUCTION ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", state.stage.label()),
            Style::default().fg(Color::White),
        ),
    ];

    if state.stage == Stage::Auction {
        if let Some(ref snap) = state.snapshot {
            spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
            spans.push(Span::styled(
                format!("Lot {}", snap.lots_drawn),
                Style::default().fg(Color::White),
            ));
        }
    }

    if let Some(span) = export_span(&state.export_status) {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(span);
    }

    if let Some(ref notice) = state.notice {
        spans.push(Span::styled(" | ", Style::default().fg(Color::Gray)));
        spans.push(Span::styled(
            notice.message.clone(),
            Style::default().fg(notice_color(notice.level)),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(paragraph, area);
}

pub fn notice_color(level: NoticeLevel) -> Color {
    match level {
        NoticeLevel::Info => Color::Green,
        NoticeLevel::Warning => Color::Yellow,
        NoticeLevel::Error => Color::Red,
    }
}

/// Short export indicator, or `None` when no export has been requested.
pub fn export_span(status: &ExportStatus) -> Option<Span<'static>> {
    match status {
        ExportStatus::Idle => None,
        ExportStatus::Running => Some(Span::styled(
            "Exporting...",
            Style::default().fg(Color::Cyan),
        )),
        ExportStatus::Done(paths) => Some(Span::styled(
            format!("Exported {} files", paths.len()),
            Style::default().fg(Color::Green),
        )),
        ExportStatus::Failed(_) => Some(Span::styled(
            "Export failed",
            Style::default().fg(Color::Red),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
