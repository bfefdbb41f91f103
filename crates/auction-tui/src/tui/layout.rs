// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Lot Banner (5 rows)                               |
// +-------------------------+------------------------+
// | Teams (60%)             | Progress / Log (40%)   |
// +-------------------------+------------------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+
//
// Setup and results screens use `body`, which spans the banner and the
// middle section.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub status_bar: Rect,
    /// Player on the block, current bid and leader.
    pub lot_banner: Rect,
    /// Left side of the middle section: the teams table.
    pub main_panel: Rect,
    /// Right side of the middle section: progress or transaction log.
    pub sidebar: Rect,
    /// Everything between the status bar and the help bar.
    pub body: Rect,
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Min(8),    // body
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let status_bar = vertical[0];
    let body = vertical[1];
    let help_bar = vertical[2];

    let body_sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body);

    let lot_banner = body_sections[0];
    let middle = body_sections[1];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(middle);

    AppLayout {
        status_bar,
        lot_banner,
        main_panel: horizontal[0],
        sidebar: horizontal[1],
        body,
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
