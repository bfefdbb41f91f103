// Squad panel: the selected team's purchases while bidding is under way.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use auction_core::snapshot::{SquadEntry, TeamView};

use super::format_crores;
use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let Some(team) = selected_team(state) else {
        let paragraph = Paragraph::new("No team selected")
            .block(Block::default().borders(Borders::ALL).title("Squad"));
        frame.render_widget(paragraph, area);
        return;
    };

    let items: Vec<ListItem> = if team.squad.is_empty() {
        vec![ListItem::new(Span::styled(
            "  No players yet",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        team.squad.iter().map(|p| ListItem::new(squad_line(p))).collect()
    };

    let spent = team.original_purse - team.purse;
    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(format!(
        "{} Squad ({}, {} spent)",
        team.name,
        team.squad.len(),
        format_crores(spent)
    )));
    frame.render_widget(list, area);
}

/// Team the squad panel shows, if the snapshot has one at that index.
pub fn selected_team(state: &ViewState) -> Option<&TeamView> {
    state.snapshot.as_ref()?.teams.get(state.selected_team)
}

pub fn squad_line(entry: &SquadEntry) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!(" {:<14}", entry.role.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            entry.name.clone(),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {}", format_crores(entry.price)),
            Style::default().fg(Color::Yellow),
        ),
    ])
}
