// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the app
// loop, or into local ViewState changes (sidebar toggles, team cycling).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{ExportStatus, ViewState};
use crate::protocol::{Stage, UserCommand};

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key press goes to the app loop and
/// `None` when it was handled locally or ignored.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm reports Press and Release on some platforms.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c')
    {
        return Some(UserCommand::Quit);
    }
    if key_event.code == KeyCode::Char('q') {
        return Some(UserCommand::Quit);
    }

    match view_state.stage {
        Stage::Setup => match key_event.code {
            KeyCode::Enter => Some(UserCommand::StartAuction),
            KeyCode::Char('c') => Some(UserCommand::ReloadConfig),
            _ => None,
        },
        Stage::Auction => handle_auction_key(key_event, view_state),
        Stage::Results => handle_results_key(key_event, view_state),
    }
}

fn handle_auction_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char(c) if c.is_ascii_digit() => {
            let idx = team_index(c)?;
            if idx < view_state.team_count() {
                Some(UserCommand::Bid(idx))
            } else {
                None
            }
        }
        KeyCode::Char('s') => Some(UserCommand::Sold),
        KeyCode::Char('u') => Some(UserCommand::Pass),
        KeyCode::Char('t') => {
            view_state.show_log = !view_state.show_log;
            view_state.show_squad = false;
            None
        }
        KeyCode::Char('v') => {
            view_state.show_squad = !view_state.show_squad;
            None
        }
        KeyCode::Left => {
            cycle_team(view_state, false);
            None
        }
        KeyCode::Right => {
            cycle_team(view_state, true);
            None
        }
        KeyCode::Char('e') => request_export(view_state),
        KeyCode::Char('r') => Some(UserCommand::NewAuction),
        _ => None,
    }
}

fn handle_results_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Left => {
            cycle_team(view_state, false);
            None
        }
        KeyCode::Right => {
            cycle_team(view_state, true);
            None
        }
        KeyCode::Char('e') => request_export(view_state),
        KeyCode::Char('r') => Some(UserCommand::NewAuction),
        _ => None,
    }
}

/// `1`..`9` pick teams one to nine, `0` picks team ten.
pub fn team_index(c: char) -> Option<usize> {
    match c.to_digit(10)? {
        0 => Some(9),
        d => Some(d as usize - 1),
    }
}

fn request_export(view_state: &mut ViewState) -> Option<UserCommand> {
    if view_state.export_status == ExportStatus::Running {
        return None;
    }
    view_state.export_status = ExportStatus::Running;
    Some(UserCommand::Export)
}

fn cycle_team(view_state: &mut ViewState, forward: bool) {
    let count = view_state.team_count();
    if count == 0 {
        return;
    }
    view_state.selected_team = if forward {
        (view_state.selected_team + 1) % count
    } else {
        (view_state.selected_team + count - 1) % count
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
