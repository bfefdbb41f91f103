// Terminal UI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that mirrors what the app loop has told it. The
// app loop pushes `UiUpdate` messages over an mpsc channel; the TUI applies
// them to `ViewState` and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::path::PathBuf;
use std::time::Duration;

use auction_core::setup::AuctionSetup;
use auction_core::snapshot::AuctionSnapshot;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::Frame;
use tokio::sync::mpsc;
use tracing::info;

use crate::protocol::{Notice, ResultsView, Stage, UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ExportStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExportStatus {
    #[default]
    Idle,
    Running,
    Done(Vec<PathBuf>),
    Failed(String),
}

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state that mirrors the application state for rendering.
#[derive(Debug, Default)]
pub struct ViewState {
    pub stage: Stage,
    /// Configured setup, shown on the setup screen.
    pub setup: Option<AuctionSetup>,
    /// Latest auction floor snapshot.
    pub snapshot: Option<AuctionSnapshot>,
    pub results: Option<ResultsView>,
    /// Last message from the app loop.
    pub notice: Option<Notice>,
    /// Show the transaction log instead of the progress panel.
    pub show_log: bool,
    /// Show the selected team's squad in the sidebar while bidding.
    pub show_squad: bool,
    /// Team whose squad the squad panel and results screen list.
    pub selected_team: usize,
    pub export_status: ExportStatus,
}

impl ViewState {
    /// Number of teams the current screen knows about.
    pub fn team_count(&self) -> usize {
        match self.stage {
            Stage::Setup => self.setup.as_ref().map_or(0, |s| s.teams.len()),
            Stage::Auction => self.snapshot.as_ref().map_or(0, |s| s.teams.len()),
            Stage::Results => self.results.as_ref().map_or(0, |r| r.summary.teams.len()),
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Stage(stage) => {
            if stage == Stage::Setup {
                state.snapshot = None;
                state.results = None;
                state.notice = None;
                state.export_status = ExportStatus::Idle;
                state.show_log = false;
                state.show_squad = false;
            }
            state.selected_team = 0;
            state.stage = stage;
        }
        UiUpdate::Setup(setup) => {
            state.setup = Some(*setup);
        }
        UiUpdate::Snapshot(snapshot) => {
            state.snapshot = Some(*snapshot);
        }
        UiUpdate::Results(view) => {
            state.results = Some(*view);
        }
        UiUpdate::Notice(notice) => {
            state.notice = Some(notice);
        }
        UiUpdate::ExportFinished(result) => {
            state.export_status = match result {
                Ok(paths) => ExportStatus::Done(paths),
                Err(e) => ExportStatus::Failed(e),
            };
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame for the current stage.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::help_bar::render(frame, layout.help_bar, state);

    match state.stage {
        Stage::Setup => {
            widgets::setup::render(frame, layout.body, state);
        }
        Stage::Auction => {
            widgets::lot_banner::render(frame, layout.lot_banner, state);
            widgets::teams::render(frame, layout.main_panel, state);
            if state.show_squad {
                widgets::squad::render(frame, layout.sidebar, state);
            } else {
                widgets::transactions::render(frame, layout.sidebar, state);
            }
        }
        Stage::Results => {
            widgets::results::render(frame, layout.body, state);
        }
    }
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop.
///
/// Initializes the terminal, installs a panic hook that restores it, then
/// selects over UI updates, keyboard input and render ticks until the user
/// quits or the app loop goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    let mut terminal = ratatui::init();

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Best-effort terminal restoration
        let _ = ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    None => {
                        // Channel closed: app is shutting down
                        break;
                    }
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                info!("Quit requested from keyboard");
                                break;
                            }
                        }
                    }
                    Some(Ok(_)) => {
                        // Mouse and resize events: the next tick redraws.
                    }
                    Some(Err(_)) | None => break,
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, &view_state))?;
            }
        }
    }

    ratatui::restore();
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
