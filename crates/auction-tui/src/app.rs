// Application state and orchestration logic.
//
// The app loop is the only owner of the auction run. It receives user
// commands from the TUI, applies them to the run one at a time, and pushes
// snapshots and notices back for rendering. Exports run on a blocking task
// so the loop never waits on disk I/O. The config file is re-read before each
// run, so edits made on the setup screen take effect without a restart.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use auction_core::config::{self, Config, ConfigError};
use auction_core::engine::{AuctionRun, LotResult, Outcome};
use auction_core::error::AuctionError;
use auction_core::export::{self, ExportBundle};
use auction_core::results::summarize;

use crate::protocol::{Notice, ResultsView, Stage, UiUpdate, UserCommand};

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Directory holding `config/auction.toml`. `None` keeps `config` fixed.
    pub config_base: Option<PathBuf>,
    pub stage: Stage,
    /// `None` while on the setup screen.
    pub run: Option<AuctionRun>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        AppState {
            config,
            config_base: None,
            stage: Stage::Setup,
            run: None,
        }
    }

    pub fn with_config_base(mut self, base: impl Into<PathBuf>) -> Self {
        self.config_base = Some(base.into());
        self
    }

    /// Re-read the config file. On error the previous config is kept.
    pub fn reload_config(&mut self) -> Result<(), ConfigError> {
        let Some(base) = self.config_base.as_deref() else {
            return Ok(());
        };
        self.config = config::load_config_from(base)?;
        info!(
            "Config reloaded: {} teams, max squad {}, pool of {}",
            self.config.setup.teams.len(),
            self.config.setup.max_squad_size,
            self.config.setup.pool_size
        );
        Ok(())
    }

    /// Create a fresh run from the configured setup and open its first lot.
    pub fn start_auction(&mut self) -> Result<Outcome, AuctionError> {
        let mut run = AuctionRun::start(&self.config.setup, self.config.seed)?;
        let outcome = run.draw()?;
        self.run = Some(run);
        self.stage = if self.is_complete() { Stage::Results } else { Stage::Auction };
        Ok(outcome)
    }

    /// Drop the current run and return to setup.
    pub fn reset(&mut self) {
        if self.run.take().is_some() {
            info!("Auction run discarded");
        }
        self.stage = Stage::Setup;
    }

    pub fn is_complete(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.is_complete())
    }

    /// Close the open lot, as sold or passed, then draw the next one unless
    /// the run just finished. Returns the close outcome.
    fn close_lot(&mut self, sold: bool) -> Result<Outcome, AuctionError> {
        let run = self.run.as_mut().ok_or(AuctionError::NoActiveLot)?;
        let outcome = if sold { run.sold()? } else { run.pass()? };

        if let Outcome::LotClosed { auction_complete: false, .. } = outcome {
            // The guard was just evaluated, so this opens a lot.
            run.draw()?;
        }
        if run.is_complete() {
            self.stage = Stage::Results;
        }
        Ok(outcome)
    }

    fn results_view(&self) -> Option<ResultsView> {
        let run = self.run.as_ref()?;
        Some(ResultsView {
            summary: summarize(run),
            sheets: run.teams().iter().map(export::team_sheet).collect(),
        })
    }

    /// Human-readable line for a closed lot.
    fn describe_close(&self, outcome: &Outcome) -> Option<String> {
        let run = self.run.as_ref()?;
        match outcome {
            Outcome::LotClosed { result: LotResult::Sold { player, team, price }, .. } => {
                let player = run.player(*player)?;
                let team = run.team(*team)?;
                Some(format!("{} sold to {} for {} Cr", player.name, team.name, price))
            }
            Outcome::LotClosed { result: LotResult::Passed { player }, .. } => {
                let player = run.player(*player)?;
                Some(format!("{} goes unsold", player.name))
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Main event loop
// ---------------------------------------------------------------------------

/// Run the main application event loop.
///
/// Listens for user commands until `Quit` arrives or the TUI drops its
/// sender. Pushes UI updates through `ui_tx` for the render loop.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!("Application event loop started");
    send_setup(&state, &ui_tx).await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("Application event loop exiting");
    Ok(())
}

/// Handle a user command from the TUI.
pub async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    debug!("User command: {:?} (stage {:?})", cmd, state.stage);
    match cmd {
        UserCommand::StartAuction => {
            if state.stage != Stage::Setup {
                return;
            }
            if let Err(e) = state.reload_config() {
                warn!("Could not reload config: {}", e);
                let _ = ui_tx.send(UiUpdate::Notice(Notice::error(e.to_string()))).await;
                return;
            }
            send_setup_preview(state, ui_tx).await;
            match state.start_auction() {
                Ok(_) => {
                    info!("Auction started");
                    let _ = ui_tx.send(UiUpdate::Stage(state.stage)).await;
                    send_snapshot(state, ui_tx).await;
                    if state.stage == Stage::Results {
                        send_results(state, ui_tx).await;
                    }
                }
                Err(e) => {
                    warn!("Could not start auction: {}", e);
                    let _ = ui_tx.send(UiUpdate::Notice(Notice::error(e.to_string()))).await;
                }
            }
        }
        UserCommand::ReloadConfig => {
            if state.stage != Stage::Setup {
                return;
            }
            match state.reload_config() {
                Ok(()) => {
                    send_setup_preview(state, ui_tx).await;
                    let _ = ui_tx
                        .send(UiUpdate::Notice(Notice::info("Configuration reloaded")))
                        .await;
                }
                Err(e) => {
                    warn!("Could not reload config: {}", e);
                    let _ = ui_tx.send(UiUpdate::Notice(Notice::error(e.to_string()))).await;
                }
            }
        }
        UserCommand::Bid(idx) => {
            if state.stage != Stage::Auction {
                return;
            }
            let Some(run) = state.run.as_mut() else {
                return;
            };
            let Some(team_id) = run.teams().get(idx).map(|t| t.id) else {
                let msg = format!("No team {}", idx + 1);
                let _ = ui_tx.send(UiUpdate::Notice(Notice::warning(msg))).await;
                return;
            };
            match run.bid(team_id) {
                Ok(_) => send_snapshot(state, ui_tx).await,
                Err(e) => {
                    let _ = ui_tx.send(UiUpdate::Notice(Notice::warning(e.to_string()))).await;
                }
            }
        }
        UserCommand::Sold | UserCommand::Pass => {
            if state.stage != Stage::Auction {
                return;
            }
            match state.close_lot(cmd == UserCommand::Sold) {
                Ok(outcome) => {
                    if let Some(line) = state.describe_close(&outcome) {
                        let _ = ui_tx.send(UiUpdate::Notice(Notice::info(line))).await;
                    }
                    send_snapshot(state, ui_tx).await;
                    if state.stage == Stage::Results {
                        let _ = ui_tx.send(UiUpdate::Stage(Stage::Results)).await;
                        send_results(state, ui_tx).await;
                    }
                }
                Err(e) => {
                    let _ = ui_tx.send(UiUpdate::Notice(Notice::warning(e.to_string()))).await;
                }
            }
        }
        UserCommand::Export => {
            let Some(run) = state.run.as_ref() else {
                let _ = ui_tx
                    .send(UiUpdate::Notice(Notice::warning("Nothing to export yet")))
                    .await;
                return;
            };
            spawn_export(export::bundle(run), state.config.export_dir.clone(), ui_tx.clone());
        }
        UserCommand::NewAuction => {
            if state.stage == Stage::Setup {
                return;
            }
            state.reset();
            let reloaded = state.reload_config();
            send_setup(state, ui_tx).await;
            if let Err(e) = reloaded {
                warn!("Could not reload config: {}", e);
                let msg = format!("{e}; keeping the previous setup");
                let _ = ui_tx.send(UiUpdate::Notice(Notice::warning(msg))).await;
            }
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

async fn send_setup(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx.send(UiUpdate::Stage(Stage::Setup)).await;
    send_setup_preview(state, ui_tx).await;
}

async fn send_setup_preview(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Setup(Box::new(state.config.setup.clone())))
        .await;
}

async fn send_snapshot(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    if let Some(run) = state.run.as_ref() {
        let _ = ui_tx.send(UiUpdate::Snapshot(Box::new(run.snapshot()))).await;
    }
}

async fn send_results(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    if let Some(view) = state.results_view() {
        info!(
            "Auction finished: {} sold, {} Cr spent",
            view.summary.players_sold, view.summary.total_spent
        );
        let _ = ui_tx.send(UiUpdate::Results(Box::new(view))).await;
    }
}

/// Write the export bundle on the blocking pool and report back through
/// `ui_tx` when done.
fn spawn_export(
    bundle: ExportBundle,
    dir: std::path::PathBuf,
    ui_tx: mpsc::Sender<UiUpdate>,
) {
    tokio::spawn(async move {
        let joined =
            tokio::task::spawn_blocking(move || export::write_bundle(&bundle, &dir)).await;
        let result = match joined {
            Ok(Ok(paths)) => Ok(paths),
            Ok(Err(e)) => {
                warn!("Export failed: {}", e);
                Err(e.to_string())
            }
            Err(e) => {
                warn!("Export task failed: {}", e);
                Err(format!("export task failed: {e}"))
            }
        };
        let _ = ui_tx.send(UiUpdate::ExportFinished(result)).await;
    });
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
