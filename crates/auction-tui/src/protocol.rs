// Messages exchanged between the app loop and the terminal UI.
//
// The TUI never touches the auction run. It sends `UserCommand`s and renders
// whatever `UiUpdate`s come back.

use std::path::PathBuf;

use auction_core::export::TeamSheet;
use auction_core::results::AuctionSummary;
use auction_core::setup::AuctionSetup;
use auction_core::snapshot::AuctionSnapshot;

/// Which screen the session is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stage {
    #[default]
    Setup,
    Auction,
    Results,
}

impl Stage {
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Setup => "Setup",
            Stage::Auction => "Auction",
            Stage::Results => "Results",
        }
    }
}

/// Commands from the TUI to the app loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    /// Re-read config/auction.toml, then start a run from it.
    StartAuction,
    /// Re-read config/auction.toml and refresh the setup screen.
    ReloadConfig,
    /// Bid on the open lot for the team at this index.
    Bid(usize),
    Sold,
    Pass,
    Export,
    /// Throw away the current run and go back to setup.
    NewAuction,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A one-line message for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Info, message: message.into() }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Warning, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Notice { level: NoticeLevel::Error, message: message.into() }
    }
}

/// What the results screen shows: the summary plus each team's squad.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub summary: AuctionSummary,
    pub sheets: Vec<TeamSheet>,
}

/// Updates from the app loop to the TUI.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Stage(Stage),
    /// The configured setup, shown before the auction starts.
    Setup(Box<AuctionSetup>),
    Snapshot(Box<AuctionSnapshot>),
    Results(Box<ResultsView>),
    Notice(Notice),
    /// Paths written, or the error message.
    ExportFinished(Result<Vec<PathBuf>, String>),
}
