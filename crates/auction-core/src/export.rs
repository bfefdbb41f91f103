// Tabular export of auction results.
//
// The core builds owned, in-memory tables from the run; writing them out is
// a separate step that callers may push onto a blocking task.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::engine::AuctionRun;
use crate::money::Crores;
use crate::player::{Player, Role};
use crate::results::{summarize, AuctionSummary};
use crate::team::Team;

/// File name of the combined all-teams table.
pub const COMBINED_FILE_NAME: &str = "cricket_auction_results.csv";

/// File name of the JSON summary.
pub const SUMMARY_FILE_NAME: &str = "auction_summary.json";

pub const TEAM_SHEET_HEADERS: [&str; 7] = [
    "Name",
    "Role",
    "Country",
    "Price (crores)",
    "Batting Avg",
    "Bowling Avg",
    "Matches",
];

pub const TRANSACTION_HEADERS: [&str; 8] = [
    "Team",
    "Player",
    "Role",
    "Country",
    "Price (crores)",
    "Batting Avg",
    "Bowling Avg",
    "Matches",
];

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io { path: String, source: io::Error },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("failed to encode summary: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// One squad member in a team sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SquadRow {
    pub name: String,
    pub role: Role,
    pub country: String,
    pub price: Crores,
    pub batting_avg: f64,
    pub bowling_avg: f64,
    pub matches: u32,
}

/// A team's squad plus the amount spent, for the trailing summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSheet {
    pub team_name: String,
    pub rows: Vec<SquadRow>,
    pub spent: Crores,
}

/// One line of the combined all-teams table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRow {
    pub team: String,
    pub player: String,
    pub role: Role,
    pub country: String,
    pub price: Crores,
    pub batting_avg: f64,
    pub bowling_avg: f64,
    pub matches: u32,
}

/// Owned copy of everything an export writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportBundle {
    pub sheets: Vec<TeamSheet>,
    pub transactions: Vec<TransactionRow>,
    pub summary: AuctionSummary,
}

fn squad_row(p: &Player) -> SquadRow {
    SquadRow {
        name: p.name.clone(),
        role: p.role,
        country: p.country.clone(),
        price: p.sold_price(),
        batting_avg: p.stats.batting_avg,
        bowling_avg: p.stats.bowling_avg,
        matches: p.stats.matches_played,
    }
}

pub fn team_sheet(team: &Team) -> TeamSheet {
    TeamSheet {
        team_name: team.name.clone(),
        rows: team.squad.iter().map(squad_row).collect(),
        spent: team.spent(),
    }
}

/// All sales, grouped by team in team order, then in purchase order.
pub fn transactions_table(teams: &[Team]) -> Vec<TransactionRow> {
    teams
        .iter()
        .flat_map(|team| {
            team.squad.iter().map(move |p| TransactionRow {
                team: team.name.clone(),
                player: p.name.clone(),
                role: p.role,
                country: p.country.clone(),
                price: p.sold_price(),
                batting_avg: p.stats.batting_avg,
                bowling_avg: p.stats.bowling_avg,
                matches: p.stats.matches_played,
            })
        })
        .collect()
}

pub fn bundle<R: Rng>(run: &AuctionRun<R>) -> ExportBundle {
    ExportBundle {
        sheets: run.teams().iter().map(team_sheet).collect(),
        transactions: transactions_table(run.teams()),
        summary: summarize(run),
    }
}

/// File stem for a team's sheet: `/`, `\` and spaces become `_`.
pub fn export_file_stem(team_name: &str) -> String {
    team_name.replace([' ', '/', '\\'], "_")
}

// ---------------------------------------------------------------------------
// CSV writers
// ---------------------------------------------------------------------------

/// Write a team sheet: header, one row per player, then a
/// `TEAM SUMMARY: <name>` row carrying the amount spent.
pub fn write_team_sheet<W: io::Write>(sheet: &TeamSheet, writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(TEAM_SHEET_HEADERS)?;
    for row in &sheet.rows {
        wtr.serialize(row)?;
    }
    wtr.write_record([
        format!("TEAM SUMMARY: {}", sheet.team_name),
        String::new(),
        String::new(),
        sheet.spent.to_f64().to_string(),
        String::new(),
        String::new(),
        String::new(),
    ])?;
    wtr.flush()?;
    Ok(())
}

pub fn write_transactions<W: io::Write>(
    rows: &[TransactionRow],
    writer: W,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(TRANSACTION_HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write every table into `dir`, creating it if needed.
///
/// Teams without players get no sheet. Returns the paths written.
pub fn write_bundle(bundle: &ExportBundle, dir: &Path) -> Result<Vec<PathBuf>, ExportError> {
    fs::create_dir_all(dir).map_err(|e| ExportError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;

    let mut written = Vec::new();

    for sheet in &bundle.sheets {
        if sheet.rows.is_empty() {
            continue;
        }
        let path = dir.join(format!("{}.csv", export_file_stem(&sheet.team_name)));
        let file = create(&path)?;
        write_team_sheet(sheet, file).map_err(|e| ExportError::Csv {
            path: path.display().to_string(),
            source: e,
        })?;
        written.push(path);
    }

    let combined = dir.join(COMBINED_FILE_NAME);
    let file = create(&combined)?;
    write_transactions(&bundle.transactions, file).map_err(|e| ExportError::Csv {
        path: combined.display().to_string(),
        source: e,
    })?;
    written.push(combined);

    let summary_path = dir.join(SUMMARY_FILE_NAME);
    let file = create(&summary_path)?;
    serde_json::to_writer_pretty(file, &bundle.summary)?;
    written.push(summary_path);

    if bundle.transactions.is_empty() {
        warn!("Exported an auction with no sales to {}", dir.display());
    }
    info!("Exported {} files to {}", written.len(), dir.display());
    Ok(written)
}

fn create(path: &Path) -> Result<File, ExportError> {
    File::create(path).map_err(|e| ExportError::Io {
        path: path.display().to_string(),
        source: e,
    })
}
