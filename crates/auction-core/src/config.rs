// Configuration loading and parsing (auction.toml).

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::error::AuctionError;
use crate::money::Crores;
use crate::player::DEFAULT_POOL_SIZE;
use crate::setup::{AuctionSetup, MAX_TEAMS, MIN_TEAMS};
use crate::team::TeamSpec;

/// Shipped default, written out when neither `config/` nor `defaults/`
/// provides an auction.toml.
pub const DEFAULT_CONFIG: &str = include_str!("../defaults/auction.toml");

pub const CONFIG_FILE_NAME: &str = "auction.toml";

const FALLBACK_PURSE: f64 = 90.0;
const DEFAULT_NUM_TEAMS: usize = 3;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error(transparent)]
    Setup(#[from] AuctionError),

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub setup: AuctionSetup,
    /// Seed for the draw order; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub export_dir: PathBuf,
}

// ---------------------------------------------------------------------------
// auction.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
struct AuctionFile {
    auction: AuctionSection,
    #[serde(default)]
    teams: Vec<TeamEntry>,
}

#[derive(Debug, Clone, Deserialize)]
struct AuctionSection {
    max_squad_size: usize,
    #[serde(default = "default_pool_size")]
    pool_size: usize,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default = "default_export_dir")]
    export_dir: String,
    #[serde(default)]
    default_purse: Option<f64>,
    /// Used only when no `[[teams]]` are listed: creates `Team 1..n`.
    #[serde(default)]
    num_teams: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
struct TeamEntry {
    name: String,
    #[serde(default)]
    purse: Option<f64>,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_export_dir() -> String {
    "team_data".to_string()
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Parse and validate an auction.toml document. `path` is only used in
/// error messages.
pub fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    let file: AuctionFile = toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let section = file.auction;
    let default_purse = section.default_purse.unwrap_or(FALLBACK_PURSE);

    let teams: Vec<TeamSpec> = if file.teams.is_empty() {
        let num_teams = section.num_teams.unwrap_or(DEFAULT_NUM_TEAMS);
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&num_teams) {
            return Err(AuctionError::invalid_setup(
                "num_teams",
                format!("need between {MIN_TEAMS} and {MAX_TEAMS} teams, got {num_teams}"),
            )
            .into());
        }
        (1..=num_teams)
            .map(|i| TeamSpec::new(format!("Team {i}"), Crores::from_f64(default_purse)))
            .collect()
    } else {
        file.teams
            .into_iter()
            .map(|t| TeamSpec::new(t.name, Crores::from_f64(t.purse.unwrap_or(default_purse))))
            .collect()
    };

    let setup = AuctionSetup::new(teams, section.max_squad_size).with_pool_size(section.pool_size);
    setup.validate()?;

    Ok(Config {
        setup,
        seed: section.seed,
        export_dir: PathBuf::from(section.export_dir),
    })
}

/// Load and validate `config/auction.toml` relative to `base_dir`.
///
/// Does not create missing files; see [`load_config`].
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(CONFIG_FILE_NAME);
    let text = std::fs::read_to_string(&path)
        .map_err(|_| ConfigError::FileNotFound { path: path.clone() })?;
    parse_config(&text, &path)
}

/// Make sure `config/auction.toml` exists under `base_dir`, copying it from
/// `defaults/` or, failing that, writing the built-in default. Returns the
/// files created; an existing config is never overwritten.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    let target = config_dir.join(CONFIG_FILE_NAME);
    if target.exists() {
        return Ok(vec![]);
    }

    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let source = base_dir.join("defaults").join(CONFIG_FILE_NAME);
    let content = if source.is_file() {
        std::fs::read_to_string(&source).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to read {}: {e}", source.display()),
        })?
    } else {
        DEFAULT_CONFIG.to_string()
    };

    std::fs::write(&target, content).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to write {}: {e}", target.display()),
    })?;

    Ok(vec![target])
}

/// Convenience wrapper: loads config relative to the current working
/// directory, creating it from defaults when missing.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
