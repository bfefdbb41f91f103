// TUI widget modules for each screen panel.

pub mod help_bar;
pub mod lot_banner;
pub mod results;
pub mod setup;
pub mod squad;
pub mod status_bar;
pub mod teams;
pub mod transactions;

use auction_core::money::Crores;

/// Format an amount as "X.YY Cr".
pub fn format_crores(amount: Crores) -> String {
    format!("{} Cr", amount)
}
