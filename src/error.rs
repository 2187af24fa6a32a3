//! Error types.
//!
//! Domain errors never abort a battle: their `Display` text is the line shown
//! in the dialog box and the turn is still consumed.

use std::path::PathBuf;

use thiserror::Error;

/// Why the selected inventory item could not be used.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ItemError {
    #[error("YOU HAVE NO ITEMS LEFT!")]
    NoItems,

    #[error("YOU HAVE NO {name} LEFT!")]
    OutOfStock { name: String },
}

/// Failures while loading a [`BattleConfig`](crate::config::BattleConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    #[error("could not parse config: {0}")]
    Syntax(#[source] ron::error::SpannedError),

    #[error("invalid config: {0}")]
    Invalid(String),
}
