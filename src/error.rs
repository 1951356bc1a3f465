//! Error types for the fallible edges of the kiosk.
//!
//! The ordering core (cart, router, screen machine) never fails. Errors only
//! come from the outside world: reading configuration, validating the catalog
//! supplied at startup, building the currency format and talking to the
//! terminal.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::ItemId;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, KioskError>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum KioskError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid currency format: {0}")]
    Format(#[from] num_format::Error),
}

/// Problems found while validating a catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("item id 0 is reserved")]
    ZeroId,

    #[error("duplicate item id {0}")]
    DuplicateId(ItemId),

    #[error("item {0} has an empty name")]
    EmptyName(ItemId),
}
