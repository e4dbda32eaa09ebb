//! Error taxonomy.

use thiserror::Error;

/// Schema construction misuse.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid field name {name:?}: must be non-empty and flag-safe")]
    InvalidFieldName { name: String },

    #[error("invalid prefix {prefix:?}: must be non-empty and flag-safe")]
    InvalidPrefix { prefix: String },
}

#[derive(Debug, Error)]
pub enum ResolveError {
    /// A required field came up empty after every source was consulted.
    /// The parser usage text is printed to stderr before this is returned.
    #[error("missing required argument: --{flag}")]
    MissingRequired { flag: String },

    /// Surfaced verbatim from the argument parser (help display and the
    /// like); unknown flags never reach this path.
    #[error(transparent)]
    Parse(#[from] clap::Error),
}
