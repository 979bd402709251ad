//! Error kinds for the graph builder, planner, and operator engine.
//!
//! `spec.md` §7 names three kinds with different recoverability:
//! `ConfigError` (bad wiring, known before any user code runs),
//! `OrderError` (a sortedness invariant broken at runtime), and
//! `UserError` (an error returned by a mapper/reducer/folder,
//! propagated verbatim). All three are fatal -- there is no retry path
//! and no partial-result recovery, so a single enum with three
//! variants is enough; we don't need `anyhow`'s dynamic-context style
//! since every failure already has a precise, known shape.

use std::error::Error as StdError;
use std::fmt;

/// The crate's error type.
#[derive(Debug)]
pub enum CascadeError {
    /// Invalid graph wiring: an unknown source name, an empty
    /// reduce/sort key, or a source that was never supplied.
    Config(String),
    /// A reduce or join input was not non-strictly ascending on its
    /// key.
    Order(String),
    /// A mapper, reducer, or folder returned an error.
    User(Box<dyn StdError + Send + Sync>),
}

impl CascadeError {
    pub fn config(msg: impl Into<String>) -> Self {
        CascadeError::Config(msg.into())
    }

    pub fn order(msg: impl Into<String>) -> Self {
        CascadeError::Order(msg.into())
    }

    pub fn user(err: impl StdError + Send + Sync + 'static) -> Self {
        CascadeError::User(Box::new(err))
    }
}

impl fmt::Display for CascadeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CascadeError::Config(msg) => write!(f, "configuration error: {msg}"),
            CascadeError::Order(msg) => write!(f, "ordering error: {msg}"),
            CascadeError::User(err) => write!(f, "user function error: {err}"),
        }
    }
}

impl StdError for CascadeError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CascadeError::User(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

/// The crate's result alias.
pub type Result<T> = std::result::Result<T, CascadeError>;
