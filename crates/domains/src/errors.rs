//! # DomainError
//!
//! Failures raised by the application services. Wire formatting happens
//! elsewhere; these carry enough context for logs and nothing more.

use std::fmt;

use thiserror::Error;

/// Which kind of entity a lookup was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Board,
    Comment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board => f.write_str("board"),
            Self::Comment => f.write_str("comment"),
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    /// Lookup by id failed, or the target is soft-deleted.
    #[error("{kind} not found with ID {id}")]
    NotFound { kind: EntityKind, id: i64 },

    /// Anything the store reported. Passed through untouched.
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn board_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Board,
            id,
        }
    }

    pub fn comment_not_found(id: i64) -> Self {
        Self::NotFound {
            kind: EntityKind::Comment,
            id,
        }
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
