use std::path::PathBuf;

use bigdecimal::BigDecimal;
use thiserror::Error;

use crate::model::CategoryId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("there is a limit of {capacity} categories, remove one to add another")]
    CapacityExceeded { capacity: usize },
    #[error("category {0} not found")]
    NotFound(CategoryId),
    #[error("invalid record on line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },
    #[error("unable to access {path:?}")]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("expected {expected} shares, got {supplied}")]
    SharesNotFullySpecified { expected: usize, supplied: usize },
    #[error("shares add up to {percent}%, not 100%")]
    SharesDoNotSumToOne { percent: BigDecimal },
    #[error("cannot modify Total directly, select another category")]
    CannotModifyTotalDirectly,
    #[error("invalid category name {0:?}, names may not be empty or contain spaces")]
    InvalidName(String),
    #[error("duplicate category id {0}")]
    DuplicateId(CategoryId),
    #[error("every category id has been used, no more categories can be added")]
    IdsExhausted,
    #[error("no file chosen, give a path to save to")]
    NoPath,
}

impl Error {
    pub(crate) fn invalid_record(line: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}
