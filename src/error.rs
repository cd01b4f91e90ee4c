//! Error types.
//!
//! The control surface is deliberately forgiving: only lookups by name can
//! fail. Everything else is a state-machine no-op.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("Unknown algorithm '{id}' (expected one of: bubble, selection, insertion, merge, quick, heap)")]
    UnknownAlgorithm { id: String },

    #[error("Unknown distribution '{tag}' (expected one of: random, ascending, descending, split-ascending, split-descending)")]
    UnknownDistribution { tag: String },
}

pub type Result<T> = std::result::Result<T, SortError>;
