//! Error types for the stable matching engine.
//!
//! Every error here is a local input error: a preference table that is not a
//! pair of permutation tables, an initial queue order that is not a
//! permutation of proposers, or a name that the roster does not know.
//! Nothing is retried and no partial matching is ever returned.

use thiserror::Error;

use crate::types::Side;

/// Errors surfaced by table construction, the matching loop and the roster.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The two sides hold a different number of agents.
    #[error("size mismatch: {proposers} proposers but {receivers} receivers")]
    SizeMismatch { proposers: usize, receivers: usize },

    /// A preference list does not rank every agent of the opposite side.
    #[error("{side} {agent} ranks {actual} agents, expected {expected}")]
    RowLength {
        side: Side,
        agent: usize,
        expected: usize,
        actual: usize,
    },

    /// A preference list names an identity outside `0..n`.
    #[error("{side} {agent} ranks unknown agent {entry} (n = {n})")]
    OutOfRange {
        side: Side,
        agent: usize,
        entry: usize,
        n: usize,
    },

    /// A preference list ranks the same agent twice.
    #[error("{side} {agent} ranks agent {entry} more than once")]
    Duplicate { side: Side, agent: usize, entry: usize },

    /// A free proposer has already proposed to every receiver.
    ///
    /// Unreachable through [`crate::PreferenceTable`], which only admits
    /// complete permutation tables. The matching loop still reports it
    /// instead of panicking.
    #[error("proposer {proposer} was rejected by all {n} receivers")]
    ProposerExhausted { proposer: usize, n: usize },

    /// The proposer queue drained while some receiver was still unmatched.
    ///
    /// Unreachable through [`crate::PreferenceTable`]: with a validated
    /// table the queue only empties once every proposer holds a receiver.
    #[error("matching finished with {matched} of {n} receivers matched")]
    IncompleteMatching { matched: usize, n: usize },

    /// The initial free-queue order is not a permutation of the proposers.
    #[error("initial proposer order is not a permutation of 0..{n}: {reason}")]
    InvalidOrder { n: usize, reason: String },

    /// The roster has no agent with this name.
    #[error("unknown {side} name {name:?}")]
    UnknownName { side: Side, name: String },

    /// The roster already holds an agent with this name.
    #[error("duplicate {side} name {name:?}")]
    DuplicateName { side: Side, name: String },
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MatchError>;
