//! Agent identities for the two sides of a matching.
//!
//! ## Dense Identities
//!
//! Agents are numbered `0..n` on each side. The two sides are independent
//! namespaces: `ProposerId(2)` and `ReceiverId(2)` are unrelated agents, and
//! the newtypes keep them from being mixed up in the engine's tables.
//!
//! Names and other labels belong to the presentation layer
//! (see [`crate::roster::Roster`]); the engine never compares names.

use std::fmt;

// ============================================================================
// Side enum
// ============================================================================

/// Which side of the matching an agent belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    /// Proposers initiate proposals (traditionally "men")
    #[default]
    Proposer,
    /// Receivers accept or reject proposals (traditionally "women")
    Receiver,
}

impl Side {
    /// Returns the opposite side
    pub fn opposite(self) -> Self {
        match self {
            Side::Proposer => Side::Receiver,
            Side::Receiver => Side::Proposer,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Proposer => f.write_str("proposer"),
            Side::Receiver => f.write_str("receiver"),
        }
    }
}

// ============================================================================
// Identity newtypes
// ============================================================================

/// Identity of a proposer, `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ProposerId(pub usize);

/// Identity of a receiver, `0..n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ReceiverId(pub usize);

impl ProposerId {
    /// Index into proposer-indexed tables
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl ReceiverId {
    /// Index into receiver-indexed tables
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for ProposerId {
    fn from(id: usize) -> Self {
        ProposerId(id)
    }
}

impl From<usize> for ReceiverId {
    fn from(id: usize) -> Self {
        ReceiverId(id)
    }
}

impl fmt::Display for ProposerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

impl fmt::Display for ReceiverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
