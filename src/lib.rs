//! # Stable Match
//!
//! Gale–Shapley deferred-acceptance matching between two equally-sized sets
//! of agents with strict preferences.
//!
//! ## Architecture
//!
//! The engine consists of:
//! - **Types**: Agent identities, validated preference tables, proposal events, receipts
//! - **Engine**: Rank index, proposal scheduler and the matching loop
//! - **Matching**: Match table and the finished stable matching with verification
//!
//! Outside the engine, and depending on it only through its public API:
//! - **Generator**: Seeded random preference tables
//! - **Roster**: Name labels for agents and the demo roster
//! - **Config**: Command-line flags and logging setup for the binary
//!
//! ## Design Principles
//!
//! 1. **Validated Input**: A `PreferenceTable` can only hold permutation tables
//! 2. **O(1) Comparisons**: Receivers rank suitors through an inverse index
//! 3. **Determinism**: Same table and queue order, same proposal trace
//! 4. **No Global State**: Each run owns its queue and match table
//!
//! ## Example
//!
//! ```
//! use stable_match::{stable_match, PreferenceTable, ProposerId, ReceiverId};
//!
//! let prefs = PreferenceTable::new(&[[0, 1], [0, 1]], &[[1, 0], [1, 0]]).unwrap();
//! let outcome = stable_match(&prefs).unwrap();
//!
//! assert_eq!(outcome.matching.partner_of_proposer(ProposerId(1)), Some(ReceiverId(0)));
//! assert!(outcome.matching.is_stable(&prefs));
//! ```

// ============================================================================
// Module declarations
// ============================================================================

/// Error type shared by every module
pub mod error;

/// Core data types: ids, preference tables, events, receipts
pub mod types;

/// Matching engine: rank index, scheduler, deferred-acceptance loop
pub mod engine;

/// Match table and stable matching results
pub mod matching;

/// Seeded random preference tables
pub mod generator;

/// Name labels and the demo roster
pub mod roster;

/// CLI configuration and logging
pub mod config;

// ============================================================================
// Re-exports for convenience
// ============================================================================

pub use error::{MatchError, Result};
pub use types::{
    MatchReceipt, PreferenceTable, ProposalEvent, ProposalOutcome, ProposerId, ReceiverId, Side,
};
pub use engine::{stable_match, MatchOutcome, ProposalObserver, RunStats, StableMatcher};
pub use matching::{BlockingPair, StableMatching};
