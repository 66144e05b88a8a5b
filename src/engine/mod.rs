//! Matching engine module.
//!
//! ## Design Principles
//!
//! The engine is designed for:
//!
//! 1. **Determinism**: Same preference table and queue order, same proposals
//! 2. **O(1) Comparisons**: Receivers compare suitors through an inverse rank index
//! 3. **Synchronous Execution**: One thread owns the queue and match table for a run
//! 4. **No Global State**: Everything a run mutates lives in the run
//!
//! ## Components
//!
//! - [`RankIndex`]: inverse preference lists, built once per table
//! - [`ProposalScheduler`]: free-proposer FIFO and proposal counters
//! - [`StableMatcher`] / [`MatchingRun`]: the deferred-acceptance loop
//! - [`ProposalObserver`]: optional per-proposal side channel
//!
//! ## Example
//!
//! ```
//! use stable_match::engine::{ProposalLog, StableMatcher};
//! use stable_match::types::PreferenceTable;
//!
//! let prefs = PreferenceTable::new(&[[0, 1], [0, 1]], &[[1, 0], [1, 0]]).unwrap();
//!
//! let mut log = ProposalLog::new();
//! let outcome = StableMatcher::new(&prefs).run_observed(&mut log).unwrap();
//!
//! assert_eq!(outcome.stats.proposals, log.len());
//! assert!(outcome.matching.is_stable(&prefs));
//! ```

pub mod rank;
pub mod scheduler;
pub mod observer;
pub mod matcher;

pub use rank::RankIndex;
pub use scheduler::ProposalScheduler;
pub use observer::{NoopObserver, ProposalLog, ProposalObserver, TracingObserver};
pub use matcher::{stable_match, MatchOutcome, MatchingRun, RunStats, StableMatcher};
