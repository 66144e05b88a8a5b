//! Matching state and results.
//!
//! ## Components
//!
//! - [`MatchTable`]: the partial matching mutated by the loop, indexed by receiver
//! - [`StableMatching`]: the finished perfect matching, both directions
//! - [`BlockingPair`]: a witness that a matching is not stable
//!
//! ## Example
//!
//! ```
//! use stable_match::matching::StableMatching;
//! use stable_match::types::PreferenceTable;
//!
//! let prefs = PreferenceTable::new(&[[0, 1], [0, 1]], &[[1, 0], [1, 0]]).unwrap();
//!
//! let stable = StableMatching::from_receiver_partners(&[1, 0]).unwrap();
//! assert!(stable.is_stable(&prefs));
//!
//! let unstable = StableMatching::from_receiver_partners(&[0, 1]).unwrap();
//! assert_eq!(unstable.blocking_pairs(&prefs).len(), 1);
//! ```

pub mod table;
pub mod stable;

pub use table::MatchTable;
pub use stable::{BlockingPair, StableMatching};
