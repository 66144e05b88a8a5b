//! Inverse rank tables.
//!
//! ## Design
//!
//! A preference list answers "who is my k-th choice"; the matching loop needs
//! the inverse question, "where does agent `a` sit in my list". The rank
//! index precomputes that inverse for every row so the comparison is O(1):
//!
//! ```text
//! prefs[r] = [2, 0, 1]   ->   ranks[r] = [1, 2, 0]
//! ```
//!
//! Rows are independent, and storage is one flat `n * n` vector.

use crate::types::{PreferenceTable, ProposerId, ReceiverId};

/// Row-major table of inverse permutations.
///
/// `rank(row, agent)` is the position of `agent` in `row`'s preference list
/// (lower = more preferred).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankIndex {
    n: usize,
    ranks: Vec<usize>,
}

impl RankIndex {
    /// Invert a flat row-major table of `n` permutations of `0..n`.
    fn invert(n: usize, prefs: &[usize]) -> Self {
        let mut ranks = vec![0; n * n];
        for (row, list) in prefs.chunks_exact(n.max(1)).enumerate() {
            let base = row * n;
            for (rank, &agent) in list.iter().enumerate() {
                ranks[base + agent] = rank;
            }
        }
        Self { n, ranks }
    }

    /// Build the receiver-side index: `rank(r, p)` = position of proposer p
    /// in receiver r's list. This is the index the matching loop consults.
    pub fn receivers(table: &PreferenceTable) -> Self {
        Self::invert(table.size(), table.receiver_prefs_flat())
    }

    /// Build the proposer-side index: `rank(p, r)` = position of receiver r
    /// in proposer p's list. The matching loop never needs it; it serves
    /// callers comparing the partners a proposer gets across matchings.
    pub fn proposers(table: &PreferenceTable) -> Self {
        Self::invert(table.size(), table.proposer_prefs_flat())
    }

    /// Number of rows (and of ranked agents per row)
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Position of `agent` in `row`'s preference list
    #[inline]
    pub fn rank(&self, row: usize, agent: usize) -> usize {
        self.ranks[row * self.n + agent]
    }

    /// The inverse row for one agent
    pub fn row(&self, row: usize) -> &[usize] {
        &self.ranks[row * self.n..(row + 1) * self.n]
    }

    /// Whether `receiver` prefers proposer `a` over proposer `b`.
    ///
    /// Only meaningful on a receiver-side index.
    #[inline]
    pub fn prefers(&self, receiver: ReceiverId, a: ProposerId, b: ProposerId) -> bool {
        self.rank(receiver.index(), a.index()) < self.rank(receiver.index(), b.index())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
