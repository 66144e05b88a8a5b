//! Preference store for both sides of a matching.
//!
//! ## Layout
//!
//! Each side's lists are stored row-major in a single flat vector of `n * n`
//! identities: row `a` holds agent `a`'s ranking of the opposite side, most
//! preferred first.
//!
//! ```text
//! proposer 0: [r2, r0, r1]   -> flat[0..3]
//! proposer 1: [r0, r2, r1]   -> flat[3..6]
//! proposer 2: [r1, r0, r2]   -> flat[6..9]
//! ```
//!
//! ## Validation
//!
//! A table can only be built from two `n`-by-`n` permutation tables. Every
//! defect (size mismatch, short or long row, out-of-range id, repeated id) is
//! reported at construction, so the matching loop never has to check its
//! input again.

use tracing::warn;

use crate::error::{MatchError, Result};
use crate::types::{ProposerId, ReceiverId, Side};

/// Immutable, validated preference lists for proposers and receivers.
///
/// ## Example
///
/// ```
/// use stable_match::types::{PreferenceTable, ProposerId, ReceiverId};
///
/// let table = PreferenceTable::new(
///     &[[0, 1], [1, 0]],   // proposer preferences over receivers
///     &[[1, 0], [0, 1]],   // receiver preferences over proposers
/// ).unwrap();
///
/// assert_eq!(table.size(), 2);
/// assert_eq!(table.receiver_at(ProposerId(1), 0), Some(ReceiverId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceTable {
    /// Number of agents on each side
    n: usize,

    /// Proposer rows, row-major, entries are receiver indices
    proposer_prefs: Vec<usize>,

    /// Receiver rows, row-major, entries are proposer indices
    receiver_prefs: Vec<usize>,
}

impl PreferenceTable {
    /// Build a table from proposer rows and receiver rows.
    ///
    /// # Errors
    ///
    /// Returns an error unless both sides hold the same number of rows and
    /// every row is a permutation of `0..n`.
    pub fn new<P, R>(proposer_rows: &[P], receiver_rows: &[R]) -> Result<Self>
    where
        P: AsRef<[usize]>,
        R: AsRef<[usize]>,
    {
        let n = proposer_rows.len();
        if receiver_rows.len() != n {
            let err = MatchError::SizeMismatch {
                proposers: n,
                receivers: receiver_rows.len(),
            };
            warn!(%err, "rejected preference table");
            return Err(err);
        }

        let proposer_prefs = flatten_side(Side::Proposer, n, proposer_rows)?;
        let receiver_prefs = flatten_side(Side::Receiver, n, receiver_rows)?;

        Ok(Self {
            n,
            proposer_prefs,
            receiver_prefs,
        })
    }

    /// Number of agents on each side
    #[inline]
    pub fn size(&self) -> usize {
        self.n
    }

    /// Check if the table has no agents
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Receiver that `proposer` ranks at position `rank` (0 = favourite)
    #[inline]
    pub fn receiver_at(&self, proposer: ProposerId, rank: usize) -> Option<ReceiverId> {
        if rank >= self.n {
            return None;
        }
        self.proposer_row(proposer).get(rank).copied().map(ReceiverId)
    }

    /// Proposer that `receiver` ranks at position `rank` (0 = favourite)
    #[inline]
    pub fn proposer_at(&self, receiver: ReceiverId, rank: usize) -> Option<ProposerId> {
        if rank >= self.n {
            return None;
        }
        self.receiver_row(receiver).get(rank).copied().map(ProposerId)
    }

    /// Proposer's full ranking, most preferred first
    pub fn proposer_list(&self, proposer: ProposerId) -> impl Iterator<Item = ReceiverId> + '_ {
        self.proposer_row(proposer).iter().copied().map(ReceiverId)
    }

    /// Receiver's full ranking, most preferred first
    pub fn receiver_list(&self, receiver: ReceiverId) -> impl Iterator<Item = ProposerId> + '_ {
        self.receiver_row(receiver).iter().copied().map(ProposerId)
    }

    /// Raw proposer row (receiver indices). Empty for an unknown proposer.
    #[inline]
    pub fn proposer_row(&self, proposer: ProposerId) -> &[usize] {
        row(&self.proposer_prefs, self.n, proposer.index())
    }

    /// Raw receiver row (proposer indices). Empty for an unknown receiver.
    #[inline]
    pub fn receiver_row(&self, receiver: ReceiverId) -> &[usize] {
        row(&self.receiver_prefs, self.n, receiver.index())
    }

    /// Flat row-major receiver preferences, used to build the rank index
    pub(crate) fn receiver_prefs_flat(&self) -> &[usize] {
        &self.receiver_prefs
    }

    /// Flat row-major proposer preferences
    pub(crate) fn proposer_prefs_flat(&self) -> &[usize] {
        &self.proposer_prefs
    }
}

fn row(flat: &[usize], n: usize, index: usize) -> &[usize] {
    if index >= n {
        return &[];
    }
    &flat[index * n..(index + 1) * n]
}

/// Validate one side's rows and copy them into a flat vector.
fn flatten_side<T: AsRef<[usize]>>(side: Side, n: usize, rows: &[T]) -> Result<Vec<usize>> {
    let mut flat = Vec::with_capacity(n * n);
    let mut seen = vec![false; n];

    for (agent, row) in rows.iter().enumerate() {
        let row = row.as_ref();
        if let Err(err) = check_row(side, agent, n, row, &mut seen) {
            warn!(%err, "rejected preference table");
            return Err(err);
        }
        flat.extend_from_slice(row);
    }

    Ok(flat)
}

/// Check that `row` is a permutation of `0..n`. `seen` is scratch space.
fn check_row(side: Side, agent: usize, n: usize, row: &[usize], seen: &mut [bool]) -> Result<()> {
    if row.len() != n {
        return Err(MatchError::RowLength {
            side,
            agent,
            expected: n,
            actual: row.len(),
        });
    }

    seen.iter_mut().for_each(|s| *s = false);
    for &entry in row {
        if entry >= n {
            return Err(MatchError::OutOfRange { side, agent, entry, n });
        }
        if seen[entry] {
            return Err(MatchError::Duplicate { side, agent, entry });
        }
        seen[entry] = true;
    }

    Ok(())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = PreferenceTable::new(
            &[[0, 1, 2], [1, 0, 2], [0, 2, 1]],
            &[[1, 0, 2], [0, 1, 2], [0, 1, 2]],
        )
        .unwrap();

        assert_eq!(table.size(), 3);
        assert!(!table.is_empty());
        assert_eq!(table.proposer_row(ProposerId(2)), &[0, 2, 1]);
        assert_eq!(table.receiver_row(ReceiverId(0)), &[1, 0, 2]);
        assert_eq!(table.receiver_at(ProposerId(1), 0), Some(ReceiverId(1)));
        assert_eq!(table.proposer_at(ReceiverId(0), 2), Some(ProposerId(2)));
        assert_eq!(table.receiver_at(ProposerId(1), 3), None);
        assert_eq!(table.receiver_at(ProposerId(9), 0), None);
    }

    #[test]
    fn test_table_lists() {
        let table = PreferenceTable::new(&[[1, 0], [0, 1]], &[[0, 1], [1, 0]]).unwrap();

        let list: Vec<_> = table.proposer_list(ProposerId(0)).collect();
        assert_eq!(list, vec![ReceiverId(1), ReceiverId(0)]);

        let list: Vec<_> = table.receiver_list(ReceiverId(1)).collect();
        assert_eq!(list, vec![ProposerId(1), ProposerId(0)]);
    }

    #[test]
    fn test_table_empty() {
        let empty: [[usize; 0]; 0] = [];
        let table = PreferenceTable::new(&empty, &empty).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.proposer_row(ProposerId(0)), &[] as &[usize]);
    }

    #[test]
    fn test_table_size_mismatch() {
        let err = PreferenceTable::new(&[[0, 1], [1, 0]], &[[0, 1]]).unwrap_err();
        assert_eq!(err, MatchError::SizeMismatch { proposers: 2, receivers: 1 });
    }

    #[test]
    fn test_table_short_row() {
        let proposers: Vec<Vec<usize>> = vec![vec![0, 1], vec![1]];
        let receivers: Vec<Vec<usize>> = vec![vec![0, 1], vec![1, 0]];

        let err = PreferenceTable::new(&proposers, &receivers).unwrap_err();
        assert_eq!(
            err,
            MatchError::RowLength { side: Side::Proposer, agent: 1, expected: 2, actual: 1 }
        );
    }

    #[test]
    fn test_table_out_of_range() {
        let err = PreferenceTable::new(&[[0, 1], [1, 0]], &[[0, 1], [2, 0]]).unwrap_err();
        assert_eq!(
            err,
            MatchError::OutOfRange { side: Side::Receiver, agent: 1, entry: 2, n: 2 }
        );
    }

    #[test]
    fn test_table_duplicate() {
        // A receiver that lists one proposer twice and omits another
        let err = PreferenceTable::new(
            &[[0, 1, 2], [1, 0, 2], [0, 2, 1]],
            &[[1, 0, 2], [0, 1, 2], [1, 1, 0]],
        )
        .unwrap_err();
        assert_eq!(err, MatchError::Duplicate { side: Side::Receiver, agent: 2, entry: 1 });
    }
}
