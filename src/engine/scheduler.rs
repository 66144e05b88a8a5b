//! Proposal scheduler: the free-proposer queue and proposal counters.
//!
//! ## Queue Structure
//!
//! ```text
//! front (next to propose) <- p3 <- p0 <- p4 <- back (most recently freed)
//! ```
//!
//! - Proposers released by a displacement are appended at the back
//! - A rejected proposer goes back to the front and proposes again at once
//! - The run is stable once the queue is empty
//!
//! `counts[p]` is the number of proposals `p` has made, which is also the
//! rank (in `p`'s own list) of the next receiver `p` will try.

use std::collections::VecDeque;

use crate::error::{MatchError, Result};
use crate::types::{PreferenceTable, ProposerId, ReceiverId};

/// FIFO of free proposers plus per-proposer proposal counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalScheduler {
    free: VecDeque<ProposerId>,
    counts: Vec<usize>,
}

impl ProposalScheduler {
    /// All `n` proposers free, queued in identity order, no proposals yet.
    pub fn new(n: usize) -> Self {
        Self {
            free: (0..n).map(ProposerId).collect(),
            counts: vec![0; n],
        }
    }

    /// All proposers free, queued in the given order.
    ///
    /// # Errors
    ///
    /// `order` must be a permutation of `0..n`.
    pub fn with_order(n: usize, order: &[ProposerId]) -> Result<Self> {
        if order.len() != n {
            return Err(MatchError::InvalidOrder {
                n,
                reason: format!("{} entries", order.len()),
            });
        }

        let mut seen = vec![false; n];
        for &p in order {
            match seen.get_mut(p.index()) {
                None => {
                    return Err(MatchError::InvalidOrder {
                        n,
                        reason: format!("{} out of range", p),
                    })
                }
                Some(true) => {
                    return Err(MatchError::InvalidOrder {
                        n,
                        reason: format!("{} listed twice", p),
                    })
                }
                Some(slot) => *slot = true,
            }
        }

        Ok(Self {
            free: order.iter().copied().collect(),
            counts: vec![0; n],
        })
    }

    /// Check if every proposer is matched
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }

    /// Number of free proposers
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Take the next free proposer
    #[inline]
    pub fn dequeue_front(&mut self) -> Option<ProposerId> {
        self.free.pop_front()
    }

    /// Receiver `proposer` proposes to next: its favourite not yet tried.
    ///
    /// Returns None once `proposer` has proposed to every receiver.
    #[inline]
    pub fn next_target(&self, proposer: ProposerId, prefs: &PreferenceTable) -> Option<ReceiverId> {
        let count = self.counts.get(proposer.index()).copied()?;
        prefs.receiver_at(proposer, count)
    }

    /// Count one proposal by `proposer`, whatever its outcome
    #[inline]
    pub fn record_proposal(&mut self, proposer: ProposerId) {
        self.counts[proposer.index()] += 1;
    }

    /// Queue a freshly released proposer at the back
    #[inline]
    pub fn requeue(&mut self, proposer: ProposerId) {
        self.free.push_back(proposer);
    }

    /// Put a rejected proposer back at the front
    #[inline]
    pub fn retry(&mut self, proposer: ProposerId) {
        self.free.push_front(proposer);
    }

    /// Proposals made so far by `proposer`
    #[inline]
    pub fn proposal_count(&self, proposer: ProposerId) -> usize {
        self.counts.get(proposer.index()).copied().unwrap_or(0)
    }

    /// Proposals made by every proposer, indexed by proposer
    pub fn proposal_counts(&self) -> &[usize] {
        &self.counts
    }

    /// Free proposers in queue order
    pub fn free_proposers(&self) -> impl Iterator<Item = ProposerId> + '_ {
        self.free.iter().copied()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
