//! The result of a matching run and its verification.
//!
//! ## Views
//!
//! A [`StableMatching`] is a perfect bijection between proposers and
//! receivers, kept in both directions:
//!
//! - receiver-indexed: `by_receiver()[r]` is r's partner
//! - proposer-indexed: `by_proposer()[p]` is p's partner
//!
//! ## Verification
//!
//! [`StableMatching::blocking_pairs`] checks a matching against a preference
//! table by brute force. For each proposer it walks only the receivers the
//! proposer ranks above its partner, so the whole check is O(n²).

use crate::engine::RankIndex;
use crate::types::{MatchReceipt, PreferenceTable, ProposerId, ReceiverId};

/// A proposer and receiver who both prefer each other to their partners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockingPair {
    pub proposer: ProposerId,
    pub receiver: ReceiverId,
}

/// A perfect matching between proposers and receivers.
///
/// ## Example
///
/// ```
/// use stable_match::matching::StableMatching;
/// use stable_match::types::{ProposerId, ReceiverId};
///
/// // receiver 0 <- proposer 1, receiver 1 <- proposer 0
/// let matching = StableMatching::from_receiver_partners(&[1, 0]).unwrap();
///
/// assert_eq!(matching.partner_of_proposer(ProposerId(0)), Some(ReceiverId(1)));
/// assert_eq!(matching.partner_of_receiver(ReceiverId(0)), Some(ProposerId(1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StableMatching {
    by_receiver: Vec<ProposerId>,
    by_proposer: Vec<ReceiverId>,
}

impl StableMatching {
    /// Build from a complete receiver-indexed partner list.
    ///
    /// The caller guarantees `by_receiver` is a permutation of `0..n`.
    pub(crate) fn from_complete(by_receiver: Vec<ProposerId>) -> Self {
        let mut by_proposer = vec![ReceiverId(0); by_receiver.len()];
        for (r, p) in by_receiver.iter().enumerate() {
            by_proposer[p.index()] = ReceiverId(r);
        }
        Self {
            by_receiver,
            by_proposer,
        }
    }

    /// Build from receiver-indexed partner indices.
    ///
    /// Returns None unless `partners` is a permutation of `0..n`.
    pub fn from_receiver_partners(partners: &[usize]) -> Option<Self> {
        let n = partners.len();
        let mut seen = vec![false; n];
        for &p in partners {
            if p >= n || seen[p] {
                return None;
            }
            seen[p] = true;
        }
        Some(Self::from_complete(
            partners.iter().copied().map(ProposerId).collect(),
        ))
    }

    /// Number of pairs
    #[inline]
    pub fn size(&self) -> usize {
        self.by_receiver.len()
    }

    /// Check if the matching has no pairs
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.by_receiver.is_empty()
    }

    /// Partner of `receiver`
    #[inline]
    pub fn partner_of_receiver(&self, receiver: ReceiverId) -> Option<ProposerId> {
        self.by_receiver.get(receiver.index()).copied()
    }

    /// Partner of `proposer`
    #[inline]
    pub fn partner_of_proposer(&self, proposer: ProposerId) -> Option<ReceiverId> {
        self.by_proposer.get(proposer.index()).copied()
    }

    /// Receiver-indexed partners
    pub fn by_receiver(&self) -> &[ProposerId] {
        &self.by_receiver
    }

    /// Proposer-indexed partners
    pub fn by_proposer(&self) -> &[ReceiverId] {
        &self.by_proposer
    }

    /// All pairs, in proposer order
    pub fn pairs(&self) -> impl Iterator<Item = (ProposerId, ReceiverId)> + '_ {
        self.by_proposer
            .iter()
            .enumerate()
            .map(|(p, &r)| (ProposerId(p), r))
    }

    /// Every blocking pair of this matching under `prefs`.
    ///
    /// A matching of a different size than `prefs` yields no pairs;
    /// [`StableMatching::is_stable`] reports it as unstable.
    pub fn blocking_pairs(&self, prefs: &PreferenceTable) -> Vec<BlockingPair> {
        let mut blocking = Vec::new();
        if prefs.size() != self.size() {
            return blocking;
        }

        let receiver_ranks = RankIndex::receivers(prefs);

        for (proposer, &partner) in self.by_proposer.iter().enumerate() {
            let proposer = ProposerId(proposer);
            for receiver in prefs.proposer_list(proposer) {
                if receiver == partner {
                    break;
                }
                let holder = self.by_receiver[receiver.index()];
                if receiver_ranks.prefers(receiver, proposer, holder) {
                    blocking.push(BlockingPair { proposer, receiver });
                }
            }
        }

        blocking
    }

    /// Whether no blocking pair exists under `prefs`
    pub fn is_stable(&self, prefs: &PreferenceTable) -> bool {
        prefs.size() == self.size() && self.blocking_pairs(prefs).is_empty()
    }

    /// SHA-256 of the receiver-indexed partner list (little-endian u64s)
    pub fn digest(&self) -> [u8; 32] {
        let mut bytes = Vec::with_capacity(self.by_receiver.len() * 8);
        for p in &self.by_receiver {
            bytes.extend_from_slice(&(p.index() as u64).to_le_bytes());
        }
        MatchReceipt::compute_hash(&bytes)
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
