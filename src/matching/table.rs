//! Match table: the partial matching built up by the loop.
//!
//! Indexed by receiver. A slot is either empty (receiver not yet proposed
//! to) or holds the receiver's current partner. Once a receiver is matched
//! it stays matched; only its partner can change.

use crate::types::{ProposerId, ReceiverId};

/// Current partner of every receiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchTable {
    partners: Vec<Option<ProposerId>>,
    matched: usize,
}

impl MatchTable {
    /// Table with `n` unmatched receivers
    pub fn new(n: usize) -> Self {
        Self {
            partners: vec![None; n],
            matched: 0,
        }
    }

    /// Number of receivers
    #[inline]
    pub fn size(&self) -> usize {
        self.partners.len()
    }

    /// Number of matched receivers
    #[inline]
    pub fn matched_count(&self) -> usize {
        self.matched
    }

    /// Check if every receiver holds a partner
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.matched == self.partners.len()
    }

    /// Current partner of `receiver`
    #[inline]
    pub fn partner(&self, receiver: ReceiverId) -> Option<ProposerId> {
        self.partners.get(receiver.index()).copied().flatten()
    }

    /// Set `receiver`'s partner, returning the one it replaces
    #[inline]
    pub fn assign(&mut self, receiver: ReceiverId, proposer: ProposerId) -> Option<ProposerId> {
        let previous = self.partners[receiver.index()].replace(proposer);
        if previous.is_none() {
            self.matched += 1;
        }
        previous
    }

    /// Receiver-indexed partners, or None if any receiver is unmatched
    pub fn to_complete(&self) -> Option<Vec<ProposerId>> {
        self.partners.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_new() {
        let table = MatchTable::new(3);

        assert_eq!(table.size(), 3);
        assert_eq!(table.matched_count(), 0);
        assert!(!table.is_complete());
        assert_eq!(table.partner(ReceiverId(1)), None);
        assert_eq!(table.to_complete(), None);
    }

    #[test]
    fn test_table_assign_and_replace() {
        let mut table = MatchTable::new(2);

        assert_eq!(table.assign(ReceiverId(0), ProposerId(1)), None);
        assert_eq!(table.matched_count(), 1);

        assert_eq!(table.assign(ReceiverId(0), ProposerId(0)), Some(ProposerId(1)));
        assert_eq!(table.matched_count(), 1);
        assert_eq!(table.partner(ReceiverId(0)), Some(ProposerId(0)));

        table.assign(ReceiverId(1), ProposerId(1));
        assert!(table.is_complete());
        assert_eq!(table.to_complete(), Some(vec![ProposerId(0), ProposerId(1)]));
    }

    #[test]
    fn test_table_unknown_receiver() {
        let table = MatchTable::new(1);
        assert_eq!(table.partner(ReceiverId(5)), None);
    }
}
