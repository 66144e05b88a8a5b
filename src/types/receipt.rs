//! Match receipt summarizing a completed run.
//!
//! The receipt pairs the run's counters with a 32-byte digest of the final
//! matching, so two runs (or two machines) can compare results without
//! exchanging the full matching.

use ssz_rs::prelude::*;
use sha2::{Digest, Sha256};

/// Summary of one matching run.
///
/// ## Digest
///
/// The digest is the SHA-256 of the receiver-indexed partner list, each
/// entry encoded as a little-endian u64 (see
/// [`crate::matching::StableMatching::digest`]).
///
/// ## Example
///
/// ```
/// use stable_match::types::MatchReceipt;
///
/// let receipt = MatchReceipt::new(
///     5,          // size
///     9,          // proposals
///     2,          // displacements
///     2,          // rejections
///     [0u8; 32],  // digest (would be computed)
/// );
/// assert_eq!(receipt.successful_proposals(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, SimpleSerialize)]
pub struct MatchReceipt {
    /// Number of agents on each side
    pub size: u64,

    /// Total proposals made
    pub proposals: u64,

    /// Proposals that released a previous partner
    pub displacements: u64,

    /// Proposals the receiver turned down
    pub rejections: u64,

    /// SHA-256 of the final matching
    pub digest: [u8; 32],
}

impl MatchReceipt {
    /// Create a new match receipt
    pub fn new(
        size: u64,
        proposals: u64,
        displacements: u64,
        rejections: u64,
        digest: [u8; 32],
    ) -> Self {
        Self {
            size,
            proposals,
            displacements,
            rejections,
            digest,
        }
    }

    /// Compute SHA-256 of the given data
    pub fn compute_hash(data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        let result = hasher.finalize();

        let mut hash = [0u8; 32];
        hash.copy_from_slice(&result);
        hash
    }

    /// Get the digest as a hex string
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }

    /// Proposals that left the proposer matched, whether the receiver was
    /// free or released a previous partner
    pub fn successful_proposals(&self) -> u64 {
        self.proposals.saturating_sub(self.rejections)
    }

    /// Average proposals per proposer
    ///
    /// Returns None for an empty run.
    pub fn proposals_per_agent(&self) -> Option<f64> {
        if self.size == 0 {
            None
        } else {
            Some(self.proposals as f64 / self.size as f64)
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_new() {
        let receipt = MatchReceipt::new(5, 9, 2, 2, [1u8; 32]);

        assert_eq!(receipt.size, 5);
        assert_eq!(receipt.proposals, 9);
        assert_eq!(receipt.displacements, 2);
        assert_eq!(receipt.rejections, 2);
        assert_eq!(receipt.digest, [1u8; 32]);
        assert_eq!(receipt.successful_proposals(), 7);
    }

    #[test]
    fn test_receipt_hash_determinism() {
        let hash1 = MatchReceipt::compute_hash(b"matching");
        let hash2 = MatchReceipt::compute_hash(b"matching");
        assert_eq!(hash1, hash2);

        let hash3 = MatchReceipt::compute_hash(b"other matching");
        assert_ne!(hash1, hash3);
    }

    #[test]
    fn test_receipt_digest_hex() {
        let receipt = MatchReceipt::new(1, 1, 0, 0, [0xAB; 32]);

        let hex = receipt.digest_hex();
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abab"));
    }

    #[test]
    fn test_receipt_proposals_per_agent() {
        let receipt = MatchReceipt::new(4, 10, 1, 3, [0u8; 32]);
        assert_eq!(receipt.proposals_per_agent(), Some(2.5));

        let empty = MatchReceipt::default();
        assert_eq!(empty.proposals_per_agent(), None);
    }

    #[test]
    fn test_receipt_ssz_size() {
        let receipt = MatchReceipt::new(3, 4, 1, 1, [0u8; 32]);
        let bytes = ssz_rs::serialize(&receipt).expect("Failed to serialize");

        // 8 + 8 + 8 + 8 + 32 bytes
        assert_eq!(bytes.len(), 64, "MatchReceipt should serialize to 64 bytes");
    }

    #[test]
    fn test_receipt_deterministic_serialization() {
        let receipt = MatchReceipt::new(3, 4, 1, 1, [0x5A; 32]);

        let bytes1 = ssz_rs::serialize(&receipt).expect("Failed to serialize");
        let bytes2 = ssz_rs::serialize(&receipt).expect("Failed to serialize");
        assert_eq!(bytes1, bytes2);

        let decoded: MatchReceipt = ssz_rs::deserialize(&bytes1).expect("Failed to deserialize");
        assert_eq!(decoded, receipt);
    }
}
