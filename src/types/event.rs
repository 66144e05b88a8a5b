//! Proposal events emitted by the matching loop.
//!
//! One [`ProposalEvent`] is produced for every proposal the engine makes,
//! in the exact order the proposals happen. Events are a side channel for
//! observers (logging, tracing, tests); they never affect scheduling.

use std::fmt;

use crate::types::{ProposerId, ReceiverId};

/// What a receiver did with a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProposalOutcome {
    /// The receiver was unmatched and accepted
    Accepted,
    /// The receiver preferred the proposer and dropped `jilted`
    Displaced {
        /// Former partner, now free again
        jilted: ProposerId,
    },
    /// The receiver kept `holder`
    Rejected {
        /// Current partner of the receiver
        holder: ProposerId,
    },
}

impl ProposalOutcome {
    /// Whether the proposer ended up matched
    pub fn is_accepted(self) -> bool {
        !matches!(self, ProposalOutcome::Rejected { .. })
    }
}

/// A single proposal made during a run.
///
/// ## Example
///
/// ```
/// use stable_match::types::{ProposalEvent, ProposalOutcome, ProposerId, ReceiverId};
///
/// let event = ProposalEvent::new(0, ProposerId(1), ReceiverId(2), ProposalOutcome::Accepted);
/// assert!(event.outcome.is_accepted());
/// assert_eq!(event.to_string(), "#0 p1 -> r2: accepted");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProposalEvent {
    /// Zero-based proposal number within the run
    pub step: usize,

    /// Proposer making the proposal
    pub proposer: ProposerId,

    /// Receiver being proposed to
    pub receiver: ReceiverId,

    /// Decision taken by the receiver
    pub outcome: ProposalOutcome,
}

impl ProposalEvent {
    /// Create a new proposal event
    pub fn new(
        step: usize,
        proposer: ProposerId,
        receiver: ReceiverId,
        outcome: ProposalOutcome,
    ) -> Self {
        Self {
            step,
            proposer,
            receiver,
            outcome,
        }
    }
}

impl fmt::Display for ProposalEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} -> {}: ", self.step, self.proposer, self.receiver)?;
        match self.outcome {
            ProposalOutcome::Accepted => f.write_str("accepted"),
            ProposalOutcome::Displaced { jilted } => write!(f, "accepted, {} released", jilted),
            ProposalOutcome::Rejected { holder } => write!(f, "rejected, stays with {}", holder),
        }
    }
}
