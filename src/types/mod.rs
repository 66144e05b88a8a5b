//! Core data types for the stable matching engine.
//!
//! ## Types
//!
//! - [`ProposerId`] / [`ReceiverId`]: dense agent identities, one namespace per side
//! - [`Side`]: Proposer or Receiver
//! - [`PreferenceTable`]: validated strict preference lists for both sides
//! - [`ProposalEvent`] / [`ProposalOutcome`]: one entry of the proposal trace
//! - [`MatchReceipt`]: SSZ-encodable run summary with a digest of the result

mod ids;
mod preference;
mod event;
mod receipt;

pub use ids::{ProposerId, ReceiverId, Side};
pub use preference::PreferenceTable;
pub use event::{ProposalEvent, ProposalOutcome};
pub use receipt::MatchReceipt;
