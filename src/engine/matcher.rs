//! Deferred-acceptance matching loop.
//!
//! ## Run Model
//!
//! A [`StableMatcher`] is prepared once per preference table: it borrows
//! the table and owns the receiver rank index. Every call to `run*` creates
//! a fresh [`MatchingRun`] that exclusively owns the scheduler and the match
//! table, so a matcher can be reused, or shared by reference between
//! threads, without any state leaking from one run into the next.
//!
//! ## Step
//!
//! ```text
//! p = queue.front            w = p's next untried receiver
//! w unmatched          ->    w takes p                      (Accepted)
//! w prefers p          ->    w takes p, holder back in queue (Displaced)
//! w prefers holder     ->    p back at the queue front       (Rejected)
//! ```
//!
//! Each proposer proposes to each receiver at most once, so a run ends after
//! at most n² proposals.

use tracing::debug;

use crate::engine::{NoopObserver, ProposalObserver, ProposalScheduler, RankIndex};
use crate::error::{MatchError, Result};
use crate::matching::{MatchTable, StableMatching};
use crate::types::{MatchReceipt, PreferenceTable, ProposalEvent, ProposalOutcome, ProposerId};

/// Counters collected during one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    /// Total proposals made
    pub proposals: usize,
    /// Proposals accepted by an unmatched receiver
    pub acceptances: usize,
    /// Proposals that released a previous partner
    pub displacements: usize,
    /// Proposals turned down
    pub rejections: usize,
}

impl RunStats {
    fn record(&mut self, outcome: ProposalOutcome) {
        self.proposals += 1;
        match outcome {
            ProposalOutcome::Accepted => self.acceptances += 1,
            ProposalOutcome::Displaced { .. } => self.displacements += 1,
            ProposalOutcome::Rejected { .. } => self.rejections += 1,
        }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome {
    /// The stable matching
    pub matching: StableMatching,
    /// Counters for the run
    pub stats: RunStats,
}

impl MatchOutcome {
    /// Summarize the run as an SSZ-encodable receipt
    pub fn receipt(&self) -> MatchReceipt {
        MatchReceipt::new(
            self.matching.size() as u64,
            self.stats.proposals as u64,
            self.stats.displacements as u64,
            self.stats.rejections as u64,
            self.matching.digest(),
        )
    }
}

/// Prepared matcher for one preference table.
///
/// ## Example
///
/// ```
/// use stable_match::engine::StableMatcher;
/// use stable_match::types::{PreferenceTable, ProposerId, ReceiverId};
///
/// let prefs = PreferenceTable::new(
///     &[[0, 1, 2], [1, 0, 2], [0, 2, 1]],
///     &[[1, 0, 2], [0, 1, 2], [0, 1, 2]],
/// ).unwrap();
///
/// let outcome = StableMatcher::new(&prefs).run().unwrap();
///
/// assert!(outcome.matching.is_stable(&prefs));
/// assert_eq!(outcome.matching.partner_of_proposer(ProposerId(0)), Some(ReceiverId(0)));
/// ```
#[derive(Debug, Clone)]
pub struct StableMatcher<'a> {
    prefs: &'a PreferenceTable,
    ranks: RankIndex,
}

impl<'a> StableMatcher<'a> {
    /// Build the receiver rank index for `prefs`
    pub fn new(prefs: &'a PreferenceTable) -> Self {
        Self {
            prefs,
            ranks: RankIndex::receivers(prefs),
        }
    }

    /// The preference table this matcher runs on
    pub fn preferences(&self) -> &'a PreferenceTable {
        self.prefs
    }

    /// The receiver rank index
    pub fn ranks(&self) -> &RankIndex {
        &self.ranks
    }

    /// Run with proposers queued in identity order
    pub fn run(&self) -> Result<MatchOutcome> {
        self.run_observed(&mut NoopObserver)
    }

    /// Run with proposers queued in identity order, reporting every proposal
    pub fn run_observed<O>(&self, observer: &mut O) -> Result<MatchOutcome>
    where
        O: ProposalObserver + ?Sized,
    {
        let scheduler = ProposalScheduler::new(self.prefs.size());
        MatchingRun::new(self, scheduler).execute(observer)
    }

    /// Run with proposers initially queued in `order`.
    ///
    /// The order changes which proposals are made when, never the result.
    pub fn run_with_order<O>(
        &self,
        order: &[ProposerId],
        observer: &mut O,
    ) -> Result<MatchOutcome>
    where
        O: ProposalObserver + ?Sized,
    {
        let scheduler = ProposalScheduler::with_order(self.prefs.size(), order)?;
        MatchingRun::new(self, scheduler).execute(observer)
    }
}

/// State of a single run. Consumed by [`MatchingRun::execute`].
#[derive(Debug)]
pub struct MatchingRun<'m, 'a> {
    matcher: &'m StableMatcher<'a>,
    scheduler: ProposalScheduler,
    table: MatchTable,
    stats: RunStats,
}

impl<'m, 'a> MatchingRun<'m, 'a> {
    /// Start a run with the given queue
    pub fn new(matcher: &'m StableMatcher<'a>, scheduler: ProposalScheduler) -> Self {
        let n = matcher.prefs.size();
        Self {
            matcher,
            scheduler,
            table: MatchTable::new(n),
            stats: RunStats::default(),
        }
    }

    /// Resolve a single proposal from the front of the queue.
    ///
    /// Returns None once the queue is empty.
    pub fn step(&mut self) -> Result<Option<ProposalEvent>> {
        let Some(proposer) = self.scheduler.dequeue_front() else {
            return Ok(None);
        };

        let n = self.matcher.prefs.size();
        let receiver = self
            .scheduler
            .next_target(proposer, self.matcher.prefs)
            .ok_or(MatchError::ProposerExhausted {
                proposer: proposer.index(),
                n,
            })?;

        let outcome = match self.table.partner(receiver) {
            None => {
                self.table.assign(receiver, proposer);
                ProposalOutcome::Accepted
            }
            Some(holder) if self.matcher.ranks.prefers(receiver, proposer, holder) => {
                self.table.assign(receiver, proposer);
                self.scheduler.requeue(holder);
                ProposalOutcome::Displaced { jilted: holder }
            }
            Some(holder) => {
                self.scheduler.retry(proposer);
                ProposalOutcome::Rejected { holder }
            }
        };

        self.scheduler.record_proposal(proposer);
        let event = ProposalEvent::new(self.stats.proposals, proposer, receiver, outcome);
        self.stats.record(outcome);

        Ok(Some(event))
    }

    /// Run until every proposer is matched
    pub fn execute<O>(mut self, observer: &mut O) -> Result<MatchOutcome>
    where
        O: ProposalObserver + ?Sized,
    {
        while let Some(event) = self.step()? {
            observer.on_proposal(&event);
        }

        let n = self.matcher.prefs.size();
        // An empty queue means every proposer holds a distinct receiver.
        debug_assert!(self.table.is_complete());
        let by_receiver = self
            .table
            .to_complete()
            .ok_or(MatchError::IncompleteMatching {
                matched: self.table.matched_count(),
                n,
            })?;

        debug!(
            n,
            proposals = self.stats.proposals,
            displacements = self.stats.displacements,
            rejections = self.stats.rejections,
            "stable matching found"
        );

        Ok(MatchOutcome {
            matching: StableMatching::from_complete(by_receiver),
            stats: self.stats,
        })
    }

    /// Proposal counters so far
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Current partial matching
    pub fn table(&self) -> &MatchTable {
        &self.table
    }

    /// Current scheduler state
    pub fn scheduler(&self) -> &ProposalScheduler {
        &self.scheduler
    }
}

/// Compute the proposer-optimal stable matching for `prefs`.
pub fn stable_match(prefs: &PreferenceTable) -> Result<MatchOutcome> {
    StableMatcher::new(prefs).run()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ProposalLog;
    use crate::types::ReceiverId;

    fn example_three() -> PreferenceTable {
        PreferenceTable::new(
            &[[0, 1, 2], [1, 0, 2], [0, 2, 1]],
            &[[1, 0, 2], [0, 1, 2], [0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn test_single_pair() {
        let prefs = PreferenceTable::new(&[[0]], &[[0]]).unwrap();
        let outcome = stable_match(&prefs).unwrap();

        assert_eq!(outcome.stats.proposals, 1);
        assert_eq!(outcome.stats.acceptances, 1);
        assert_eq!(outcome.matching.partner_of_proposer(ProposerId(0)), Some(ReceiverId(0)));
    }

    #[test]
    fn test_empty_table() {
        let empty: [[usize; 0]; 0] = [];
        let prefs = PreferenceTable::new(&empty, &empty).unwrap();
        let outcome = stable_match(&prefs).unwrap();

        assert!(outcome.matching.is_empty());
        assert_eq!(outcome.stats, RunStats::default());
    }

    #[test]
    fn test_example_three() {
        let prefs = example_three();
        let outcome = stable_match(&prefs).unwrap();

        // p0 -> r0, p1 -> r1 immediately; p2 tries r0 (rejected), then r2
        assert_eq!(
            outcome.matching.by_proposer(),
            &[ReceiverId(0), ReceiverId(1), ReceiverId(2)]
        );
        assert_eq!(outcome.stats.proposals, 4);
        assert_eq!(outcome.stats.rejections, 1);
        assert_eq!(outcome.stats.displacements, 0);
        assert!(outcome.matching.is_stable(&prefs));
    }

    #[test]
    fn test_displacement_trace() {
        // Both proposers want r0; r0 prefers p1, who proposes second.
        let prefs = PreferenceTable::new(&[[0, 1], [0, 1]], &[[1, 0], [1, 0]]).unwrap();
        let mut log = ProposalLog::new();
        let outcome = StableMatcher::new(&prefs).run_observed(&mut log).unwrap();

        let outcomes: Vec<_> = log.events().iter().map(|e| e.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                ProposalOutcome::Accepted,
                ProposalOutcome::Displaced { jilted: ProposerId(0) },
                ProposalOutcome::Accepted,
            ]
        );
        assert_eq!(log.events()[2].receiver, ReceiverId(1));
        assert_eq!(outcome.stats.displacements, 1);
        assert_eq!(outcome.matching.partner_of_receiver(ReceiverId(0)), Some(ProposerId(1)));
    }

    #[test]
    fn test_rejected_proposer_retries_immediately() {
        let prefs = example_three();
        let mut log = ProposalLog::new();
        StableMatcher::new(&prefs).run_observed(&mut log).unwrap();

        let trace: Vec<_> = log.events().iter().map(|e| (e.proposer, e.receiver)).collect();
        assert_eq!(
            trace,
            vec![
                (ProposerId(0), ReceiverId(0)),
                (ProposerId(1), ReceiverId(1)),
                (ProposerId(2), ReceiverId(0)),
                (ProposerId(2), ReceiverId(2)),
            ]
        );
        let steps: Vec<_> = log.events().iter().map(|e| e.step).collect();
        assert_eq!(steps, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_run_with_order_same_result() {
        let prefs = example_three();
        let matcher = StableMatcher::new(&prefs);

        let forward = matcher.run().unwrap();
        let reversed = matcher
            .run_with_order(&[ProposerId(2), ProposerId(1), ProposerId(0)], &mut NoopObserver)
            .unwrap();

        assert_eq!(forward.matching, reversed.matching);
    }

    #[test]
    fn test_run_with_invalid_order() {
        let prefs = example_three();
        let result = StableMatcher::new(&prefs).run_with_order(&[ProposerId(0)], &mut NoopObserver);
        assert!(matches!(result, Err(MatchError::InvalidOrder { .. })));
    }

    #[test]
    fn test_step_by_step() {
        let prefs = example_three();
        let matcher = StableMatcher::new(&prefs);
        let mut run = MatchingRun::new(&matcher, ProposalScheduler::new(prefs.size()));

        let first = run.step().unwrap().unwrap();
        assert_eq!(first.outcome, ProposalOutcome::Accepted);
        assert_eq!(run.table().matched_count(), 1);
        assert_eq!(run.scheduler().len(), 2);
        assert_eq!(run.stats().proposals, 1);

        while run.step().unwrap().is_some() {}
        assert!(run.table().is_complete());
        assert!(run.scheduler().is_empty());
    }

    #[test]
    fn test_receipt() {
        let prefs = example_three();
        let outcome = stable_match(&prefs).unwrap();
        let receipt = outcome.receipt();

        assert_eq!(receipt.size, 3);
        assert_eq!(receipt.proposals, 4);
        assert_eq!(receipt.rejections, 1);
        assert_eq!(receipt.digest, outcome.matching.digest());

        // Receipt folds displacements into its successful proposals
        assert_eq!(
            receipt.successful_proposals(),
            (outcome.stats.acceptances + outcome.stats.displacements) as u64
        );
        assert_eq!(outcome.stats.acceptances, 3);
    }

    #[test]
    fn test_receipt_counts_displacements_as_successful() {
        let prefs = PreferenceTable::new(&[[0, 1], [0, 1]], &[[1, 0], [1, 0]]).unwrap();
        let outcome = stable_match(&prefs).unwrap();
        let receipt = outcome.receipt();

        assert_eq!(outcome.stats.acceptances, 2);
        assert_eq!(outcome.stats.displacements, 1);
        assert_eq!(receipt.successful_proposals(), 3);
        assert_eq!(
            receipt.proposals,
            receipt.successful_proposals() + receipt.rejections
        );
    }
}
