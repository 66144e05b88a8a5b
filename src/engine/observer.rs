//! Observers for the per-proposal trace.
//!
//! The matching loop calls [`ProposalObserver::on_proposal`] once per
//! proposal, after the receiver's decision has been applied. Observers only
//! see events; they cannot touch the queue or the match table.

use tracing::trace;

use crate::types::{ProposalEvent, ProposalOutcome, ProposerId, ReceiverId};

/// Receives one event per proposal.
pub trait ProposalObserver {
    /// Called after each proposal is resolved
    fn on_proposal(&mut self, event: &ProposalEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProposalObserver for NoopObserver {
    #[inline]
    fn on_proposal(&mut self, _event: &ProposalEvent) {}
}

impl<F> ProposalObserver for F
where
    F: FnMut(&ProposalEvent),
{
    #[inline]
    fn on_proposal(&mut self, event: &ProposalEvent) {
        self(event)
    }
}

/// Emits every proposal as a `tracing` event at TRACE level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl ProposalObserver for TracingObserver {
    fn on_proposal(&mut self, event: &ProposalEvent) {
        match event.outcome {
            ProposalOutcome::Accepted => trace!(
                step = event.step,
                proposer = event.proposer.index(),
                receiver = event.receiver.index(),
                "proposal accepted"
            ),
            ProposalOutcome::Displaced { jilted } => trace!(
                step = event.step,
                proposer = event.proposer.index(),
                receiver = event.receiver.index(),
                jilted = jilted.index(),
                "proposal accepted, previous partner released"
            ),
            ProposalOutcome::Rejected { holder } => trace!(
                step = event.step,
                proposer = event.proposer.index(),
                receiver = event.receiver.index(),
                holder = holder.index(),
                "proposal rejected"
            ),
        }
    }
}

/// Records every event of a run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProposalLog {
    events: Vec<ProposalEvent>,
}

impl ProposalLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log with room for `capacity` events
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::with_capacity(capacity),
        }
    }

    /// All recorded events
    pub fn events(&self) -> &[ProposalEvent] {
        &self.events
    }

    /// Number of recorded proposals
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Proposers that held `receiver`, in the order they were accepted
    pub fn holders_of(&self, receiver: ReceiverId) -> Vec<ProposerId> {
        self.events
            .iter()
            .filter(|e| e.receiver == receiver && e.outcome.is_accepted())
            .map(|e| e.proposer)
            .collect()
    }
}

impl ProposalObserver for ProposalLog {
    fn on_proposal(&mut self, event: &ProposalEvent) {
        self.events.push(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StableMatcher;
    use crate::types::PreferenceTable;

    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Collects formatted subscriber output in memory.
    #[derive(Clone, Default)]
    struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

    impl CapturedOutput {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl io::Write for CapturedOutput {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for CapturedOutput {
        type Writer = CapturedOutput;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    #[test]
    fn test_closure_observer() {
        let mut seen = 0;
        {
            let mut observer = |_: &ProposalEvent| seen += 1;
            let event =
                ProposalEvent::new(0, ProposerId(0), ReceiverId(0), ProposalOutcome::Accepted);
            observer.on_proposal(&event);
            observer.on_proposal(&event);
        }
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_log_holders() {
        let mut log = ProposalLog::with_capacity(3);
        log.on_proposal(&ProposalEvent::new(
            0,
            ProposerId(0),
            ReceiverId(1),
            ProposalOutcome::Accepted,
        ));
        log.on_proposal(&ProposalEvent::new(
            1,
            ProposerId(2),
            ReceiverId(1),
            ProposalOutcome::Rejected { holder: ProposerId(0) },
        ));
        log.on_proposal(&ProposalEvent::new(
            2,
            ProposerId(1),
            ReceiverId(1),
            ProposalOutcome::Displaced { jilted: ProposerId(0) },
        ));

        assert_eq!(log.len(), 3);
        assert_eq!(log.holders_of(ReceiverId(1)), vec![ProposerId(0), ProposerId(1)]);
        assert!(log.holders_of(ReceiverId(0)).is_empty());
    }

    #[test]
    fn test_tracing_observer_emits_every_proposal() {
        // p0 -> r0, p1 -> r1, p2 rejected by r0 (held by p0), then p2 -> r2
        let prefs = PreferenceTable::new(
            &[[0, 1, 2], [1, 0, 2], [0, 2, 1]],
            &[[1, 0, 2], [0, 1, 2], [0, 1, 2]],
        )
        .unwrap();

        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(output.clone())
            .finish();

        let outcome = tracing::subscriber::with_default(subscriber, || {
            StableMatcher::new(&prefs).run_observed(&mut TracingObserver).unwrap()
        });

        let logged = output.contents();
        assert_eq!(logged.matches("proposal accepted").count(), 3);
        assert_eq!(logged.matches("proposal rejected").count(), 1);
        assert!(logged.contains("holder=0"));
        assert_eq!(outcome.stats.proposals, 4);
    }
}
