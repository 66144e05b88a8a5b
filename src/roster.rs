//! Name labels for agents.
//!
//! The engine works on dense integer identities only. A [`Roster`] is the
//! presentation layer on top: it assigns identities to names in the order
//! they are given, builds a [`PreferenceTable`] from name-keyed lists, and
//! turns results and proposal events back into names.
//!
//! ## Example
//!
//! ```
//! use stable_match::roster::Roster;
//! use stable_match::engine::stable_match;
//!
//! let roster = Roster::new(["ann", "bob"], ["cat", "dan"]).unwrap();
//! let prefs = roster
//!     .table(
//!         &[("ann", &["cat", "dan"][..]), ("bob", &["cat", "dan"][..])],
//!         &[("cat", &["bob", "ann"][..]), ("dan", &["ann", "bob"][..])],
//!     )
//!     .unwrap();
//!
//! let outcome = stable_match(&prefs).unwrap();
//! let pairs = roster.label_pairs(&outcome.matching);
//! assert_eq!(pairs, vec![("cat", "bob"), ("dan", "ann")]);
//! ```

use std::collections::HashMap;

use crate::error::{MatchError, Result};
use crate::matching::StableMatching;
use crate::types::{PreferenceTable, ProposalEvent, ProposalOutcome, ProposerId, ReceiverId, Side};

/// Name-keyed preference lists: `(agent, ranking of the other side)`
pub type NamedPreferences<'n> = [(&'n str, &'n [&'n str])];

/// Bidirectional name <-> identity mapping for both sides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    proposers: Vec<String>,
    receivers: Vec<String>,
    proposer_index: HashMap<String, usize>,
    receiver_index: HashMap<String, usize>,
}

impl Roster {
    /// Assign identities `0..n` to each side's names, in order.
    ///
    /// # Errors
    ///
    /// Fails on a repeated name within one side.
    pub fn new<P, R>(proposers: P, receivers: R) -> Result<Self>
    where
        P: IntoIterator,
        P::Item: Into<String>,
        R: IntoIterator,
        R::Item: Into<String>,
    {
        let (proposers, proposer_index) = index_names(Side::Proposer, proposers)?;
        let (receivers, receiver_index) = index_names(Side::Receiver, receivers)?;

        Ok(Self {
            proposers,
            receivers,
            proposer_index,
            receiver_index,
        })
    }

    /// Number of proposers
    pub fn proposer_count(&self) -> usize {
        self.proposers.len()
    }

    /// Number of receivers
    pub fn receiver_count(&self) -> usize {
        self.receivers.len()
    }

    /// Identity of the proposer called `name`
    pub fn proposer_id(&self, name: &str) -> Result<ProposerId> {
        lookup(Side::Proposer, &self.proposer_index, name).map(ProposerId)
    }

    /// Identity of the receiver called `name`
    pub fn receiver_id(&self, name: &str) -> Result<ReceiverId> {
        lookup(Side::Receiver, &self.receiver_index, name).map(ReceiverId)
    }

    /// Name of `proposer`
    pub fn proposer_name(&self, proposer: ProposerId) -> Option<&str> {
        self.proposers.get(proposer.index()).map(String::as_str)
    }

    /// Name of `receiver`
    pub fn receiver_name(&self, receiver: ReceiverId) -> Option<&str> {
        self.receivers.get(receiver.index()).map(String::as_str)
    }

    /// Build a validated table from name-keyed lists.
    ///
    /// Lists may be given in any agent order. An agent without a list is
    /// reported as a list of length zero.
    pub fn table(
        &self,
        proposer_prefs: &NamedPreferences<'_>,
        receiver_prefs: &NamedPreferences<'_>,
    ) -> Result<PreferenceTable> {
        let proposer_rows = resolve_rows(
            Side::Proposer,
            &self.proposer_index,
            &self.receiver_index,
            proposer_prefs,
        )?;
        let receiver_rows = resolve_rows(
            Side::Receiver,
            &self.receiver_index,
            &self.proposer_index,
            receiver_prefs,
        )?;

        PreferenceTable::new(&proposer_rows, &receiver_rows)
    }

    /// `(receiver, proposer)` name pairs in receiver order
    pub fn label_pairs<'r>(&'r self, matching: &StableMatching) -> Vec<(&'r str, &'r str)> {
        matching
            .by_receiver()
            .iter()
            .enumerate()
            .filter_map(|(r, &p)| {
                Some((self.receiver_name(ReceiverId(r))?, self.proposer_name(p)?))
            })
            .collect()
    }

    /// One-line narration of a proposal
    pub fn describe(&self, event: &ProposalEvent) -> String {
        let p = self.proposer_label(event.proposer);
        let r = self.receiver_label(event.receiver);
        match event.outcome {
            ProposalOutcome::Accepted => {
                format!("{p} proposes to {r}; {r} accepts")
            }
            ProposalOutcome::Displaced { jilted } => format!(
                "{p} proposes to {r}; {r} accepts and leaves {}",
                self.proposer_label(jilted)
            ),
            ProposalOutcome::Rejected { holder } => format!(
                "{p} proposes to {r}; {r} rejects {p} and stays with {}",
                self.proposer_label(holder)
            ),
        }
    }

    fn proposer_label(&self, proposer: ProposerId) -> String {
        self.proposer_name(proposer)
            .map_or_else(|| proposer.to_string(), str::to_owned)
    }

    fn receiver_label(&self, receiver: ReceiverId) -> String {
        self.receiver_name(receiver)
            .map_or_else(|| receiver.to_string(), str::to_owned)
    }

    /// The five-by-five demo roster with its preference lists.
    pub fn classic() -> Result<(Self, PreferenceTable)> {
        let roster = Self::new(
            ["victor", "wyatt", "xavier", "yancey", "zeus"],
            ["amy", "bertha", "clare", "diane", "erika"],
        )?;

        let proposer_prefs: &NamedPreferences<'_> = &[
            ("victor", &["bertha", "amy", "diane", "erika", "clare"][..]),
            ("wyatt", &["diane", "bertha", "amy", "clare", "erika"][..]),
            ("xavier", &["bertha", "erika", "clare", "diane", "amy"][..]),
            ("yancey", &["amy", "diane", "clare", "bertha", "erika"][..]),
            ("zeus", &["bertha", "diane", "amy", "erika", "clare"][..]),
        ];
        let receiver_prefs: &NamedPreferences<'_> = &[
            ("amy", &["zeus", "victor", "wyatt", "yancey", "xavier"][..]),
            ("bertha", &["xavier", "wyatt", "yancey", "victor", "zeus"][..]),
            ("clare", &["wyatt", "xavier", "yancey", "zeus", "victor"][..]),
            ("diane", &["victor", "zeus", "yancey", "xavier", "wyatt"][..]),
            ("erika", &["yancey", "wyatt", "zeus", "xavier", "victor"][..]),
        ];

        let table = roster.table(proposer_prefs, receiver_prefs)?;
        Ok((roster, table))
    }
}

fn index_names<I>(side: Side, names: I) -> Result<(Vec<String>, HashMap<String, usize>)>
where
    I: IntoIterator,
    I::Item: Into<String>,
{
    let mut ordered = Vec::new();
    let mut index = HashMap::new();

    for name in names {
        let name: String = name.into();
        if index.contains_key(&name) {
            return Err(MatchError::DuplicateName { side, name });
        }
        index.insert(name.clone(), ordered.len());
        ordered.push(name);
    }

    Ok((ordered, index))
}

fn lookup(side: Side, index: &HashMap<String, usize>, name: &str) -> Result<usize> {
    index.get(name).copied().ok_or_else(|| MatchError::UnknownName {
        side,
        name: name.to_owned(),
    })
}

/// Translate one side's named lists into id rows, ordered by agent id.
fn resolve_rows(
    side: Side,
    own: &HashMap<String, usize>,
    other: &HashMap<String, usize>,
    named: &NamedPreferences<'_>,
) -> Result<Vec<Vec<usize>>> {
    let mut rows: Vec<Option<Vec<usize>>> = vec![None; own.len()];

    for &(agent, ranking) in named {
        let id = lookup(side, own, agent)?;
        if rows[id].is_some() {
            return Err(MatchError::DuplicateName {
                side,
                name: agent.to_owned(),
            });
        }
        let row = ranking
            .iter()
            .map(|name| lookup(side.opposite(), other, name))
            .collect::<Result<Vec<_>>>()?;
        rows[id] = Some(row);
    }

    Ok(rows.into_iter().map(Option::unwrap_or_default).collect())
}

// ============================================================================
// Unit Tests
// ============================================================================
