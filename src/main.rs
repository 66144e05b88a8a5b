//! Stable Match - Binary Entry Point
//!
//! Builds a preference table (seeded random, or the named demo roster),
//! runs the matching engine once and reports the result and timing.

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use tracing::{error, info};

use stable_match::config::{init_logging, CliConfig};
use stable_match::engine::{ProposalObserver, StableMatcher, TracingObserver};
use stable_match::generator::random_table;
use stable_match::roster::Roster;
use stable_match::types::{PreferenceTable, ProposalEvent, ProposerId, ReceiverId};
use stable_match::Result;

fn main() -> ExitCode {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "matching failed");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &CliConfig) -> Result<()> {
    let (roster, prefs) = if config.demo {
        let (roster, prefs) = Roster::classic()?;
        (Some(roster), prefs)
    } else {
        info!(n = config.size, seed = config.seed, "generating random preferences");
        (None, random_table(config.size, config.seed)?)
    };

    if config.show_preferences {
        print_preferences(&prefs, roster.as_ref());
    }

    let matcher = StableMatcher::new(&prefs);
    let start = Instant::now();
    let outcome = if config.trace {
        let mut tracer = TracingObserver;
        let mut printer = |event: &ProposalEvent| {
            tracer.on_proposal(event);
            match &roster {
                Some(roster) => println!("{}", roster.describe(event)),
                None => println!("{}", event),
            }
        };
        matcher.run_observed(&mut printer)?
    } else {
        matcher.run()?
    };
    let elapsed = start.elapsed();

    println!();
    println!("----- SOLUTION -----");
    match &roster {
        Some(roster) => {
            for (receiver, proposer) in roster.label_pairs(&outcome.matching) {
                println!("{} is matched with {}", receiver, proposer);
            }
        }
        None if prefs.size() <= 50 => {
            for (proposer, receiver) in outcome.matching.pairs() {
                println!("{} is matched with {}", proposer, receiver);
            }
        }
        None => println!("({} pairs, not listed)", prefs.size()),
    }

    let receipt = outcome.receipt();
    println!();
    println!("  Agents per side:   {:>12}", receipt.size);
    println!("  Proposals:         {:>12}", receipt.proposals);
    println!("  Displacements:     {:>12}", receipt.displacements);
    println!("  Rejections:        {:>12}", receipt.rejections);
    println!("  Elapsed time:      {:>12.2?}", elapsed);
    println!("  Digest:            {}", receipt.digest_hex());

    info!(
        n = receipt.size,
        proposals = receipt.proposals,
        elapsed_us = elapsed.as_micros() as u64,
        "run complete"
    );

    Ok(())
}

fn print_preferences(prefs: &PreferenceTable, roster: Option<&Roster>) {
    let proposer = |p: ProposerId| match roster.and_then(|r| r.proposer_name(p)) {
        Some(name) => name.to_owned(),
        None => p.to_string(),
    };
    let receiver = |r: ReceiverId| match roster.and_then(|ro| ro.receiver_name(r)) {
        Some(name) => name.to_owned(),
        None => r.to_string(),
    };

    println!("----- PROPOSER PREFERENCES -----");
    for p in (0..prefs.size()).map(ProposerId) {
        let list: Vec<_> = prefs.proposer_list(p).map(receiver).collect();
        println!("{}: {}", proposer(p), list.join(", "));
    }

    println!("----- RECEIVER PREFERENCES -----");
    for r in (0..prefs.size()).map(ReceiverId) {
        let list: Vec<_> = prefs.receiver_list(r).map(proposer).collect();
        println!("{}: {}", receiver(r), list.join(", "));
    }
    println!();
}
