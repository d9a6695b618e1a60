use crate::journal::Journal;
use crate::outcome::Outcome;
use crate::sync::Arc;
use crate::thread::{join, spawn};
use crate::Config;
use std::time::Instant;
use tracing::info;

mod exchange;
use exchange::Exchange;

/// Runs the parallel strategy: one producer thread and one consumer thread
/// sharing a fresh bounded buffer. Returns once both threads have finished.
///
/// The journal is always a std `Arc`; only the exchange itself is modelled under loom.
pub fn run(config: &Config, journal: std::sync::Arc<dyn Journal>) -> Outcome {
    let start = Instant::now();
    info!(%config, "parallel run started");

    let exchange = Arc::new(Exchange::new(config.capacity()));

    let producer = {
        let exchange = exchange.clone();
        let journal = journal.clone();
        let config = *config;
        spawn(move || exchange.produce(&config, &*journal))
    };
    let consumer = {
        let exchange = exchange.clone();
        let config = *config;
        spawn(move || exchange.consume(&config, &*journal))
    };

    let produced = join(producer);
    let consumed = join(consumer);

    let outcome = Outcome {
        consumed,
        produced,
        peak_fill: exchange.peak_fill(),
        elapsed: start.elapsed(),
    };
    info!(elapsed_ms = outcome.elapsed_ms() as u64, "parallel run finished");
    outcome
}
