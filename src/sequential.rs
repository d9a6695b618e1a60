//! Single-threaded baseline: fill the buffer, drain it, repeat.
use crate::buffer::BoundedBuffer;
use crate::journal::{Event, Journal, Record, Role, Strategy};
use crate::outcome::Outcome;
use crate::thread::pause;
use crate::Config;
use std::time::Instant;
use tracing::info;

/// Runs the sequential strategy on the calling thread.
///
/// Every inserted item costs `producer_delay` and every removed item costs
/// `consumer_delay`; nothing overlaps.
pub fn run(config: &Config, journal: &dyn Journal) -> Outcome {
    let start = Instant::now();
    info!(%config, "sequential run started");

    let mut buffer = BoundedBuffer::new(config.capacity());
    let mut consumed = Vec::with_capacity(config.item_count() as usize);
    let mut next = 1;
    let last = config.item_count();

    let record = |buffer: &BoundedBuffer, role, event| {
        journal.record(Record {
            role,
            strategy: Strategy::Sequential,
            event,
            fill: buffer.len(),
            capacity: buffer.capacity(),
        })
    };

    while next <= last || !buffer.is_empty() {
        // fill
        while next <= last && buffer.try_push(next).is_ok() {
            record(&buffer, Role::Producer, Event::Produced(next));
            next += 1;
            pause(config.producer_delay());
        }
        // drain
        while let Some(item) = buffer.try_pop() {
            record(&buffer, Role::Consumer, Event::Consumed(item));
            consumed.push(item);
            pause(config.consumer_delay());
        }
    }

    let total = consumed.len() as u32;
    record(&buffer, Role::Consumer, Event::ProductionFinished { total });

    let outcome = Outcome {
        consumed,
        produced: next - 1,
        peak_fill: buffer.high_water(),
        elapsed: start.elapsed(),
    };
    info!(elapsed_ms = outcome.elapsed_ms() as u64, "sequential run finished");
    outcome
}
