use crate::buffer::BoundedBuffer;
use crate::journal::{Event, Journal, Record, Role, Strategy};
use crate::sync::{unpoison, Condvar, Mutex, MutexGuard};
use crate::thread::pause;
use crate::{Config, Item};
use std::num::NonZeroUsize;
use tracing::debug;

/// Everything the producer and the consumer share for one run.
///
/// Created before the threads are spawned and dropped after both are joined,
/// so no state survives from one run to the next.
pub(crate) struct Exchange {
    state: Mutex<State>,
    /// Notified after every removal.
    space_available: Condvar,
    /// Notified after every insertion, and broadcast once production is done.
    item_available: Condvar,
}

/// Guarded by `Exchange::state`.
struct State {
    buffer: BoundedBuffer,
    /// Set once, by the producer, after its last insertion.
    done: bool,
}

impl Exchange {
    pub(crate) fn new(capacity: NonZeroUsize) -> Self {
        Self {
            state: Mutex::new(State {
                buffer: BoundedBuffer::new(capacity),
                done: false,
            }),
            space_available: Condvar::new(),
            item_available: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        unpoison(self.state.lock())
    }

    pub(crate) fn peak_fill(&self) -> usize {
        self.lock().buffer.high_water()
    }

    /// Producer side: inserts `1..=item_count`, blocking while the buffer is
    /// full, then raises the completion flag. Returns the number of items produced.
    pub(crate) fn produce(&self, config: &Config, journal: &dyn Journal) -> u32 {
        let log = Logger::new(Role::Producer, journal);
        log.bare(Event::Started, config);

        let mut produced = 0;
        for item in 1..=config.item_count() {
            let mut state = self.lock();
            loop {
                match state.buffer.try_push(item) {
                    Ok(()) => break,
                    Err(_) => {
                        log.at(&state, Event::WaitingForSpace);
                        debug!(item, "producer waiting for space");
                        state = unpoison(self.space_available.wait(state));
                    }
                }
            }
            log.at(&state, Event::Produced(item));
            produced += 1;
            drop(state);
            self.item_available.notify_one();

            pause(config.producer_delay());
        }

        self.lock().done = true;
        // The consumer may be parked on an empty buffer with nothing else coming.
        self.item_available.notify_all();

        log.bare(Event::Stopped, config);
        produced
    }

    /// Consumer side: removes items in FIFO order until the buffer is empty
    /// and the completion flag is set. Returns the items in the order removed.
    pub(crate) fn consume(&self, config: &Config, journal: &dyn Journal) -> Vec<Item> {
        let log = Logger::new(Role::Consumer, journal);
        log.bare(Event::Started, config);
        let mut consumed = Vec::with_capacity(config.item_count() as usize);

        loop {
            let mut state = self.lock();
            let item = loop {
                if let Some(item) = state.buffer.try_pop() {
                    break item;
                }
                // Checked under the same lock as the emptiness test above.
                if state.done {
                    let total = consumed.len() as u32;
                    log.at(&state, Event::ProductionFinished { total });
                    drop(state);
                    log.bare(Event::Stopped, config);
                    return consumed;
                }
                log.at(&state, Event::WaitingForItem);
                debug!(consumed = consumed.len(), "consumer waiting for an item");
                state = unpoison(self.item_available.wait(state));
            };
            log.at(&state, Event::Consumed(item));
            drop(state);
            self.space_available.notify_one();

            consumed.push(item);
            pause(config.consumer_delay());
        }
    }
}

struct Logger<'a> {
    role: Role,
    journal: &'a dyn Journal,
}

impl<'a> Logger<'a> {
    fn new(role: Role, journal: &'a dyn Journal) -> Self {
        Self { role, journal }
    }

    /// Records with the fill level read from the locked state.
    fn at(&self, state: &State, event: Event) {
        self.journal.record(Record {
            role: self.role,
            strategy: Strategy::Parallel,
            event,
            fill: state.buffer.len(),
            capacity: state.buffer.capacity(),
        });
    }

    /// Records thread lifecycle events, which carry no meaningful fill level.
    fn bare(&self, event: Event, config: &Config) {
        self.journal.record(Record {
            role: self.role,
            strategy: Strategy::Parallel,
            event,
            fill: 0,
            capacity: config.capacity().get(),
        });
    }
}
