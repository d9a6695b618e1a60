//! Event log shared by both strategies.
//!
//! Runners describe what happened through a [`Journal`]; the binary prints
//! it with [`Console`], tests inspect it with [`Recorder`].
use crate::Item;
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Which side of the exchange an event comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Inserts items.
    Producer,
    /// Removes items.
    Consumer,
}

/// Which strategy produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Fill/drain on one thread.
    Sequential,
    /// Producer and consumer threads.
    Parallel,
}

/// Something that happened to the buffer or to one of the actors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The actor's thread started.
    Started,
    /// An item was appended.
    Produced(Item),
    /// The producer is about to wait for space.
    WaitingForSpace,
    /// An item was removed from the front.
    Consumed(Item),
    /// The consumer is about to wait for an item or the end of production.
    WaitingForItem,
    /// The consumer saw an empty buffer after production ended.
    ProductionFinished {
        /// Items consumed by this consumer.
        total: u32,
    },
    /// The actor's thread is about to exit.
    Stopped,
}

/// One journal entry: who, what, and the buffer fill level at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    /// Who recorded it.
    pub role: Role,
    /// Which run it belongs to.
    pub strategy: Strategy,
    /// What happened.
    pub event: Event,
    /// Buffer length when the event happened.
    pub fill: usize,
    /// Buffer capacity.
    pub capacity: usize,
}

impl Record {
    /// The fixed-width actor tag, e.g. `[Consumer-SEQ]`.
    pub fn tag(&self) -> &'static str {
        match (self.role, self.strategy) {
            (Role::Producer, Strategy::Parallel) => "[Producer]",
            (Role::Consumer, Strategy::Parallel) => "[Consumer]",
            (Role::Producer, Strategy::Sequential) => "[Producer-SEQ]",
            (Role::Consumer, Strategy::Sequential) => "[Consumer-SEQ]",
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Event::Started => f.write_str("thread started."),
            Event::Produced(item) => write!(f, "Produced item {item}"),
            Event::WaitingForSpace => f.write_str("Buffer full, waiting..."),
            Event::Consumed(item) => write!(f, "Consumed item {item}"),
            Event::WaitingForItem => f.write_str("Buffer empty, waiting..."),
            Event::ProductionFinished { total } => write!(f, "Production finished, total={total}"),
            Event::Stopped => f.write_str("thread finished."),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.event {
            Event::Started | Event::Stopped => {
                let who = match self.role {
                    Role::Producer => "producer",
                    Role::Consumer => "consumer",
                };
                write!(f, "[INFO] {who} {}", self.event)
            }
            _ => write!(
                f,
                "{:<18} | {:<28} | buffer={:<2}/{}",
                self.tag(),
                self.event.to_string(),
                self.fill,
                self.capacity
            ),
        }
    }
}

/// Sink for [`Record`]s.
///
/// The parallel runner records while holding the exchange lock, so
/// implementations must not block on anything the runners hold.
pub trait Journal: Send + Sync {
    /// Stores or prints one record.
    fn record(&self, record: Record);
}

/// Prints every record as one line on stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct Console;

impl Journal for Console {
    fn record(&self, record: Record) {
        println!("{record}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Journal for Silent {
    fn record(&self, _: Record) {}
}

/// Keeps every record in memory, in the order they were made.
#[derive(Debug, Default)]
pub struct Recorder {
    records: Mutex<Vec<Record>>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of everything recorded so far.
    pub fn records(&self) -> Vec<Record> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Items consumed by `strategy`, in consumption order.
    pub fn consumed(&self, strategy: Strategy) -> Vec<Item> {
        self.filter_items(strategy, |e| match e {
            Event::Consumed(item) => Some(item),
            _ => None,
        })
    }

    /// Items produced by `strategy`, in production order.
    pub fn produced(&self, strategy: Strategy) -> Vec<Item> {
        self.filter_items(strategy, |e| match e {
            Event::Produced(item) => Some(item),
            _ => None,
        })
    }

    /// The largest fill level any record of `strategy` reported.
    pub fn max_fill(&self, strategy: Strategy) -> usize {
        self.records()
            .iter()
            .filter(|r| r.strategy == strategy)
            .map(|r| r.fill)
            .max()
            .unwrap_or(0)
    }

    fn filter_items(&self, strategy: Strategy, f: impl Fn(Event) -> Option<Item>) -> Vec<Item> {
        self.records()
            .iter()
            .filter(|r| r.strategy == strategy)
            .filter_map(|r| f(r.event))
            .collect()
    }
}

impl Journal for Recorder {
    fn record(&self, record: Record) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(role: Role, strategy: Strategy, event: Event, fill: usize) -> Record {
        Record {
            role,
            strategy,
            event,
            fill,
            capacity: 3,
        }
    }

    #[test]
    fn line_layout() {
        let line = rec(Role::Producer, Strategy::Parallel, Event::Produced(4), 2).to_string();
        assert_eq!(
            line,
            format!("{:<18} | {:<28} | buffer=2 /3", "[Producer]", "Produced item 4")
        );
        let line = rec(Role::Consumer, Strategy::Sequential, Event::WaitingForItem, 0).to_string();
        assert!(line.starts_with("[Consumer-SEQ]     | Buffer empty, waiting..."));
    }

    #[test]
    fn info_lines() {
        let line = rec(Role::Consumer, Strategy::Parallel, Event::Started, 0).to_string();
        assert_eq!(line, "[INFO] consumer thread started.");
        let line = rec(Role::Producer, Strategy::Parallel, Event::Stopped, 0).to_string();
        assert_eq!(line, "[INFO] producer thread finished.");
    }

    #[test]
    fn recorder_filters_by_strategy() {
        let r = Recorder::new();
        r.record(rec(Role::Producer, Strategy::Sequential, Event::Produced(1), 1));
        r.record(rec(Role::Consumer, Strategy::Sequential, Event::Consumed(1), 0));
        r.record(rec(Role::Producer, Strategy::Parallel, Event::Produced(1), 1));
        r.record(rec(Role::Producer, Strategy::Parallel, Event::Produced(2), 2));

        assert_eq!(r.consumed(Strategy::Sequential), vec![1]);
        assert!(r.consumed(Strategy::Parallel).is_empty());
        assert_eq!(r.produced(Strategy::Parallel), vec![1, 2]);
        assert_eq!(r.max_fill(Strategy::Parallel), 2);
        assert_eq!(r.records().len(), 4);
    }
}
