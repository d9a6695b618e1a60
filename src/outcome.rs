use crate::Item;
use std::time::Duration;

/// What one strategy run did, and how long it took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Items in the order the consumer removed them.
    pub consumed: Vec<Item>,
    /// Number of items the producer appended.
    pub produced: u32,
    /// Highest buffer fill level reached during the run.
    pub peak_fill: usize,
    /// Wall-clock time from start to the last actor finishing.
    pub elapsed: Duration,
}

impl Outcome {
    /// `elapsed` in whole milliseconds.
    pub fn elapsed_ms(&self) -> u128 {
        self.elapsed.as_millis()
    }
}
