use crate::error::ConfigError;
use std::fmt;
use std::num::{NonZeroU32, NonZeroUsize};
use std::str::FromStr;
use std::time::Duration;

/// Which strategies to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// `seq`: fill/drain on the calling thread.
    Sequential,
    /// `par`: one producer thread and one consumer thread.
    Parallel,
    /// `both`: sequential first, then parallel, then the difference.
    Both,
}

impl Mode {
    /// Whether the sequential strategy runs in this mode.
    pub fn runs_sequential(self) -> bool {
        matches!(self, Mode::Sequential | Mode::Both)
    }

    /// Whether the parallel strategy runs in this mode.
    pub fn runs_parallel(self) -> bool {
        matches!(self, Mode::Parallel | Mode::Both)
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seq" => Ok(Mode::Sequential),
            "par" => Ok(Mode::Parallel),
            "both" => Ok(Mode::Both),
            other => Err(ConfigError::InvalidMode(other.to_owned())),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Sequential => "seq",
            Mode::Parallel => "par",
            Mode::Both => "both",
        })
    }
}

/// Parameters of one session. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    mode: Mode,
    capacity: NonZeroUsize,
    item_count: NonZeroU32,
    producer_delay: Duration,
    consumer_delay: Duration,
}

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(3) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_ITEM_COUNT: NonZeroU32 = match NonZeroU32::new(12) {
    Some(n) => n,
    None => unreachable!(),
};
const DEFAULT_PRODUCER_MS: u64 = 120;
const DEFAULT_CONSUMER_MS: u64 = 150;

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Both,
            capacity: DEFAULT_CAPACITY,
            item_count: DEFAULT_ITEM_COUNT,
            producer_delay: Duration::from_millis(DEFAULT_PRODUCER_MS),
            consumer_delay: Duration::from_millis(DEFAULT_CONSUMER_MS),
        }
    }
}

impl Config {
    /// Builds a config, rejecting a zero capacity or item count.
    pub fn new(
        mode: Mode,
        capacity: usize,
        item_count: u32,
        producer_ms: u64,
        consumer_ms: u64,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            mode,
            capacity: NonZeroUsize::new(capacity).ok_or(ConfigError::Zero("capacity"))?,
            item_count: NonZeroU32::new(item_count).ok_or(ConfigError::Zero("item count"))?,
            producer_delay: Duration::from_millis(producer_ms),
            consumer_delay: Duration::from_millis(consumer_ms),
        })
    }

    /// Builds a config from positional arguments (program name excluded):
    /// `[mode] [capacity] [item_count] [producer_ms] [consumer_ms]`.
    ///
    /// Missing trailing arguments keep their defaults, extra ones are ignored.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let defaults = Self::default();
        let mut args = args.into_iter();
        let mut next = || args.next();

        let mode = match next() {
            Some(s) => s.as_ref().parse::<Mode>()?,
            None => defaults.mode,
        };
        let capacity = parse_or(next(), "capacity", defaults.capacity.get())?;
        let item_count = parse_or(next(), "item count", defaults.item_count.get())?;
        let producer_ms = parse_or(next(), "producer delay", millis(defaults.producer_delay))?;
        let consumer_ms = parse_or(next(), "consumer delay", millis(defaults.consumer_delay))?;

        Self::new(mode, capacity, item_count, producer_ms, consumer_ms)
    }

    /// Which strategies to run.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Buffer capacity.
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
    }

    /// Number of items produced, numbered `1..=item_count`.
    pub fn item_count(&self) -> u32 {
        self.item_count.get()
    }

    /// Simulated work after each production.
    pub fn producer_delay(&self) -> Duration {
        self.producer_delay
    }

    /// Simulated work after each consumption.
    pub fn consumer_delay(&self) -> Duration {
        self.consumer_delay
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mode={} | capacity={} | items={} | P={}ms | C={}ms",
            self.mode,
            self.capacity,
            self.item_count,
            millis(self.producer_delay),
            millis(self.consumer_delay),
        )
    }
}

fn parse_or<S, T>(arg: Option<S>, name: &'static str, default: T) -> Result<T, ConfigError>
where
    S: AsRef<str>,
    T: FromStr<Err = std::num::ParseIntError>,
{
    match arg {
        None => Ok(default),
        Some(s) => s
            .as_ref()
            .trim()
            .parse()
            .map_err(|source| ConfigError::InvalidNumber {
                name,
                value: s.as_ref().to_owned(),
                source,
            }),
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
