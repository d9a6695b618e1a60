use std::fmt;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors produced while building a [`Config`](crate::Config).
///
/// All of them are fatal: the binary reports them on stderr and exits
/// with status 1 before any item is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The mode argument wasn't one of `seq`, `par` or `both`.
    #[error("invalid mode `{0}`, expected one of: seq | par | both")]
    InvalidMode(String),

    /// A numeric argument couldn't be parsed.
    #[error("invalid value `{value}` for {name}: {source}")]
    InvalidNumber {
        /// The parameter being parsed.
        name: &'static str,
        /// The raw argument.
        value: String,
        /// Why parsing failed.
        #[source]
        source: ParseIntError,
    },

    /// Capacity or item count was zero.
    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

/// Returned by [`BoundedBuffer::try_push`](crate::BoundedBuffer::try_push)
/// when the buffer is already at capacity.
///
/// Contains the item that didn't fit.
#[derive(Error, PartialEq, Eq, Clone, Copy)]
#[error("pushing to a full buffer")]
pub struct Full<T>(pub T);

impl<T> fmt::Debug for Full<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Full(..)")
    }
}
