#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

// loom integration
#[doc(hidden)]
macro_rules! cfg_loom {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "loom")]
            $item
        )*
    };
}
#[doc(hidden)]
macro_rules! cfg_not_loom {
    ($($item:item)*) => {
        $(
            #[cfg(not(feature = "loom"))]
            $item
        )*
    };
}

#[doc(hidden)]
mod sync;
#[doc(hidden)]
mod thread;
//loom integration finished.

mod buffer;
mod config;
mod error;
mod outcome;

pub mod compare;
pub mod journal;
/// The two-thread strategy.
pub mod parallel;
pub mod sequential;

pub use buffer::BoundedBuffer;
pub use config::{Config, Mode};
pub use error::{ConfigError, Full};
pub use outcome::Outcome;

/// A produced item. Items are numbered from 1.
pub type Item = u32;
