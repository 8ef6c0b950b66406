//! # minuteid
//!
//! Compact, chronologically sortable 40-bit identifiers.
//!
//! An [`Identifier`] packs three fields, most significant first:
//!
//! ```text
//!  Bit Index:  39         25 24            14 13                0
//!              +------------+----------------+------------------+
//!  Field:      | days (15)  | minute (11)    | discriminator(14)|
//!              +------------+----------------+------------------+
//! ```
//!
//! - `days`: whole days since 2020-01-01T00:00:00Z (valid until 2109-09-18)
//! - `minute`: minute of the UTC day, seconds truncated
//! - `discriminator`: separates identifiers of the same minute
//!
//! Identifiers render as eight Crockford Base32 characters (e.g.
//! `1MVEH16J`), decoded case-insensitively with `I`/`L` read as `1` and `O`
//! as `0`.
//!
//! ## Discriminator strategies
//!
//! - [`MonotonicCounter`]: gap-free, strictly increasing within a minute and
//!   unique among users of one counter; fails after 16384 IDs in a minute
//! - [`RandomSource`]: 14 random bits from an [`EntropySource`], no
//!   coordination, probabilistic uniqueness
//!
//! ```
//! use minuteid::{Generator, Identifier, MonotonicCounter, SystemClock};
//!
//! let generator = Generator::new(SystemClock, MonotonicCounter::new());
//! let id = generator.generate().unwrap();
//!
//! let parsed: Identifier = id.to_string().parse().unwrap();
//! assert_eq!(parsed, id);
//! ```
//!
//! ## Crate features
//!
//! - `parking-lot`: use `parking_lot::Mutex` for the counter (no poisoning)
//! - `tracing`: emit spans and events from generation paths
//! - `serde`: `#[serde(with = ...)]` adapters and [`Strategy`] (de)serialization
#![cfg_attr(docsrs, feature(doc_cfg))]

mod base32;
mod error;
mod generator;
mod id;
mod rand;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub mod serde;
mod time;

pub use crate::base32::*;
pub use crate::error::*;
pub use crate::generator::{
    AnySource, DiscriminatorSource, Generator, MonotonicCounter, ParseStrategyError,
    RandomSource, Strategy,
};
pub use crate::id::*;
pub use crate::rand::*;
pub use crate::time::*;
