use crate::{DiscriminatorSource, MinuteStamp, MonotonicCounter, RandomSource, Result};
use core::{fmt, str::FromStr};
use std::sync::Arc;

/// Which discriminator strategy a [`Generator`] should use.
///
/// Parses case-insensitively from `"counter"` or `"random"`, so it can live in
/// a host application's configuration. With the `serde` feature it
/// (de)serializes as the same strings.
///
/// [`Generator`]: crate::Generator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Per-minute monotonic counter; see [`MonotonicCounter`].
    Counter,
    /// Uniform random draw from the thread-local CSPRNG; see
    /// [`RandomSource`].
    #[default]
    Random,
}

impl Strategy {
    /// Returns the configuration name of this strategy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "counter",
            Self::Random => "random",
        }
    }

    /// Builds a fresh source for this strategy.
    ///
    /// [`Strategy::Counter`] gets its own counter; clone the returned
    /// [`AnySource`] (or the generator holding it) to share that counter.
    #[must_use]
    pub fn build(self) -> AnySource {
        match self {
            Self::Counter => AnySource::Counter(Arc::new(MonotonicCounter::new())),
            Self::Random => AnySource::Random(RandomSource::default()),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error returned when a string names no known [`Strategy`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown discriminator strategy {name:?}, expected \"counter\" or \"random\"")]
pub struct ParseStrategyError {
    name: String,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.eq_ignore_ascii_case("counter") {
            Ok(Self::Counter)
        } else if name.eq_ignore_ascii_case("random") {
            Ok(Self::Random)
        } else {
            Err(ParseStrategyError { name: s.to_owned() })
        }
    }
}

/// A discriminator source chosen at runtime.
#[derive(Clone, Debug)]
pub enum AnySource {
    /// A shared monotonic counter.
    Counter(Arc<MonotonicCounter>),
    /// Random draws from the thread-local CSPRNG.
    Random(RandomSource),
}

impl AnySource {
    /// Returns the strategy this source implements.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        match self {
            Self::Counter(_) => Strategy::Counter,
            Self::Random(_) => Strategy::Random,
        }
    }
}

impl From<Strategy> for AnySource {
    fn from(strategy: Strategy) -> Self {
        strategy.build()
    }
}

impl DiscriminatorSource for AnySource {
    fn next_discriminator(&self, stamp: MinuteStamp) -> Result<u16> {
        match self {
            Self::Counter(counter) => counter.next_discriminator(stamp),
            Self::Random(random) => random.next_discriminator(stamp),
        }
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::Strategy;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Strategy {
        fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_str(self.as_str())
        }
    }

    impl<'de> Deserialize<'de> for Strategy {
        fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
            struct StrategyVisitor;

            impl serde::de::Visitor<'_> for StrategyVisitor {
                type Value = Strategy;

                fn expecting(&self, formatter: &mut core::fmt::Formatter) -> core::fmt::Result {
                    formatter.write_str("\"counter\" or \"random\"")
                }

                fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
                where
                    E: serde::de::Error,
                {
                    v.parse().map_err(serde::de::Error::custom)
                }
            }

            d.deserialize_str(StrategyVisitor)
        }
    }
}
