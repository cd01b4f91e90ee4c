//! Input array generation
//!
//! Builds the initial array handed to the engine: the values `1..=n` arranged
//! according to a [`Distribution`]. The engine itself never calls this; it is
//! the data-preparation side of a run.

use crate::error::{Result, SortError};
use crate::rng::DetRng;
use crate::step::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of the initial array.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    #[default]
    Random,
    Ascending,
    Descending,
    /// Ascending first half, reversed second half.
    SplitAscending,
    /// Reversed first half, ascending second half.
    SplitDescending,
}

impl Distribution {
    pub const ALL: [Distribution; 5] = [
        Distribution::Random,
        Distribution::Ascending,
        Distribution::Descending,
        Distribution::SplitAscending,
        Distribution::SplitDescending,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Distribution::Random => "random",
            Distribution::Ascending => "ascending",
            Distribution::Descending => "descending",
            Distribution::SplitAscending => "split-ascending",
            Distribution::SplitDescending => "split-descending",
        }
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Distribution {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        Distribution::ALL
            .into_iter()
            .find(|d| d.as_str() == s)
            .ok_or_else(|| SortError::UnknownDistribution { tag: s.to_string() })
    }
}

/// Generate `n` values `1..=n` shaped by `distribution`.
///
/// Only [`Distribution::Random`] draws from `rng`.
pub fn generate(n: usize, distribution: Distribution, rng: &mut DetRng) -> Vec<Value> {
    let mut values: Vec<Value> = (1..).take(n).collect();
    let mid = n / 2;

    match distribution {
        Distribution::Random => {
            for i in (1..n).rev() {
                let j = rng.index_upto(i);
                values.swap(i, j);
            }
        }
        Distribution::Ascending => {}
        Distribution::Descending => values.reverse(),
        Distribution::SplitAscending => values[mid..].reverse(),
        Distribution::SplitDescending => values[..mid].reverse(),
    }

    values
}
