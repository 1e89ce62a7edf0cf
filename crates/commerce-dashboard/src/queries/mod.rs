//! Query functions, one per dashboard question.
//!
//! Every query is a pure function of the loaded [`Dataset`](crate::loader::Dataset)
//! and one bounded parameter. Results are recomputed on each call; nothing
//! is cached here.
//!
//! Ranked queries sort by count descending and break ties by key ascending,
//! so repeated calls return identical results.

mod geography;
mod hourly;
mod products;

pub use geography::{top_customer_cities, top_seller_cities};
pub use hourly::hourly_transactions;
pub use products::{UNCATEGORIZED, top_categories, top_products};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::config::{HOURS_PER_DAY, TOP_N_DEFAULT, TOP_N_MAX, TOP_N_MIN};
use crate::error::{DashboardError, Result};

// ============================================================================
// Parameters
// ============================================================================

/// A top-N slider value, always within `[TOP_N_MIN, TOP_N_MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct TopN(usize);

impl TopN {
    pub fn new(n: usize) -> Result<Self> {
        if (TOP_N_MIN..=TOP_N_MAX).contains(&n) {
            Ok(Self(n))
        } else {
            Err(DashboardError::InvalidParameter(format!(
                "top-N must be between {} and {}, got {}",
                TOP_N_MIN, TOP_N_MAX, n
            )))
        }
    }

    /// Clamp any value into range.
    pub fn clamped(n: usize) -> Self {
        Self(n.clamp(TOP_N_MIN, TOP_N_MAX))
    }

    pub fn get(self) -> usize {
        self.0
    }

    pub fn increment(self) -> Self {
        Self::clamped(self.0 + 1)
    }

    pub fn decrement(self) -> Self {
        Self::clamped(self.0.saturating_sub(1))
    }
}

impl Default for TopN {
    fn default() -> Self {
        Self(TOP_N_DEFAULT)
    }
}

impl TryFrom<usize> for TopN {
    type Error = DashboardError;

    fn try_from(n: usize) -> Result<Self> {
        Self::new(n)
    }
}

impl From<TopN> for usize {
    fn from(n: TopN) -> usize {
        n.0
    }
}

impl fmt::Display for TopN {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subset of the hours 0..=23, stored as a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct HourSelection(u32);

impl HourSelection {
    const FULL: u32 = (1 << HOURS_PER_DAY) - 1;

    /// Every hour selected.
    pub fn all() -> Self {
        Self(Self::FULL)
    }

    pub fn none() -> Self {
        Self(0)
    }

    pub fn new(hours: impl IntoIterator<Item = u8>) -> Result<Self> {
        let mut mask = 0;
        for hour in hours {
            if hour >= HOURS_PER_DAY {
                return Err(DashboardError::InvalidParameter(format!(
                    "hour must be between 0 and 23, got {}",
                    hour
                )));
            }
            mask |= 1 << hour;
        }
        Ok(Self(mask))
    }

    pub fn contains(self, hour: u8) -> bool {
        hour < HOURS_PER_DAY && self.0 & (1 << hour) != 0
    }

    /// Flip one hour; out-of-range hours are ignored.
    pub fn toggle(&mut self, hour: u8) {
        if hour < HOURS_PER_DAY {
            self.0 ^= 1 << hour;
        }
    }

    /// Selected hours in ascending order.
    pub fn hours(self) -> Vec<u8> {
        (0..HOURS_PER_DAY).filter(|&h| self.contains(h)).collect()
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn is_all(self) -> bool {
        self.0 == Self::FULL
    }
}

impl Default for HourSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl TryFrom<Vec<u8>> for HourSelection {
    type Error = DashboardError;

    fn try_from(hours: Vec<u8>) -> Result<Self> {
        Self::new(hours)
    }
}

impl From<HourSelection> for Vec<u8> {
    fn from(selection: HourSelection) -> Vec<u8> {
        selection.hours()
    }
}

impl fmt::Display for HourSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_all() {
            return f.write_str("all hours");
        }
        let hours: Vec<String> = self.hours().iter().map(|h| format!("{:02}", h)).collect();
        write!(f, "{}", hours.join(", "))
    }
}

// ============================================================================
// Shared helpers
// ============================================================================

/// Count occurrences of each non-null key.
pub(crate) fn count_keys<'a>(
    keys: impl Iterator<Item = Option<&'a str>>,
) -> HashMap<&'a str, usize> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for key in keys.flatten() {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Sort counts descending (ties by key ascending) and keep the first `n`.
pub(crate) fn rank_top_n<'a>(counts: HashMap<&'a str, usize>, n: TopN) -> Vec<(&'a str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries.truncate(n.get());
    entries
}
