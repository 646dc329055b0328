//! Cost value and its `"<N> dollars"` wire codec.
//!
//! At rest a cost is a plain integer column. Only the JSON boundary uses the
//! textual form, e.g. `"25000 dollars"`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// The only unit accepted in the text form.
pub const COST_UNIT: &str = "dollars";

/// Raised when a cost fails to decode from its wire form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cost format")]
pub struct CostError;

/// A whole number of currency units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cost(i32);

impl Cost {
    pub const fn new(units: i32) -> Self {
        Self(units)
    }

    /// Raw integer value, as stored in the database.
    pub const fn units(self) -> i32 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Encode as a quoted JSON string, e.g. `"\"120 dollars\""`.
    pub fn encode(self) -> String {
        quote(&self.to_string())
    }

    /// Decode from the quoted JSON string form.
    ///
    /// Unquoted input, whitespace around the quotes, a missing or misspelled
    /// unit, extra tokens and non-integer or overflowing amounts are all
    /// rejected.
    pub fn decode(wire: &str) -> Result<Self, CostError> {
        if wire.len() < 2 || !wire.starts_with('"') || !wire.ends_with('"') {
            return Err(CostError);
        }
        let text: String = serde_json::from_str(wire).map_err(|_| CostError)?;
        text.parse()
    }
}

fn quote(text: &str) -> String {
    // Serializing a plain `&str` cannot fail.
    serde_json::to_string(text).unwrap_or_else(|_| format!("\"{text}\""))
}

impl From<i32> for Cost {
    fn from(units: i32) -> Self {
        Self(units)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {COST_UNIT}", self.0)
    }
}

impl FromStr for Cost {
    type Err = CostError;

    /// Parse the unquoted text form `"<N> dollars"`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = text.split(' ').collect();
        let [amount, unit] = parts.as_slice() else {
            return Err(CostError);
        };
        if *unit != COST_UNIT {
            return Err(CostError);
        }
        amount.parse::<i32>().map(Self).map_err(|_| CostError)
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
