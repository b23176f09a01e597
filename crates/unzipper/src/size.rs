//! Human-readable archive sizes and the size gate.
//!
//! Byte counts are converted to the largest unit that keeps the magnitude at
//! or above one, rounded to two decimals, and compared against a configured
//! [`SizeLimit`] by unit rank first and magnitude second.

use crate::error::ExtractError;
use std::fmt;
use std::str::FromStr;

/// Byte-size units in rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl SizeUnit {
    /// All units, smallest first.
    pub const ALL: [SizeUnit; 6] = [
        SizeUnit::B,
        SizeUnit::KB,
        SizeUnit::MB,
        SizeUnit::GB,
        SizeUnit::TB,
        SizeUnit::PB,
    ];

    /// Position of the unit in `B < KB < MB < GB < TB < PB`.
    pub fn rank(self) -> usize {
        self as usize
    }

    /// Suffix as written in limits and formatted sizes, e.g. `"KB"`.
    pub fn suffix(self) -> &'static str {
        match self {
            SizeUnit::B => "B",
            SizeUnit::KB => "KB",
            SizeUnit::MB => "MB",
            SizeUnit::GB => "GB",
            SizeUnit::TB => "TB",
            SizeUnit::PB => "PB",
        }
    }
}

impl fmt::Display for SizeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for SizeUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_ascii_uppercase();
        SizeUnit::ALL
            .into_iter()
            .find(|unit| unit.suffix() == upper)
            .ok_or(())
    }
}

/// A magnitude paired with a unit, e.g. `1.5 KB`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HumanSize {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl HumanSize {
    /// Converts a byte count by dividing by `base` while the value is at least
    /// `base` and a larger unit remains. The magnitude is rounded to two
    /// decimal places.
    pub fn from_bytes(bytes: u64, base: u64) -> Self {
        let base = base as f64;
        let mut value = bytes as f64;
        let mut rank = 0;

        while value >= base && rank < SizeUnit::ALL.len() - 1 {
            value /= base;
            rank += 1;
        }

        Self {
            magnitude: (value * 100.0).round() / 100.0,
            unit: SizeUnit::ALL[rank],
        }
    }
}

impl fmt::Display for HumanSize {
    /// Two decimals with trailing zeros and a trailing point stripped.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fixed = format!("{:.2}", self.magnitude);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        write!(f, "{} {}", trimmed, self.unit)
    }
}

/// Maximum archive size, parsed from `"<number> <unit>"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeLimit {
    pub magnitude: f64,
    pub unit: SizeUnit,
}

impl SizeLimit {
    /// Whether a file of `size` passes this limit.
    ///
    /// A larger unit rank always fails and a smaller one always passes; equal
    /// ranks compare the rounded magnitudes.
    pub fn permits(&self, size: &HumanSize) -> bool {
        match size.unit.rank().cmp(&self.unit.rank()) {
            std::cmp::Ordering::Greater => false,
            std::cmp::Ordering::Less => true,
            std::cmp::Ordering::Equal => size.magnitude <= self.magnitude,
        }
    }
}

impl FromStr for SizeLimit {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ExtractError::SizeLimitFormat(s.to_string());

        let mut tokens = s.split_whitespace();
        let (Some(number), Some(suffix), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(format_error());
        };

        let magnitude: f64 = number.parse().map_err(|_| format_error())?;
        if !magnitude.is_finite() || magnitude < 0.0 {
            return Err(format_error());
        }
        let unit: SizeUnit = suffix.parse().map_err(|_| format_error())?;

        Ok(Self { magnitude, unit })
    }
}

impl fmt::Display for SizeLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// Size gate: `true` when no limit is configured or the archive fits.
pub fn size_check(file_size: u64, limit: Option<&SizeLimit>, base: u64) -> bool {
    match limit {
        None => true,
        Some(limit) => limit.permits(&HumanSize::from_bytes(file_size, base)),
    }
}
