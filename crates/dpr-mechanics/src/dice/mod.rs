//! Dice notation and expected values.
//!
//! Expressions take the form `NdM`, `NdM+K` or `NdM-K`. Nothing is ever
//! rolled: every expression is reduced to its expected value. Malformed
//! input is not an error, it simply evaluates to zero so that a half-typed
//! field never breaks a calculation.

pub mod threat;

pub use threat::{ThreatRange, range_size};

use serde::{Deserialize, Serialize};

/// A polyhedral die type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Die {
    /// Four-sided die.
    D4,
    /// Six-sided die.
    D6,
    /// Eight-sided die.
    D8,
    /// Ten-sided die.
    D10,
    /// Twelve-sided die.
    D12,
    /// Twenty-sided die.
    D20,
    /// Percentile die (1-100).
    D100,
    /// A die with a custom number of sides.
    Custom(u32),
}

impl Die {
    /// Returns the die with the given number of sides, or `None` for zero.
    pub fn from_sides(sides: u32) -> Option<Self> {
        match sides {
            0 => None,
            4 => Some(Self::D4),
            6 => Some(Self::D6),
            8 => Some(Self::D8),
            10 => Some(Self::D10),
            12 => Some(Self::D12),
            20 => Some(Self::D20),
            100 => Some(Self::D100),
            n => Some(Self::Custom(n)),
        }
    }

    /// Returns the number of sides on this die.
    pub fn sides(self) -> u32 {
        match self {
            Self::D4 => 4,
            Self::D6 => 6,
            Self::D8 => 8,
            Self::D10 => 10,
            Self::D12 => 12,
            Self::D20 => 20,
            Self::D100 => 100,
            Self::Custom(n) => n,
        }
    }

    /// Expected value of a single roll: `(sides + 1) / 2`.
    pub fn average(self) -> f64 {
        (f64::from(self.sides()) + 1.0) / 2.0
    }
}

impl std::fmt::Display for Die {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "d{}", self.sides())
    }
}

/// A parsed `NdM[+K]` expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// Number of dice rolled.
    pub count: u32,
    /// The die rolled.
    pub die: Die,
    /// Flat modifier added to the sum.
    pub modifier: i64,
}

impl DiceExpr {
    /// Parse an expression such as `"2d6+3"`, `"d20"` or `"4d8-1"`.
    ///
    /// Whitespace is ignored and the `d` is case-insensitive. Returns `None`
    /// when the text is not dice notation or when the count or face count
    /// is zero.
    pub fn parse(expr: &str) -> Option<Self> {
        let compact: String = expr
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let (count, rest) = compact.split_once('d')?;

        let count = if count.is_empty() {
            1
        } else {
            count.parse::<u32>().ok()?
        };

        let (faces, modifier) = match rest.find(['+', '-']) {
            Some(at) => (&rest[..at], rest[at..].parse::<i64>().ok()?),
            None => (rest, 0),
        };
        let faces = faces.parse::<u32>().ok()?;

        if count == 0 {
            return None;
        }
        Some(Self {
            count,
            die: Die::from_sides(faces)?,
            modifier,
        })
    }

    /// Expected value: `count * (faces + 1) / 2 + modifier`.
    pub fn average(&self) -> f64 {
        f64::from(self.count) * self.die.average() + self.modifier as f64
    }
}

impl std::fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.count, self.die)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}

/// Expected value of a dice expression or plain number.
///
/// Text containing a `d` is read as dice notation; anything else is read as
/// a plain number. Unparseable or non-finite input yields `0.0`.
pub fn evaluate(expr: &str) -> f64 {
    let trimmed = expr.trim();
    if trimmed.contains(['d', 'D']) {
        DiceExpr::parse(trimmed).map_or(0.0, |dice| dice.average())
    } else {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}
