//! Critical threat ranges on the d20.

use serde::{Deserialize, Serialize};

/// The inclusive band of d20 rolls that threaten a critical hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatRange {
    /// Lowest threatening roll.
    pub low: u32,
    /// Highest threatening roll.
    pub high: u32,
}

impl Default for ThreatRange {
    /// A natural 20 only.
    fn default() -> Self {
        Self { low: 20, high: 20 }
    }
}

impl ThreatRange {
    /// Parse `"lo-hi"` (e.g. `"15-20"`) or a bare range size (e.g. `"5"`).
    ///
    /// A bare size `n` describes the top `n` faces. Bounds must satisfy
    /// `1 <= lo <= hi <= 20`; anything else yields `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.contains('-') {
            let (low, high) = text.split_once('-')?;
            let low = low.trim().parse::<u32>().ok()?;
            let high = high.trim().parse::<u32>().ok()?;
            if (1..=high).contains(&low) && high <= 20 {
                Some(Self { low, high })
            } else {
                None
            }
        } else {
            let size = text.parse::<u32>().ok()?;
            if (1..=20).contains(&size) {
                Some(Self {
                    low: 21 - size,
                    high: 20,
                })
            } else {
                None
            }
        }
    }

    /// Number of faces in the range.
    pub fn size(&self) -> u32 {
        self.high - self.low + 1
    }
}

impl std::fmt::Display for ThreatRange {
    /// Always `lo-hi`, so the output parses back to the same range.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

/// Size of a threat range, falling back to 1 when invalid.
pub fn range_size(text: &str) -> u32 {
    ThreatRange::parse(text).map_or(1, |range| range.size())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_ranges() {
        assert_eq!(range_size("15-20"), 6);
        assert_eq!(range_size("19-20"), 2);
        assert_eq!(range_size(" 17 - 20 "), 4);
        assert_eq!(range_size("1-20"), 20);
    }

    #[test]
    fn bare_sizes() {
        assert_eq!(range_size("5"), 5);
        assert_eq!(range_size("1"), 1);
        assert_eq!(range_size("20"), 20);
    }

    #[test]
    fn invalid_specs_default_to_one() {
        assert_eq!(range_size("20-15"), 1);
        assert_eq!(range_size("0-20"), 1);
        assert_eq!(range_size("15-21"), 1);
        assert_eq!(range_size("15-18-20"), 1);
        assert_eq!(range_size("-5"), 1);
        assert_eq!(range_size("0"), 1);
        assert_eq!(range_size("21"), 1);
        assert_eq!(range_size(""), 1);
        assert_eq!(range_size("keen"), 1);
    }

    #[test]
    fn trailing_text_is_rejected() {
        assert_eq!(range_size("15-20x"), 1);
        assert_eq!(range_size("5x"), 1);
        assert_eq!(range_size("19-20 keen"), 1);
    }

    #[test]
    fn bare_size_covers_top_faces() {
        let range = ThreatRange::parse("6").unwrap();
        assert_eq!(range, ThreatRange { low: 15, high: 20 });
        assert_eq!(range.to_string(), "15-20");
        assert_eq!(ThreatRange::default().to_string(), "20-20");
    }

    #[test]
    fn display_parses_back() {
        for low in 1..=20 {
            for high in low..=20 {
                let range = ThreatRange { low, high };
                assert_eq!(ThreatRange::parse(&range.to_string()), Some(range));
            }
        }
    }
}
