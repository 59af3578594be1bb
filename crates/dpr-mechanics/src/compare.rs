//! Ranking builds against the strongest one.

use serde::{Deserialize, Serialize};

/// Where a build stands relative to the best total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Standing {
    /// The build with the highest total.
    Best,
    /// Signed difference from the best total, in percent.
    Behind(f64),
    /// No meaningful comparison (the best total is not positive).
    NotApplicable,
}

impl std::fmt::Display for Standing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Best => write!(f, "Best"),
            Self::Behind(percent) => write!(f, "{percent:.1}%"),
            Self::NotApplicable => write!(f, "N/A"),
        }
    }
}

/// A build's total and its standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Build name.
    pub name: String,
    /// Expected total damage.
    pub total: f64,
    /// Standing relative to the best build.
    pub standing: Standing,
}

/// Rank totals against the maximum, keeping input order.
pub fn compare<'a, I>(totals: I) -> Vec<ComparisonRow>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let totals: Vec<(&str, f64)> = totals.into_iter().collect();
    let max = totals
        .iter()
        .map(|&(_, total)| total)
        .fold(f64::NEG_INFINITY, f64::max);

    totals
        .into_iter()
        .map(|(name, total)| {
            let standing = if max <= 0.0 {
                Standing::NotApplicable
            } else if total == max {
                Standing::Best
            } else {
                Standing::Behind((total - max) / max * 100.0)
            };
            ComparisonRow {
                name: name.to_string(),
                total,
                standing,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn best_and_percentages() {
        let rows = compare([("Greataxe", 100.0), ("Longbow", 80.0), ("Empty", 0.0)]);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].standing, Standing::Best);
        assert_eq!(rows[1].standing.to_string(), "-20.0%");
        assert_eq!(rows[2].standing.to_string(), "-100.0%");
        assert_eq!(rows[1].name, "Longbow");
    }

    #[test]
    fn ties_share_best() {
        let rows = compare([("A", 50.0), ("B", 50.0)]);
        assert!(rows.iter().all(|r| r.standing == Standing::Best));
    }

    #[test]
    fn zero_maximum_is_not_applicable() {
        let rows = compare([("A", 0.0), ("B", 0.0)]);
        assert!(rows.iter().all(|r| r.standing == Standing::NotApplicable));
        assert_eq!(rows[0].standing.to_string(), "N/A");
    }

    #[test]
    fn empty_input() {
        assert!(compare(std::iter::empty()).is_empty());
    }
}
