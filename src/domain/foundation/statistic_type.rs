//! StatisticType enum - the statistics a plan may request.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::VariableType;

/// A differentially private statistic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatisticType {
    Count,
    Histogram,
    Mean,
    Quantile,
    Sum,
    Variance,
}

static ALLOWED_NAMES: Lazy<String> = Lazy::new(|| {
    StatisticType::all()
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
});

impl StatisticType {
    pub fn all() -> &'static [StatisticType] {
        &[
            StatisticType::Count,
            StatisticType::Histogram,
            StatisticType::Mean,
            StatisticType::Quantile,
            StatisticType::Sum,
            StatisticType::Variance,
        ]
    }

    /// Returns the wire name.
    pub fn name(&self) -> &'static str {
        match self {
            StatisticType::Count => "count",
            StatisticType::Histogram => "histogram",
            StatisticType::Mean => "mean",
            StatisticType::Quantile => "quantile",
            StatisticType::Sum => "sum",
            StatisticType::Variance => "variance",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|s| s.name() == name)
    }

    pub fn allowed_names() -> &'static str {
        ALLOWED_NAMES.as_str()
    }

    /// Variable types this statistic can be computed over.
    pub fn allowed_variable_types(&self) -> &'static [VariableType] {
        match self {
            StatisticType::Count | StatisticType::Histogram => VariableType::all(),
            StatisticType::Mean
            | StatisticType::Quantile
            | StatisticType::Sum
            | StatisticType::Variance => &[VariableType::Integer, VariableType::Float],
        }
    }

    pub fn supports(&self, var_type: VariableType) -> bool {
        self.allowed_variable_types().contains(&var_type)
    }

    /// Statistics that need a row count, which costs budget unless the
    /// number of rows is public.
    pub fn requires_count(&self) -> bool {
        matches!(
            self,
            StatisticType::Mean
                | StatisticType::Sum
                | StatisticType::Quantile
                | StatisticType::Variance
        )
    }
}

impl fmt::Display for StatisticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_returns_6_statistics() {
        assert_eq!(StatisticType::all().len(), 6);
    }

    #[test]
    fn from_name_parses_wire_names() {
        assert_eq!(StatisticType::from_name("mean"), Some(StatisticType::Mean));
        assert_eq!(
            StatisticType::from_name("histogram"),
            Some(StatisticType::Histogram)
        );
        assert_eq!(StatisticType::from_name("median"), None);
    }

    #[test]
    fn count_and_histogram_accept_every_type() {
        for t in VariableType::all() {
            assert!(StatisticType::Count.supports(*t));
            assert!(StatisticType::Histogram.supports(*t));
        }
    }

    #[test]
    fn numeric_statistics_reject_categorical_and_boolean() {
        for s in [
            StatisticType::Mean,
            StatisticType::Quantile,
            StatisticType::Sum,
            StatisticType::Variance,
        ] {
            assert!(s.supports(VariableType::Integer));
            assert!(s.supports(VariableType::Float));
            assert!(!s.supports(VariableType::Categorical));
            assert!(!s.supports(VariableType::Boolean));
        }
    }

    #[test]
    fn requires_count_matches_numeric_statistics() {
        assert!(!StatisticType::Count.requires_count());
        assert!(!StatisticType::Histogram.requires_count());
        assert!(StatisticType::Mean.requires_count());
        assert!(StatisticType::Variance.requires_count());
    }

    #[test]
    fn allowed_names_in_canonical_order() {
        assert_eq!(
            StatisticType::allowed_names(),
            "count, histogram, mean, quantile, sum, variance"
        );
    }

    #[test]
    fn deserializes_from_lowercase() {
        let s: StatisticType = serde_json::from_str("\"quantile\"").unwrap();
        assert_eq!(s, StatisticType::Quantile);
    }
}
