//! HistogramBinType enum - how a histogram partitions its variable.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::VariableType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HistogramBinType {
    #[serde(rename = "binTypeBoolean")]
    Boolean,
    #[serde(rename = "onePerValue")]
    OnePerValue,
    #[serde(rename = "equalRanges")]
    EqualRanges,
    #[serde(rename = "binEdges")]
    BinEdges,
}

static ALLOWED_NAMES: Lazy<String> = Lazy::new(|| {
    HistogramBinType::all()
        .iter()
        .map(|b| b.name())
        .collect::<Vec<_>>()
        .join(", ")
});

impl HistogramBinType {
    pub fn all() -> &'static [HistogramBinType] {
        &[
            HistogramBinType::Boolean,
            HistogramBinType::OnePerValue,
            HistogramBinType::EqualRanges,
            HistogramBinType::BinEdges,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            HistogramBinType::Boolean => "binTypeBoolean",
            HistogramBinType::OnePerValue => "onePerValue",
            HistogramBinType::EqualRanges => "equalRanges",
            HistogramBinType::BinEdges => "binEdges",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.name() == name)
    }

    pub fn allowed_names() -> &'static str {
        ALLOWED_NAMES.as_str()
    }

    /// Returns true if histograms of this bin type make sense for `var_type`.
    pub fn fits(&self, var_type: VariableType) -> bool {
        match self {
            HistogramBinType::Boolean => var_type == VariableType::Boolean,
            HistogramBinType::OnePerValue => var_type != VariableType::Float,
            HistogramBinType::EqualRanges | HistogramBinType::BinEdges => var_type.is_numeric(),
        }
    }
}

impl fmt::Display for HistogramBinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
