//! Histogram binning requested by a histogram statistic.

use crate::domain::foundation::{FieldPath, HistogramBinType, ValidationError, ValidationErrors};

const BIN_TYPE: &str = "histogram_bin_type";
const NUMBER_OF_BINS: &str = "histogram_number_of_bins";
const BIN_EDGES: &str = "histogram_bin_edges";

/// Validated binning. Each variant carries only what its bin type uses.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramBins {
    Boolean,
    OnePerValue,
    EqualRanges { number_of_bins: u64 },
    BinEdges { edges: Vec<f64> },
}

impl HistogramBins {
    /// Builds binning from the flat statistic fields.
    ///
    /// Returns `Ok(None)` when no histogram field is set, leaving the choice
    /// of bins to the script generator. Error paths use the statistic's
    /// field names.
    pub fn from_fields(
        bin_type: Option<&str>,
        number_of_bins: Option<i64>,
        edges: Option<&[f64]>,
    ) -> Result<Option<Self>, ValidationErrors> {
        let Some(raw_type) = bin_type else {
            if number_of_bins.is_none() && edges.is_none() {
                return Ok(None);
            }
            return Err(ValidationError::structural(
                BIN_TYPE,
                "histogram_bin_type is required when a bin count or bin edges are given",
            )
            .into());
        };

        let Some(bin_type) = HistogramBinType::from_name(raw_type) else {
            return Err(ValidationError::invalid_input(
                BIN_TYPE,
                format!(
                    "Unknown histogram bin type \"{}\". Expected: {}",
                    raw_type,
                    HistogramBinType::allowed_names()
                ),
            )
            .into());
        };

        let mut errors = ValidationErrors::new();
        let bins = match bin_type {
            HistogramBinType::Boolean | HistogramBinType::OnePerValue => {
                forbid(NUMBER_OF_BINS, number_of_bins.is_some(), bin_type, &mut errors);
                forbid(BIN_EDGES, edges.is_some(), bin_type, &mut errors);
                Some(if bin_type == HistogramBinType::Boolean {
                    Self::Boolean
                } else {
                    Self::OnePerValue
                })
            }
            HistogramBinType::EqualRanges => {
                forbid(BIN_EDGES, edges.is_some(), bin_type, &mut errors);
                equal_ranges(number_of_bins, &mut errors)
            }
            HistogramBinType::BinEdges => {
                forbid(NUMBER_OF_BINS, number_of_bins.is_some(), bin_type, &mut errors);
                bin_edges(edges, &mut errors)
            }
        };

        match bins {
            Some(bins) if errors.is_empty() => Ok(Some(bins)),
            _ => Err(errors),
        }
    }

    pub fn bin_type(&self) -> HistogramBinType {
        match self {
            Self::Boolean => HistogramBinType::Boolean,
            Self::OnePerValue => HistogramBinType::OnePerValue,
            Self::EqualRanges { .. } => HistogramBinType::EqualRanges,
            Self::BinEdges { .. } => HistogramBinType::BinEdges,
        }
    }

    pub fn number_of_bins(&self) -> Option<u64> {
        match self {
            Self::EqualRanges { number_of_bins } => Some(*number_of_bins),
            _ => None,
        }
    }

    pub fn edges(&self) -> Option<&[f64]> {
        match self {
            Self::BinEdges { edges } => Some(edges),
            _ => None,
        }
    }
}

fn forbid(field: &str, present: bool, bin_type: HistogramBinType, errors: &mut ValidationErrors) {
    if present {
        errors.push(ValidationError::structural(
            field,
            format!("{} is not used by bin type \"{}\"", field, bin_type),
        ));
    }
}

fn equal_ranges(number_of_bins: Option<i64>, errors: &mut ValidationErrors) -> Option<HistogramBins> {
    match number_of_bins {
        None => {
            errors.push(ValidationError::structural(
                NUMBER_OF_BINS,
                "bin type \"equalRanges\" requires histogram_number_of_bins",
            ));
            None
        }
        Some(n) if n < 1 => {
            errors.push(ValidationError::range(
                NUMBER_OF_BINS,
                format!("histogram_number_of_bins must be at least 1, got {}", n),
            ));
            None
        }
        Some(n) => Some(HistogramBins::EqualRanges {
            number_of_bins: n.unsigned_abs(),
        }),
    }
}

fn bin_edges(edges: Option<&[f64]>, errors: &mut ValidationErrors) -> Option<HistogramBins> {
    let Some(edges) = edges else {
        errors.push(ValidationError::structural(
            BIN_EDGES,
            "bin type \"binEdges\" requires histogram_bin_edges",
        ));
        return None;
    };
    if edges.len() < 2 {
        errors.push(ValidationError::range(
            BIN_EDGES,
            format!("at least 2 bin edges are required, got {}", edges.len()),
        ));
        return None;
    }

    let path = FieldPath::new(BIN_EDGES);
    let before = errors.len();
    for (i, edge) in edges.iter().enumerate() {
        if !edge.is_finite() {
            errors.push(ValidationError::range(
                path.index(i),
                format!("bin edges must be finite numbers, got {}", edge),
            ));
        } else if i > 0 && edges[i - 1].is_finite() && *edge <= edges[i - 1] {
            errors.push(ValidationError::range(
                path.index(i),
                format!(
                    "bin edges must be strictly increasing, got {} after {}",
                    edge,
                    edges[i - 1]
                ),
            ));
        }
    }

    (errors.len() == before).then(|| HistogramBins::BinEdges {
        edges: edges.to_vec(),
    })
}
