//! Rules that relate a statistic request to the variable it names.
//!
//! Each rule pushes errors under the request's path and never stops the
//! others from running.

use crate::domain::dataset::{Variable, VariableKind};
use crate::domain::foundation::constants::{
    MSG_IMPUTE_PHRASE_MAX, MSG_IMPUTE_PHRASE_MIN, MSG_TOO_MANY_BINS,
};
use crate::domain::foundation::{
    FieldPath, HistogramBinType, ScalarValue, ValidationError, ValidationErrors, VariableType,
};
use crate::domain::privacy::Bounds;
use crate::domain::statistics::StatisticRequest;

/// Runs every statistic-versus-variable rule.
pub(super) fn check_statistic_against_variable(
    request: &StatisticRequest,
    variable: &Variable,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    check_compatibility(request, variable, path, errors);
    check_bounds_override(request, variable, path, errors);
    check_histogram_fit(request, variable, path, errors);
    check_fixed_value(request, variable, path, errors);
}

/// The clamping range a statistic actually uses.
pub(super) fn effective_bounds(request: &StatisticRequest, variable: &Variable) -> Option<Bounds> {
    request.bounds().or_else(|| variable.bounds())
}

fn check_compatibility(
    request: &StatisticRequest,
    variable: &Variable,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    let statistic = request.statistic();
    if statistic.supports(variable.var_type()) {
        return;
    }
    let allowed = statistic
        .allowed_variable_types()
        .iter()
        .map(VariableType::name)
        .collect::<Vec<_>>()
        .join(" or ");
    errors.push(ValidationError::structural(
        path.field("statistic"),
        format!(
            "statistic \"{}\" needs a variable of type {}; \"{}\" is {}",
            statistic,
            allowed,
            variable.name(),
            variable.var_type()
        ),
    ));
}

fn check_bounds_override(
    request: &StatisticRequest,
    variable: &Variable,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    let Some(bounds) = request.bounds() else {
        return;
    };
    match variable.var_type() {
        VariableType::Integer if !bounds.is_integral() => {
            errors.push(ValidationError::structural(
                path.field("bounds"),
                format!(
                    "for type 'Integer', bounds must be whole numbers, got {}",
                    bounds
                ),
            ));
        }
        VariableType::Integer | VariableType::Float => {}
        other => {
            errors.push(ValidationError::structural(
                path.field("bounds"),
                format!(
                    "bounds can only be set for Integer or Float variables; \"{}\" is {}",
                    variable.name(),
                    other
                ),
            ));
        }
    }
}

fn check_histogram_fit(
    request: &StatisticRequest,
    variable: &Variable,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    let Some(bins) = request.histogram_bins() else {
        return;
    };
    let var_type = variable.var_type();
    let bin_type = bins.bin_type();
    if !bin_type.fits(var_type) {
        errors.push(ValidationError::structural(
            path.field("histogram_bin_type"),
            format!(
                "bin type \"{}\" cannot be used with {} variable \"{}\"",
                bin_type,
                var_type,
                variable.name()
            ),
        ));
        return;
    }

    if bin_type != HistogramBinType::EqualRanges || var_type != VariableType::Integer {
        return;
    }
    let (Some(requested), Some(available)) = (
        bins.number_of_bins(),
        effective_bounds(request, variable).and_then(|b| b.integer_count()),
    ) else {
        return;
    };
    if requested as f64 > available {
        errors.push(ValidationError::range(
            path.field("histogram_number_of_bins"),
            format!(
                "{} ({} bins requested, {} whole values available)",
                MSG_TOO_MANY_BINS, requested, available
            ),
        ));
    }
}

fn check_fixed_value(
    request: &StatisticRequest,
    variable: &Variable,
    path: &FieldPath,
    errors: &mut ValidationErrors,
) {
    let Some(value) = request
        .missing_value_handling()
        .and_then(|handling| handling.fixed_value())
    else {
        return;
    };
    let value_path = path.field("missing_value_handling").field("fixed_value");

    match variable.kind() {
        VariableKind::Integer { .. } | VariableKind::Float { .. } => {
            let Some(number) = value.as_f64() else {
                errors.push(ValidationError::structural(
                    value_path,
                    format!(
                        "the fixed value for {} variable \"{}\" must be a number, got {}",
                        variable.var_type(),
                        variable.name(),
                        value.type_name()
                    ),
                ));
                return;
            };
            if variable.var_type() == VariableType::Integer && number.fract() != 0.0 {
                errors.push(ValidationError::structural(
                    value_path.clone(),
                    format!(
                        "for type 'Integer', the fixed value must be an integer, got {}",
                        number
                    ),
                ));
            }
            if let Some(bounds) = effective_bounds(request, variable) {
                if number < bounds.min() {
                    errors.push(ValidationError::range(
                        value_path,
                        format!(
                            "The fixed value {} {} ({})",
                            number,
                            MSG_IMPUTE_PHRASE_MIN,
                            bounds.min()
                        ),
                    ));
                } else if number > bounds.max() {
                    errors.push(ValidationError::range(
                        value_path,
                        format!(
                            "The fixed value {} {} ({})",
                            number,
                            MSG_IMPUTE_PHRASE_MAX,
                            bounds.max()
                        ),
                    ));
                }
            }
        }
        VariableKind::Categorical { categories } => {
            if !categories.contains(value) {
                errors.push(ValidationError::structural(
                    value_path,
                    format!(
                        "the fixed value {} is not a category of \"{}\"",
                        value,
                        variable.name()
                    ),
                ));
            }
        }
        VariableKind::Boolean { encoding } => {
            let fits = match encoding {
                Some(encoding) => encoding.encodes(value),
                None => matches!(value, ScalarValue::Bool(_)),
            };
            if !fits {
                errors.push(ValidationError::structural(
                    value_path,
                    format!(
                        "the fixed value {} is not a value of boolean variable \"{}\"",
                        value,
                        variable.name()
                    ),
                ));
            }
        }
    }
}
