//! Fixed numeric thresholds and message templates shared by the validators.
//!
//! The enumerated vocabularies (variable types, statistic kinds, confidence
//! levels, histogram bin types, missing-value handling) live in their own
//! closed enums; this module only holds the numbers and text they rely on.

/// Epsilon above this value is accepted but raises a privacy budget warning.
pub const EPSILON_WARNING_THRESHOLD: f64 = 5.0;

/// Tolerance added to an epsilon budget before comparing sums against it.
///
/// Keeps `0.1 + 0.2 + 0.7` from exceeding a total of `1.0`.
pub const MAX_EPSILON_OFFSET: f64 = 1e-14;

/// No delta: pure epsilon-DP.
pub const DELTA_0: f64 = 0.0;

/// Largest delta a plan may declare.
pub const DELTA_10_POWER_NEG_5: f64 = 1e-5;

pub const DELTA_10_POWER_NEG_6: f64 = 1e-6;

pub const DELTA_10_POWER_NEG_7: f64 = 1e-7;

/// Hard upper limit for any delta value.
pub const MAX_DELTA: f64 = DELTA_10_POWER_NEG_5;

// =============================================================================
// Messages
// =============================================================================

pub const MSG_EPSILON_WARNING: &str = "Epsilon shouldn't be greater than";

pub const MSG_DELTA_WARNING: &str = "Delta shouldn't be greater than";

pub const MSG_MAX_NOT_GREATER_THAN_MIN: &str = "The max must be greater than the min.";

pub const MSG_BOOL_TRUE_FALSE_NOT_EQUAL: &str = "The True and False values cannot be the same";

pub const MSG_TOO_MANY_BINS: &str = "There are too many bins given the min and max values.";

pub const MSG_IMPUTE_PHRASE_MIN: &str = "cannot be less than the \"min\"";

pub const MSG_IMPUTE_PHRASE_MAX: &str = "cannot be more than the \"max\"";
