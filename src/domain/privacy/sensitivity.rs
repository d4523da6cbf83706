//! DataSensitivity - depositor's answer to "which best describes your data?"
//!
//! Each answer maps to a recommended starting budget that can be changed later.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::constants::{
    DELTA_10_POWER_NEG_5, DELTA_10_POWER_NEG_6, DELTA_10_POWER_NEG_7,
};
use crate::domain::foundation::Validated;

use super::{Delta, Epsilon, PrivacyParameters};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataSensitivity {
    Public,
    NotHarmButConfidential,
    CouldCauseHarm,
    WouldLikelyCauseHarm,
    WouldCauseSevereHarm,
}

impl DataSensitivity {
    pub fn all() -> &'static [DataSensitivity] {
        &[
            DataSensitivity::Public,
            DataSensitivity::NotHarmButConfidential,
            DataSensitivity::CouldCauseHarm,
            DataSensitivity::WouldLikelyCauseHarm,
            DataSensitivity::WouldCauseSevereHarm,
        ]
    }

    pub fn description(&self) -> &'static str {
        match self {
            DataSensitivity::Public => "Public Information",
            DataSensitivity::NotHarmButConfidential => {
                "Information that, if disclosed, would not cause material harm, \
                 but which the organization has chosen to keep confidential"
            }
            DataSensitivity::CouldCauseHarm => {
                "Information that could cause risk of material harm to individuals \
                 or the organization if disclosed"
            }
            DataSensitivity::WouldLikelyCauseHarm => {
                "Information that would likely cause serious harm to individuals \
                 or the organization if disclosed"
            }
            DataSensitivity::WouldCauseSevereHarm => {
                "Information that would cause severe harm to individuals or the \
                 organization if disclosed. Use of this application is not recommended."
            }
        }
    }

    /// Recommended `(epsilon, delta)`.
    ///
    /// `None` for public data (no privacy budget needed) and for data too
    /// sensitive to release at all.
    pub fn recommended_budget(&self) -> Option<(f64, f64)> {
        match self {
            DataSensitivity::Public | DataSensitivity::WouldCauseSevereHarm => None,
            DataSensitivity::NotHarmButConfidential => Some((1.0, DELTA_10_POWER_NEG_5)),
            DataSensitivity::CouldCauseHarm => Some((0.25, DELTA_10_POWER_NEG_6)),
            DataSensitivity::WouldLikelyCauseHarm => Some((0.05, DELTA_10_POWER_NEG_7)),
        }
    }

    /// Builds the recommended parameters with the depositor's disclosure answers.
    pub fn privacy_parameters(
        &self,
        number_of_rows_public: bool,
        individual_in_at_most_one_row: bool,
    ) -> Option<PrivacyParameters> {
        let (epsilon, delta) = self.recommended_budget()?;
        let total_epsilon = Epsilon::validate(epsilon).ok().map(Validated::into_inner)?;
        let total_delta = Delta::validate(delta).ok().map(Validated::into_inner)?;
        Some(PrivacyParameters::new(
            total_epsilon,
            Some(total_delta),
            number_of_rows_public,
            individual_in_at_most_one_row,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_data_needs_no_budget() {
        assert_eq!(DataSensitivity::Public.recommended_budget(), None);
        assert!(DataSensitivity::Public.privacy_parameters(true, true).is_none());
    }

    #[test]
    fn severe_harm_is_not_supported() {
        assert!(DataSensitivity::WouldCauseSevereHarm
            .privacy_parameters(true, true)
            .is_none());
    }

    #[test]
    fn budgets_tighten_with_sensitivity() {
        let (e1, d1) = DataSensitivity::NotHarmButConfidential
            .recommended_budget()
            .unwrap();
        let (e2, d2) = DataSensitivity::CouldCauseHarm.recommended_budget().unwrap();
        let (e3, d3) = DataSensitivity::WouldLikelyCauseHarm
            .recommended_budget()
            .unwrap();
        assert!(e1 > e2 && e2 > e3);
        assert!(d1 > d2 && d2 > d3);
    }

    #[test]
    fn recommended_parameters_are_valid() {
        for sensitivity in DataSensitivity::all() {
            if let Some(params) = sensitivity.privacy_parameters(false, true) {
                assert!(params.total_delta().is_some());
                assert!(!params.number_of_rows_public());
                assert!(params.individual_in_at_most_one_row());
            }
        }
    }

    #[test]
    fn could_cause_harm_uses_quarter_epsilon() {
        let params = DataSensitivity::CouldCauseHarm
            .privacy_parameters(true, true)
            .unwrap();
        assert_eq!(params.total_epsilon().value(), 0.25);
        assert_eq!(params.total_delta().unwrap().value(), 1e-6);
    }

    #[test]
    fn deserializes_camel_case_answers() {
        let s: DataSensitivity = serde_json::from_str("\"couldCauseHarm\"").unwrap();
        assert_eq!(s, DataSensitivity::CouldCauseHarm);
    }
}
