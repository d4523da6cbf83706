//! Dataset aggregate - a named, ordered collection of variable definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::{FieldPath, ValidationError, ValidationErrors, ValidationPolicy};

use super::{Variable, VariableInput};

/// Wire form of a dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub variables: Vec<VariableInput>,
}

/// A validated dataset. Owns its variables; order is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DatasetInput", into = "DatasetInput")]
pub struct Dataset {
    name: String,
    description: Option<String>,
    variables: Vec<Variable>,
}

impl Dataset {
    /// Validates the dataset and every variable in it.
    ///
    /// Variable errors are reported under `variables[i]`.
    pub fn validate(
        input: &DatasetInput,
        policy: &ValidationPolicy,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if input.name.trim().is_empty() {
            errors.push(ValidationError::invalid_input(
                "name",
                "dataset name cannot be empty",
            ));
        }

        let variables_path = FieldPath::new("variables");
        if input.variables.is_empty() {
            errors.push(ValidationError::structural(
                variables_path.clone(),
                "a dataset needs at least one variable",
            ));
        }

        let mut variables = Vec::with_capacity(input.variables.len());
        for (i, raw) in input.variables.iter().enumerate() {
            match Variable::validate(raw) {
                Ok(variable) => variables.push(variable),
                Err(child) => errors.absorb(child, &variables_path.index(i)),
            }
        }

        if policy.require_unique_variable_names {
            let mut first_seen: HashMap<&str, usize> = HashMap::new();
            for (i, raw) in input.variables.iter().enumerate() {
                if raw.name.trim().is_empty() {
                    continue;
                }
                if let Some(first) = first_seen.get(raw.name.as_str()) {
                    errors.push(ValidationError::structural(
                        variables_path.index(i).field("name"),
                        format!(
                            "duplicate variable name \"{}\" (first declared at variables[{}])",
                            raw.name, first
                        ),
                    ));
                } else {
                    first_seen.insert(raw.name.as_str(), i);
                }
            }
        }

        if !errors.is_empty() {
            tracing::debug!(
                dataset = %input.name,
                errors = errors.len(),
                "dataset rejected"
            );
            return Err(errors);
        }

        Ok(Self {
            name: input.name.clone(),
            description: input.description.clone(),
            variables,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Looks up a variable by exact name. With duplicate names allowed, the
    /// first declaration wins.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.iter().find(|v| v.name() == name)
    }

    pub fn contains_variable(&self, name: &str) -> bool {
        self.variable(name).is_some()
    }
}

impl TryFrom<DatasetInput> for Dataset {
    type Error = ValidationErrors;

    fn try_from(input: DatasetInput) -> Result<Self, Self::Error> {
        Self::validate(&input, &ValidationPolicy::default())
    }
}

impl From<Dataset> for DatasetInput {
    fn from(dataset: Dataset) -> Self {
        DatasetInput {
            name: dataset.name,
            description: dataset.description,
            variables: dataset.variables.into_iter().map(Into::into).collect(),
        }
    }
}
