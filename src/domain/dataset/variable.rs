//! Variable definition - a typed dataset column and its structural rules.
//!
//! Three independent rules decide whether a declaration matches its type:
//!
//! - numeric bounds: required for Integer/Float (whole numbers for Integer),
//!   forbidden otherwise
//! - categories: required and non-empty for Categorical, forbidden otherwise
//! - boolean encoding: for Boolean, both `true_value` and `false_value` or
//!   neither, and never equal; forbidden for other types
//!
//! Every failing rule is reported, not just the first.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::constants::MSG_BOOL_TRUE_FALSE_NOT_EQUAL;
use crate::domain::foundation::{
    FieldPath, ScalarValue, ValidationError, ValidationErrors, VariableType,
};
use crate::domain::privacy::{Bounds, BoundsInput};

/// Wire form of a variable declaration.
///
/// Bounds may be nested (`"bounds": {"min": 0, "max": 10}`) or flat
/// (`"min": 0, "max": 10`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub var_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundsInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<ScalarValue>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub true_value: Option<ScalarValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub false_value: Option<ScalarValue>,
}

impl VariableInput {
    pub fn new(name: impl Into<String>, var_type: VariableType) -> Self {
        Self {
            name: name.into(),
            var_type: var_type.name().to_string(),
            ..Self::default()
        }
    }

    pub fn with_bounds(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(BoundsInput { min, max });
        self
    }

    pub fn with_categories<I, V>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        self.categories = Some(categories.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_true_value(mut self, value: impl Into<ScalarValue>) -> Self {
        self.true_value = Some(value.into());
        self
    }

    pub fn with_false_value(mut self, value: impl Into<ScalarValue>) -> Self {
        self.false_value = Some(value.into());
        self
    }
}

/// Custom encoding of a boolean column.
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanEncoding {
    true_value: ScalarValue,
    false_value: ScalarValue,
}

impl BooleanEncoding {
    pub fn true_value(&self) -> &ScalarValue {
        &self.true_value
    }

    pub fn false_value(&self) -> &ScalarValue {
        &self.false_value
    }

    pub fn encodes(&self, value: &ScalarValue) -> bool {
        *value == self.true_value || *value == self.false_value
    }
}

/// Type-specific payload of a variable. Each variant carries exactly the
/// fields its type requires.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableKind {
    Integer { bounds: Bounds },
    Float { bounds: Bounds },
    Categorical { categories: Vec<ScalarValue> },
    /// `None` means plain `true`/`false` values.
    Boolean { encoding: Option<BooleanEncoding> },
}

/// A validated variable definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "VariableInput", into = "VariableInput")]
pub struct Variable {
    name: String,
    kind: VariableKind,
}

impl Variable {
    /// Validates a declaration. Paths in the returned errors are relative
    /// to the variable record.
    pub fn validate(input: &VariableInput) -> Result<Self, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if input.name.trim().is_empty() {
            errors.push(ValidationError::invalid_input(
                "name",
                "variable name cannot be empty",
            ));
        }

        let Some(var_type) = VariableType::from_name(&input.var_type) else {
            errors.push(ValidationError::invalid_input(
                "var_type",
                format!(
                    "unknown variable type \"{}\"; expected one of {}",
                    input.var_type,
                    VariableType::allowed_names()
                ),
            ));
            return Err(errors);
        };

        let kind = match var_type {
            VariableType::Integer | VariableType::Float => {
                forbid_categories(input, var_type, &mut errors);
                forbid_boolean_encoding(input, var_type, &mut errors);
                require_bounds(input, var_type, &mut errors).map(|bounds| {
                    if var_type == VariableType::Integer {
                        VariableKind::Integer { bounds }
                    } else {
                        VariableKind::Float { bounds }
                    }
                })
            }
            VariableType::Categorical => {
                forbid_bounds(input, var_type, &mut errors);
                forbid_boolean_encoding(input, var_type, &mut errors);
                require_categories(input, &mut errors)
                    .map(|categories| VariableKind::Categorical { categories })
            }
            VariableType::Boolean => {
                forbid_bounds(input, var_type, &mut errors);
                forbid_categories(input, var_type, &mut errors);
                boolean_encoding(input, &mut errors)
                    .map(|encoding| VariableKind::Boolean { encoding })
            }
        };

        match kind {
            Some(kind) if errors.is_empty() => Ok(Self {
                name: input.name.clone(),
                kind,
            }),
            _ => {
                tracing::debug!(
                    variable = %input.name,
                    var_type = %var_type,
                    errors = errors.len(),
                    "variable definition rejected"
                );
                Err(errors)
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &VariableKind {
        &self.kind
    }

    pub fn var_type(&self) -> VariableType {
        match self.kind {
            VariableKind::Integer { .. } => VariableType::Integer,
            VariableKind::Float { .. } => VariableType::Float,
            VariableKind::Categorical { .. } => VariableType::Categorical,
            VariableKind::Boolean { .. } => VariableType::Boolean,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self.kind {
            VariableKind::Integer { bounds } | VariableKind::Float { bounds } => Some(bounds),
            _ => None,
        }
    }

    pub fn categories(&self) -> Option<&[ScalarValue]> {
        match &self.kind {
            VariableKind::Categorical { categories } => Some(categories),
            _ => None,
        }
    }

    pub fn boolean_encoding(&self) -> Option<&BooleanEncoding> {
        match &self.kind {
            VariableKind::Boolean { encoding } => encoding.as_ref(),
            _ => None,
        }
    }
}

// =============================================================================
// Numeric-bounds rule
// =============================================================================

fn require_bounds(
    input: &VariableInput,
    var_type: VariableType,
    errors: &mut ValidationErrors,
) -> Option<Bounds> {
    let (prefix, min, max) = match (&input.bounds, input.min, input.max) {
        (Some(bounds), None, None) => (FieldPath::new("bounds"), bounds.min, bounds.max),
        (None, Some(min), Some(max)) => (FieldPath::root(), min, max),
        (Some(_), _, _) => {
            errors.push(ValidationError::structural(
                "bounds",
                "bounds were given both as \"bounds\" and as \"min\"/\"max\"; use one form",
            ));
            return None;
        }
        (None, Some(_), None) => {
            errors.push(ValidationError::structural(
                "max",
                format!("for type '{}', \"max\" is required when \"min\" is set", var_type),
            ));
            return None;
        }
        (None, None, Some(_)) => {
            errors.push(ValidationError::structural(
                "min",
                format!("for type '{}', \"min\" is required when \"max\" is set", var_type),
            ));
            return None;
        }
        (None, None, None) => {
            errors.push(ValidationError::structural(
                "bounds",
                format!("for type '{}', bounds (min and max) are required", var_type),
            ));
            return None;
        }
    };

    let mut integral = true;
    if var_type == VariableType::Integer {
        for (field, value) in [("min", min), ("max", max)] {
            if value.is_finite() && value.fract() != 0.0 {
                errors.push(ValidationError::structural(
                    prefix.field(field),
                    format!(
                        "for type 'Integer', {} must be an integer, got {}",
                        field, value
                    ),
                ));
                integral = false;
            }
        }
    }

    match Bounds::validate(min, max) {
        Ok(bounds) if integral => Some(bounds),
        Ok(_) => None,
        Err(e) => {
            errors.push(e.nested(&prefix));
            None
        }
    }
}

fn forbid_bounds(input: &VariableInput, var_type: VariableType, errors: &mut ValidationErrors) {
    let field = if input.bounds.is_some() {
        "bounds"
    } else if input.min.is_some() {
        "min"
    } else if input.max.is_some() {
        "max"
    } else {
        return;
    };
    errors.push(ValidationError::structural(
        field,
        format!("for type '{}', bounds must not be set", var_type),
    ));
}

// =============================================================================
// Categorical rule
// =============================================================================

fn require_categories(
    input: &VariableInput,
    errors: &mut ValidationErrors,
) -> Option<Vec<ScalarValue>> {
    let path = FieldPath::new("categories");
    let Some(categories) = &input.categories else {
        errors.push(ValidationError::structural(
            path,
            "for type 'Categorical', categories are required",
        ));
        return None;
    };
    if categories.is_empty() {
        errors.push(ValidationError::structural(
            path,
            "for type 'Categorical', categories must not be empty",
        ));
        return None;
    }

    let before = errors.len();
    let mut first_seen: HashMap<CategoryKey<'_>, usize> = HashMap::with_capacity(categories.len());
    for (i, category) in categories.iter().enumerate() {
        let key = match category {
            ScalarValue::Text(text) => CategoryKey::Text(text.as_str()),
            // -0.0 and 0.0 are the same category.
            ScalarValue::Number(n) => CategoryKey::Number((n + 0.0).to_bits()),
            ScalarValue::Bool(_) => {
                errors.push(ValidationError::structural(
                    path.index(i),
                    format!(
                        "categories must be strings or numbers, got {}",
                        category.type_name()
                    ),
                ));
                continue;
            }
        };
        if let Some(&first) = first_seen.get(&key) {
            errors.push(ValidationError::structural(
                path.index(i),
                format!(
                    "duplicate category {} (first listed at categories[{}])",
                    category, first
                ),
            ));
        } else {
            first_seen.insert(key, i);
        }
    }

    (errors.len() == before).then(|| categories.clone())
}

/// Hashable form of a category. Numbers compare by bit pattern.
#[derive(PartialEq, Eq, Hash)]
enum CategoryKey<'a> {
    Text(&'a str),
    Number(u64),
}

fn forbid_categories(input: &VariableInput, var_type: VariableType, errors: &mut ValidationErrors) {
    if input.categories.is_some() {
        errors.push(ValidationError::structural(
            "categories",
            format!("for type '{}', categories must not be set", var_type),
        ));
    }
}

// =============================================================================
// Boolean-encoding rule
// =============================================================================

/// `Some(None)` for default boolean semantics, `Some(Some(_))` for a custom
/// encoding, `None` after recording an error.
fn boolean_encoding(
    input: &VariableInput,
    errors: &mut ValidationErrors,
) -> Option<Option<BooleanEncoding>> {
    match (&input.true_value, &input.false_value) {
        (None, None) => Some(None),
        (Some(true_value), Some(false_value)) => {
            if true_value == false_value {
                errors.push(ValidationError::structural(
                    "false_value",
                    format!(
                        "{} (both are {})",
                        MSG_BOOL_TRUE_FALSE_NOT_EQUAL, true_value
                    ),
                ));
                return None;
            }
            Some(Some(BooleanEncoding {
                true_value: true_value.clone(),
                false_value: false_value.clone(),
            }))
        }
        (Some(_), None) => {
            errors.push(ValidationError::structural(
                "false_value",
                "for type 'Boolean', false_value is required when true_value is set",
            ));
            None
        }
        (None, Some(_)) => {
            errors.push(ValidationError::structural(
                "true_value",
                "for type 'Boolean', true_value is required when false_value is set",
            ));
            None
        }
    }
}

fn forbid_boolean_encoding(
    input: &VariableInput,
    var_type: VariableType,
    errors: &mut ValidationErrors,
) {
    for (field, value) in [
        ("true_value", &input.true_value),
        ("false_value", &input.false_value),
    ] {
        if value.is_some() {
            errors.push(ValidationError::structural(
                field,
                format!("for type '{}', {} must not be set", var_type, field),
            ));
        }
    }
}

// =============================================================================
// Serde
// =============================================================================

impl TryFrom<VariableInput> for Variable {
    type Error = ValidationErrors;

    fn try_from(input: VariableInput) -> Result<Self, Self::Error> {
        Self::validate(&input)
    }
}

impl From<Variable> for VariableInput {
    fn from(variable: Variable) -> Self {
        let var_type = variable.var_type();
        let mut input = VariableInput::new(variable.name, var_type);
        match variable.kind {
            VariableKind::Integer { bounds } | VariableKind::Float { bounds } => {
                input.bounds = Some(bounds.into());
            }
            VariableKind::Categorical { categories } => {
                input.categories = Some(categories);
            }
            VariableKind::Boolean { encoding } => {
                if let Some(encoding) = encoding {
                    input.true_value = Some(encoding.true_value);
                    input.false_value = Some(encoding.false_value);
                }
            }
        }
        input
    }
}
