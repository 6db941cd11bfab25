//! Parsing of raw form input into validated records.
//!
//! Forms hold the text exactly as typed. Parsing trims whitespace, checks
//! fields in the order the form shows them, and reports the first failure.

use crate::config::InputConfig;
use crate::types::{NewEntry, NewExercise};
use std::fmt;

/// A numeric form field
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Sets,
    Reps,
    Weight,
    SetNumber,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Sets => "sets",
            Field::Reps => "reps",
            Field::Weight => "weight",
            Field::SetNumber => "set number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a form field was rejected
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a whole number, got {input:?}")]
    NotAnInteger { field: Field, input: String },

    #[error("{field} must be a number, got {input:?}")]
    NotANumber { field: Field, input: String },

    #[error("{field} must be at least 1")]
    NotPositive { field: Field },

    #[error("{field} cannot be negative, got {value}")]
    Negative { field: Field, value: f64 },
}

/// Raw input of the "new exercise" form
#[derive(Clone, Debug, Default)]
pub struct ExerciseForm {
    pub name: String,
    pub sets: String,
    pub reps: String,
    pub weight: String,
}

impl ExerciseForm {
    pub fn parse(&self, rules: &InputConfig) -> Result<NewExercise, ValidationError> {
        let planned_sets = parse_count(Field::Sets, &self.sets)?;
        let planned_reps = parse_count(Field::Reps, &self.reps)?;
        let planned_weight = parse_weight(Field::Weight, &self.weight, rules)?;

        Ok(NewExercise {
            name: self.name.clone(),
            planned_sets,
            planned_reps,
            planned_weight,
        })
    }
}

/// Raw input of the "new entry" form
#[derive(Clone, Debug, Default)]
pub struct EntryForm {
    pub set_number: String,
    pub weight: String,
    pub reps: String,
}

impl EntryForm {
    pub fn parse(&self, rules: &InputConfig) -> Result<NewEntry, ValidationError> {
        let set_number = parse_count(Field::SetNumber, &self.set_number)?;
        let weight = parse_weight(Field::Weight, &self.weight, rules)?;
        let reps = parse_count(Field::Reps, &self.reps)?;

        Ok(NewEntry {
            set_number,
            weight,
            reps,
        })
    }
}

/// Parse a positive whole number
fn parse_count(field: Field, raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ValidationError::NotAnInteger {
            field,
            input: raw.to_string(),
        })?;

    if value < 1 {
        return Err(ValidationError::NotPositive { field });
    }

    u32::try_from(value).map_err(|_| ValidationError::NotAnInteger {
        field,
        input: raw.to_string(),
    })
}

/// Parse a finite, non-negative real number
fn parse_weight(field: Field, raw: &str, rules: &InputConfig) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let normalized = if rules.decimal_comma && trimmed.matches(',').count() == 1 {
        if trimmed.contains('.') {
            return Err(ValidationError::NotANumber {
                field,
                input: raw.to_string(),
            });
        }
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let value: f64 = normalized
        .parse()
        .ok()
        .filter(|v: &f64| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field,
            input: raw.to_string(),
        })?;

    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }

    // Normalize -0.0
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> InputConfig {
        InputConfig::default()
    }

    fn exercise_form(sets: &str, reps: &str, weight: &str) -> ExerciseForm {
        ExerciseForm {
            name: "Squat".into(),
            sets: sets.into(),
            reps: reps.into(),
            weight: weight.into(),
        }
    }

    #[test]
    fn test_parse_exercise_form() {
        let parsed = exercise_form("3", "10", "42.5").parse(&rules()).unwrap();
        assert_eq!(
            parsed,
            NewExercise {
                name: "Squat".into(),
                planned_sets: 3,
                planned_reps: 10,
                planned_weight: 42.5,
            }
        );
    }

    #[test]
    fn test_non_numeric_sets_rejected() {
        let err = exercise_form("abc", "10", "42.5").parse(&rules()).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAnInteger {
                field: Field::Sets,
                input: "abc".into(),
            }
        );
    }

    #[test]
    fn test_first_bad_field_is_reported() {
        let err = exercise_form("3", "x", "y").parse(&rules()).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotAnInteger {
                field: Field::Reps,
                ..
            }
        ));
    }

    #[test]
    fn test_fractional_count_rejected() {
        let err = exercise_form("2.5", "10", "0").parse(&rules()).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnInteger { .. }));
    }

    #[test]
    fn test_zero_and_negative_counts_rejected() {
        assert_eq!(
            exercise_form("0", "10", "0").parse(&rules()).unwrap_err(),
            ValidationError::NotPositive { field: Field::Sets }
        );
        assert_eq!(
            exercise_form("3", "-2", "0").parse(&rules()).unwrap_err(),
            ValidationError::NotPositive { field: Field::Reps }
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let parsed = exercise_form(" 4 ", "\t8", "60 ").parse(&rules()).unwrap();
        assert_eq!(parsed.planned_sets, 4);
        assert_eq!(parsed.planned_reps, 8);
        assert_eq!(parsed.planned_weight, 60.0);
    }

    #[test]
    fn test_decimal_comma() {
        let parsed = exercise_form("3", "10", "42,5").parse(&rules()).unwrap();
        assert_eq!(parsed.planned_weight, 42.5);

        let strict = InputConfig {
            decimal_comma: false,
        };
        let err = exercise_form("3", "10", "42,5").parse(&strict).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::NotANumber {
                field: Field::Weight,
                ..
            }
        ));
    }

    #[test]
    fn test_mixed_separators_rejected() {
        let err = exercise_form("3", "10", "1.000,5").parse(&rules()).unwrap_err();
        assert!(matches!(err, ValidationError::NotANumber { .. }));
    }

    #[test]
    fn test_weight_must_be_finite_and_non_negative() {
        assert!(matches!(
            exercise_form("3", "10", "-5").parse(&rules()).unwrap_err(),
            ValidationError::Negative { value, .. } if value == -5.0
        ));
        assert!(matches!(
            exercise_form("3", "10", "inf").parse(&rules()).unwrap_err(),
            ValidationError::NotANumber { .. }
        ));
        assert!(matches!(
            exercise_form("3", "10", "NaN").parse(&rules()).unwrap_err(),
            ValidationError::NotANumber { .. }
        ));
        assert_eq!(
            exercise_form("3", "10", "0").parse(&rules()).unwrap().planned_weight,
            0.0
        );
    }

    #[test]
    fn test_empty_name_accepted() {
        let form = ExerciseForm {
            name: String::new(),
            ..exercise_form("1", "1", "1")
        };
        assert_eq!(form.parse(&rules()).unwrap().name, "");
    }

    #[test]
    fn test_parse_entry_form() {
        let form = EntryForm {
            set_number: "1".into(),
            weight: "20.0".into(),
            reps: "8".into(),
        };
        assert_eq!(
            form.parse(&rules()).unwrap(),
            NewEntry {
                set_number: 1,
                weight: 20.0,
                reps: 8,
            }
        );
    }

    #[test]
    fn test_entry_form_checks_set_number_first() {
        let form = EntryForm {
            set_number: "".into(),
            weight: "heavy".into(),
            reps: "8".into(),
        };
        assert!(matches!(
            form.parse(&rules()).unwrap_err(),
            ValidationError::NotAnInteger {
                field: Field::SetNumber,
                ..
            }
        ));
    }

    #[test]
    fn test_error_messages_name_the_field() {
        let err = ValidationError::NotAnInteger {
            field: Field::SetNumber,
            input: "one".into(),
        };
        assert_eq!(err.to_string(), "set number must be a whole number, got \"one\"");
    }
}
