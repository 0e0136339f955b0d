use crate::error::ConfigError;
use crate::validator::{arg, FieldInput, Outcome, Validator};

/// `sameAs:other`: loosely equal to the `other` field when both are set
pub struct SameAsValidator;

impl Validator for SameAsValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let other = arg(args, 0).ok_or_else(|| ConfigError::missing("sameAs", "fieldname"))?;

        if let (Some(value), Some(target)) = (input.value, input.other(other)) {
            if !value.is_empty() && !value.loose_eq(target) {
                return Ok(Outcome::fail(format!(
                    "Field `{}` must match field {}.",
                    input.field, other
                )));
            }
        }
        Ok(Outcome::Pass)
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }

    fn params(&self) -> &'static [&'static str] {
        &["fieldname"]
    }
}

/// `different:other`: not loosely equal to the `other` field
pub struct DifferentValidator;

impl Validator for DifferentValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let other = arg(args, 0).ok_or_else(|| ConfigError::missing("different", "fieldname"))?;

        if let (Some(value), Some(target)) = (input.value, input.other(other)) {
            if !value.is_empty() && value.loose_eq(target) {
                return Ok(Outcome::fail(format!(
                    "Field `{}` must not match field {}.",
                    input.field, other
                )));
            }
        }
        Ok(Outcome::Pass)
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }

    fn params(&self) -> &'static [&'static str] {
        &["fieldname"]
    }
}
