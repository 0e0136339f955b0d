use crate::error::ConfigError;
use crate::validator::{arg, FieldInput, Outcome, Validator};

/// `required`: fails on absent, null, or empty-string values
pub struct RequiredValidator;

impl Validator for RequiredValidator {
    fn check(&self, input: &FieldInput<'_>, _args: &[String]) -> Result<Outcome, ConfigError> {
        if input.is_empty() {
            return Ok(Outcome::fail(format!(
                "Field `{}` is required.",
                input.field
            )));
        }
        Ok(Outcome::Pass)
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// `requiredWith:other`: required whenever `other` is a key of the record
pub struct RequiredWithValidator;

impl Validator for RequiredWithValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let other = arg(args, 0).ok_or_else(|| ConfigError::missing("requiredWith", "fieldname"))?;

        if input.has_field(other) && input.is_empty() {
            return Ok(Outcome::fail(format!(
                "Field `{}` is required with field `{}`.",
                input.field, other
            )));
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

/// `requiredWithout:other`: required whenever `other` is not a key of the record
pub struct RequiredWithoutValidator;

impl Validator for RequiredWithoutValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let other =
            arg(args, 0).ok_or_else(|| ConfigError::missing("requiredWithout", "fieldname"))?;

        if !input.has_field(other) && input.is_empty() {
            return Ok(Outcome::fail(format!(
                "Field `{}` is required without field `{}`.",
                input.field, other
            )));
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
