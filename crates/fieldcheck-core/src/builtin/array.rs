use crate::error::ConfigError;
use crate::validator::{FieldInput, Outcome, Validator};
use crate::value::Value;

/// `array`: set values must be arrays
pub struct ArrayValidator;

impl Validator for ArrayValidator {
    fn check(&self, input: &FieldInput<'_>, _args: &[String]) -> Result<Outcome, ConfigError> {
        match input.value {
            Some(value) if !value.is_empty() && !matches!(value, Value::Array(_)) => Ok(
                Outcome::fail(format!("Field `{}` must be an array.", input.field)),
            ),
            _ => Ok(Outcome::Pass),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}
