use crate::error::ConfigError;
use crate::validator::{FieldInput, Outcome, Validator};
use crate::value::Value;

/// `bool`: accepts booleans, `true`/`false` in any case, and 0/1.
/// Accepted values are normalized to a real boolean in the record.
pub struct BoolValidator;

impl Validator for BoolValidator {
    fn check(&self, input: &FieldInput<'_>, _args: &[String]) -> Result<Outcome, ConfigError> {
        let value = match input.value {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(Outcome::Pass),
        };

        match coerce_bool(value) {
            Some(b) => Ok(Outcome::Normalize(Value::Bool(b))),
            None => Ok(Outcome::fail(format!(
                "Field `{}` must be a boolean value.",
                input.field
            ))),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.trim().eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.trim().eq_ignore_ascii_case("false") => Some(false),
        Value::String(_) | Value::Number(_) => match value.to_number() {
            Some(n) if n == 1.0 => Some(true),
            Some(n) if n == 0.0 => Some(false),
            _ => None,
        },
        _ => None,
    }
}
