use crate::error::ConfigError;
use crate::validator::{FieldInput, Outcome, Validator};
use crate::value::{format_number, parse_number};
use tracing::debug;

/// `num[:min[:max]]`: numeric, and within the bounds that are given
pub struct NumValidator;

impl Validator for NumValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let value = match input.value {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(Outcome::Pass),
        };

        let Some(n) = value.to_number() else {
            return Ok(Outcome::fail(format!(
                "Field `{}` is not a number.",
                input.field
            )));
        };

        if let Some(min) = bound(args, 0) {
            if n < min {
                return Ok(Outcome::fail(format!(
                    "Field `{}` is less than the minimum value of `{}`.",
                    input.field,
                    format_number(min)
                )));
            }
        }
        if let Some(max) = bound(args, 1) {
            if n > max {
                return Ok(Outcome::fail(format!(
                    "Field `{}` is greater than the maximum value of `{}`.",
                    input.field,
                    format_number(max)
                )));
            }
        }
        Ok(Outcome::Pass)
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }

    fn params(&self) -> &'static [&'static str] {
        &["min?", "max?"]
    }
}

// Empty, `null` and unparseable bounds leave that side unchecked.
fn bound(args: &[String], index: usize) -> Option<f64> {
    let raw = args.get(index)?.trim();
    if raw.is_empty() || raw == "null" {
        return None;
    }
    let parsed = parse_number(raw);
    if parsed.is_none() {
        debug!(bound = raw, "ignoring non-numeric `num` bound");
    }
    parsed
}
