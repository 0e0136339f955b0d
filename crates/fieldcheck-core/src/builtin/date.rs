use crate::error::ConfigError;
use crate::validator::{FieldInput, Outcome, Validator};
use chrono::{DateTime, TimeZone, Utc};

/// `date[:after[:before]]`: a parseable date, optionally bounded by
/// epoch-millisecond instants. Values equal to a bound pass.
pub struct DateValidator;

impl Validator for DateValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let after = bound(args, 0, "after")?;
        let before = bound(args, 1, "before")?;

        let value = match input.value {
            Some(value) if !value.is_empty() => value,
            _ => return Ok(Outcome::Pass),
        };

        let Some(date) = value.to_date() else {
            return Ok(Outcome::fail(format!(
                "Field `{}` must be a date string or object.",
                input.field
            )));
        };

        if let Some(after) = after {
            if date < after {
                return Ok(Outcome::fail(format!(
                    "Field `{}` must be a date after `{}`.",
                    input.field,
                    utc_string(&after)
                )));
            }
        }
        if let Some(before) = before {
            if date > before {
                return Ok(Outcome::fail(format!(
                    "Field `{}` must be a date prior to `{}`.",
                    input.field,
                    utc_string(&before)
                )));
            }
        }
        Ok(Outcome::Pass)
    }

    fn max_args(&self) -> Option<usize> {
        Some(2)
    }

    fn params(&self) -> &'static [&'static str] {
        &["after?", "before?"]
    }
}

fn bound(
    args: &[String],
    index: usize,
    name: &'static str,
) -> Result<Option<DateTime<Utc>>, ConfigError> {
    let raw = match args.get(index).map(|a| a.trim()) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(None),
    };
    raw.parse::<i64>()
        .ok()
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        .map(Some)
        .ok_or_else(|| ConfigError::InvalidDateBound {
            bound: name,
            value: raw.to_string(),
        })
}

fn utc_string(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::test_support::run;
    use serde_json::json;

    // 2011-04-18T09:03:52Z and 2017-08-19T04:37:12Z
    const EARLY: &str = "1303117432000";
    const LATE: &str = "1503117432000";

    #[test]
    fn unparseable_dates_fail() {
        let outcome = run(&DateValidator, json!({"d": "Text"}), "d", &[]).unwrap();
        assert_eq!(outcome, Outcome::fail("Field `d` must be a date string or object."));
        assert!(run(&DateValidator, json!({"d": true}), "d", &[]).unwrap().is_failure());
    }

    #[test]
    fn iso_strings_and_epoch_numbers_pass() {
        let record = json!({"a": "2015-06-01T12:00:00.000Z", "b": 1433160000000i64});
        assert_eq!(run(&DateValidator, record.clone(), "a", &[]).unwrap(), Outcome::Pass);
        assert_eq!(run(&DateValidator, record, "b", &[]).unwrap(), Outcome::Pass);
    }

    #[test]
    fn after_bound() {
        let record = json!({"d": "2015-06-01T12:00:00Z"});
        assert_eq!(run(&DateValidator, record.clone(), "d", &[EARLY]).unwrap(), Outcome::Pass);

        let outcome = run(&DateValidator, record, "d", &[LATE]).unwrap();
        assert_eq!(
            outcome,
            Outcome::fail("Field `d` must be a date after `Sat, 19 Aug 2017 04:37:12 GMT`.")
        );
    }

    #[test]
    fn before_bound_with_absent_after() {
        let record = json!({"d": "2015-06-01T12:00:00Z"});
        assert_eq!(run(&DateValidator, record.clone(), "d", &["", LATE]).unwrap(), Outcome::Pass);

        let outcome = run(&DateValidator, record, "d", &["", EARLY]).unwrap();
        assert_eq!(
            outcome,
            Outcome::fail("Field `d` must be a date prior to `Mon, 18 Apr 2011 09:03:52 GMT`.")
        );
    }

    #[test]
    fn between_bounds() {
        let inside = json!({"d": "2015-06-01T12:00:00Z"});
        assert_eq!(run(&DateValidator, inside, "d", &[EARLY, LATE]).unwrap(), Outcome::Pass);

        let outside = json!({"d": "2020-01-01T00:00:00Z"});
        assert!(run(&DateValidator, outside, "d", &[EARLY, LATE]).unwrap().is_failure());
    }

    #[test]
    fn malformed_bound_is_a_config_error() {
        let err = run(&DateValidator, json!({"d": "2015-06-01"}), "d", &["yesterday"]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDateBound { bound: "after", .. }));

        // raised even when there is nothing to validate
        assert!(run(&DateValidator, json!({}), "d", &["", "soon"]).is_err());
    }
}
