use crate::error::ConfigError;
use crate::value::{self, Record, Value};

/// What a validator sees for one rule application
#[derive(Debug, Clone, Copy)]
pub struct FieldInput<'a> {
    pub record: &'a Record,
    pub field: &'a str,
    pub value: Option<&'a Value>,
}

impl<'a> FieldInput<'a> {
    pub fn new(record: &'a Record, field: &'a str) -> Self {
        Self {
            record,
            field,
            value: record.get(field),
        }
    }

    /// Absent, null, or the empty string
    pub fn is_empty(&self) -> bool {
        value::is_empty(self.value)
    }

    /// Whether `name` is a key of the record, regardless of its value
    pub fn has_field(&self, name: &str) -> bool {
        self.record.contains_key(name)
    }

    pub fn other(&self, name: &str) -> Option<&'a Value> {
        self.record.get(name)
    }
}

/// Result of one rule application
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail(String),
    /// Passes, and the stored field value is replaced with the given one.
    Normalize(Value),
}

impl Outcome {
    pub fn fail(message: impl Into<String>) -> Self {
        Outcome::Fail(message.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Fail(_))
    }
}

/// Trait that every validator, built-in or registered, implements
pub trait Validator: Send + Sync {
    /// Apply the rule to one field
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError>;

    /// Maximum number of arguments; the last one absorbs any further colons.
    /// `None` passes every colon-separated segment through.
    fn max_args(&self) -> Option<usize> {
        None
    }

    /// Argument names, for listings
    fn params(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Adapter turning a closure into a [`Validator`]
pub struct FnValidator<F> {
    f: F,
    max_args: Option<usize>,
}

impl<F> FnValidator<F>
where
    F: Fn(&FieldInput<'_>, &[String]) -> Result<Outcome, ConfigError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self { f, max_args: None }
    }

    pub fn with_max_args(mut self, max_args: usize) -> Self {
        self.max_args = Some(max_args);
        self
    }
}

impl<F> Validator for FnValidator<F>
where
    F: Fn(&FieldInput<'_>, &[String]) -> Result<Outcome, ConfigError> + Send + Sync,
{
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        (self.f)(input, args)
    }

    fn max_args(&self) -> Option<usize> {
        self.max_args
    }
}

/// Positional argument, `None` when absent or empty
pub(crate) fn arg(args: &[String], index: usize) -> Option<&str> {
    args.get(index).map(String::as_str).filter(|a| !a.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_input_reads_value_and_siblings() {
        let mut record = Record::new();
        record.insert("a".to_string(), Value::from("x"));
        record.insert("b".to_string(), Value::Null);

        let input = FieldInput::new(&record, "a");
        assert!(!input.is_empty());
        assert!(input.has_field("b"));
        assert_eq!(input.other("b"), Some(&Value::Null));

        let missing = FieldInput::new(&record, "c");
        assert!(missing.is_empty());
    }

    #[test]
    fn closures_become_validators() {
        let validator = FnValidator::new(|input: &FieldInput<'_>, _args: &[String]| {
            Ok(if input.is_empty() {
                Outcome::fail("empty")
            } else {
                Outcome::Pass
            })
        });
        let record = Record::new();
        let outcome = validator.check(&FieldInput::new(&record, "x"), &[]).unwrap();
        assert!(outcome.is_failure());
        assert_eq!(validator.max_args(), None);
    }
}
