use crate::catalogue::Catalogue;
use crate::config::UnknownRules;
use crate::error::ConfigError;
use crate::report::FailureEntry;
use crate::token::{split_name, RuleToken};
use crate::validator::{FieldInput, Outcome};
use crate::value::Record;
use tracing::{debug, trace, warn};

/// Applies one field's rules in order, collecting every failure
pub struct FieldEvaluator<'c> {
    catalogue: &'c Catalogue,
    unknown_rules: UnknownRules,
}

impl<'c> FieldEvaluator<'c> {
    pub fn new(catalogue: &'c Catalogue, unknown_rules: UnknownRules) -> Self {
        Self {
            catalogue,
            unknown_rules,
        }
    }

    /// Every rule runs even after a failure. A `Normalize` outcome rewrites the
    /// field before the next rule sees it.
    pub fn evaluate(
        &self,
        record: &mut Record,
        field: &str,
        rules: &[String],
    ) -> Result<Vec<FailureEntry>, ConfigError> {
        let mut failures = Vec::new();

        for token in rules {
            let (name, _) = split_name(token);
            let Some(validator) = self.catalogue.get(name) else {
                self.on_unknown(name, field)?;
                continue;
            };

            let parsed = RuleToken::parse_with_arity(token, validator.max_args());
            let outcome = validator.check(&FieldInput::new(record, field), &parsed.args)?;
            trace!(field, rule = %parsed, ?outcome, "rule evaluated");

            match outcome {
                Outcome::Pass => {}
                Outcome::Fail(msg) => failures.push(FailureEntry::new(name, msg)),
                Outcome::Normalize(value) => {
                    record.insert(field.to_string(), value);
                }
            }
        }

        Ok(failures)
    }

    fn on_unknown(&self, name: &str, field: &str) -> Result<(), ConfigError> {
        match self.unknown_rules {
            UnknownRules::Ignore => {
                debug!(validator = name, field, "skipping unknown validator");
                Ok(())
            }
            UnknownRules::Warn => {
                warn!(validator = name, field, "skipping unknown validator");
                Ok(())
            }
            UnknownRules::Error => Err(ConfigError::UnknownValidator {
                name: name.to_string(),
                field: field.to_string(),
            }),
        }
    }
}
