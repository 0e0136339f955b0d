use crate::catalogue::Catalogue;
use crate::config::{EngineConfig, UnknownRules};
use crate::error::ConfigError;
use crate::evaluator::FieldEvaluator;
use crate::report::Report;
use crate::validator::{FieldInput, Outcome, Validator};
use crate::value::Record;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Field name to its rule tokens, in evaluation order
pub type RuleSet = BTreeMap<String, Vec<String>>;

/// Validation entry point. Holds no per-call state; clones share the catalogue.
#[derive(Debug, Clone)]
pub struct Engine {
    catalogue: Arc<Catalogue>,
    unknown_rules: UnknownRules,
}

impl Engine {
    /// Engine with its own catalogue of built-in validators
    pub fn new() -> Self {
        Self::with_catalogue(Arc::new(Catalogue::with_builtins()))
    }

    /// Engine over the process-wide catalogue
    pub fn global() -> Self {
        Self::with_catalogue(Catalogue::global())
    }

    pub fn with_catalogue(catalogue: Arc<Catalogue>) -> Self {
        Self {
            catalogue,
            unknown_rules: UnknownRules::default(),
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_unknown_rules(config.engine.unknown_rules)
    }

    pub fn with_unknown_rules(mut self, unknown_rules: UnknownRules) -> Self {
        self.unknown_rules = unknown_rules;
        self
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn register(
        &self,
        name: &str,
        validator: impl Validator + 'static,
    ) -> Result<(), ConfigError> {
        self.catalogue.register(name, validator)
    }

    pub fn register_fn<F>(&self, name: &str, f: F) -> Result<(), ConfigError>
    where
        F: Fn(&FieldInput<'_>, &[String]) -> Result<Outcome, ConfigError> + Send + Sync + 'static,
    {
        self.catalogue.register_fn(name, f)
    }

    /// Validate `input` against `rules`.
    ///
    /// Only fields named in `rules` are checked. Returns `Ok(None)` when every
    /// rule passed. `bool` rules rewrite accepted values in `input`; on `Err`
    /// the record is left as it was.
    pub fn validate(
        &self,
        input: &mut Record,
        rules: &RuleSet,
    ) -> Result<Option<Report>, ConfigError> {
        let evaluator = FieldEvaluator::new(&self.catalogue, self.unknown_rules);
        let mut report = Report::new();
        let mut working = input.clone();

        for (field, tokens) in rules {
            let failures = evaluator.evaluate(&mut working, field, tokens)?;
            report.insert_field(field.as_str(), failures);
        }
        *input = working;

        debug!(
            fields = rules.len(),
            failed_fields = report.len(),
            failures = report.failure_count(),
            "validation finished"
        );
        Ok(report.into_option())
    }

    /// Callback form of [`Engine::validate`]; the callback runs once the whole
    /// rule set has been evaluated.
    pub fn validate_with<F>(
        &self,
        input: &mut Record,
        rules: &RuleSet,
        callback: F,
    ) -> Result<(), ConfigError>
    where
        F: FnOnce(Option<Report>),
    {
        let report = self.validate(input, rules)?;
        callback(report);
        Ok(())
    }

    /// Registered validators with their argument names
    pub fn list_validators(&self) -> Vec<(String, &'static [&'static str])> {
        self.catalogue
            .names()
            .into_iter()
            .filter_map(|name| {
                let params = self.catalogue.get(&name)?.params();
                Some((name, params))
            })
            .collect()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{record_from_json, Value};
    use serde_json::json;

    fn rules(pairs: &[(&str, &[&str])]) -> RuleSet {
        pairs
            .iter()
            .map(|(field, tokens)| {
                (
                    field.to_string(),
                    tokens.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_pass_returns_none() {
        let engine = Engine::new();
        let mut input = record_from_json(json!({"goodField": "goodField"})).unwrap();
        let report = engine
            .validate(&mut input, &rules(&[("goodField", &["required"])]))
            .unwrap();
        assert!(report.is_none());
    }

    #[test]
    fn test_only_ruled_fields_are_checked() {
        let engine = Engine::new();
        let mut input = record_from_json(json!({"a": "not a number", "b": ""})).unwrap();
        let report = engine
            .validate(&mut input, &rules(&[("b", &["required"])]))
            .unwrap()
            .unwrap();
        assert_eq!(report.fields().collect::<Vec<_>>(), vec!["b"]);
    }

    #[test]
    fn test_callback_receives_report() {
        let engine = Engine::new();
        let mut input = Record::new();
        let mut delivered = None;
        engine
            .validate_with(&mut input, &rules(&[("badField", &["required"])]), |report| {
                delivered = report;
            })
            .unwrap();
        assert!(delivered.unwrap().has_failure("badField", "required"));
    }

    #[test]
    fn test_config_error_skips_callback() {
        let engine = Engine::new();
        let mut input = Record::new();
        let mut called = false;
        let result = engine.validate_with(&mut input, &rules(&[("f", &["different"])]), |_| {
            called = true;
        });
        assert!(result.is_err());
        assert!(!called);
    }

    #[test]
    fn test_engines_do_not_share_private_catalogues() {
        let first = Engine::new();
        let second = Engine::new();
        first
            .register_fn("never", |_: &FieldInput<'_>, _: &[String]| Ok(Outcome::fail("never")))
            .unwrap();

        let mut input = record_from_json(json!({"f": 1})).unwrap();
        let set = rules(&[("f", &["never"])]);
        assert!(first.validate(&mut input, &set).unwrap().is_some());
        assert!(second.validate(&mut input, &set).unwrap().is_none());
    }

    #[test]
    fn test_list_validators_includes_params() {
        let listed = Engine::new().list_validators();
        let num = listed.iter().find(|(name, _)| name == "num").unwrap();
        assert_eq!(num.1, &["min?", "max?"]);
        assert_eq!(listed.len(), 12);
    }

    #[test]
    fn test_from_config_applies_unknown_rule_policy() {
        let mut config = EngineConfig::default();
        config.engine.unknown_rules = UnknownRules::Error;
        let engine = Engine::from_config(&config);

        let mut input = record_from_json(json!({"f": "TRUE"})).unwrap();
        assert!(engine
            .validate(&mut input, &rules(&[("f", &["bool", "mystery"])]))
            .is_err());
        assert_eq!(input["f"], Value::String("TRUE".into()));
    }

    #[test]
    fn test_config_error_in_later_field_keeps_record_intact() {
        let engine = Engine::new();
        let mut input = record_from_json(json!({"a": "TRUE", "b": "x"})).unwrap();
        let before = input.clone();

        let err = engine
            .validate(&mut input, &rules(&[("a", &["bool"]), ("b", &["sameAs"])]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingArgument { .. }));
        assert_eq!(input, before);
    }

    #[test]
    fn test_successful_validation_keeps_normalized_values() {
        let engine = Engine::new();
        let mut input = record_from_json(json!({"a": "TRUE", "n": 4})).unwrap();
        let report = engine
            .validate(&mut input, &rules(&[("a", &["bool"]), ("n", &["num:5"])]))
            .unwrap();
        assert!(report.unwrap().has_failure("n", "num"));
        assert_eq!(input["a"], Value::Bool(true));
    }
}
