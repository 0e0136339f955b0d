//! Declarative field validation.
//!
//! A [`RuleSet`] maps field names to rule tokens such as `required`,
//! `num:10:20` or `sameAs:password`. [`Engine::validate`] runs every token
//! against the matching field of a [`Record`] and returns a [`Report`] of
//! failures, or `None` when everything passed. Custom validators are added to
//! a [`Catalogue`] by name.

pub mod builtin;
pub mod catalogue;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod report;
pub mod request;
pub mod token;
pub mod validator;
pub mod value;

pub use builtin::Builtin;
pub use catalogue::Catalogue;
pub use config::{EngineConfig, UnknownRules};
pub use engine::{Engine, RuleSet};
pub use error::ConfigError;
pub use evaluator::FieldEvaluator;
pub use report::{FailureEntry, Report};
pub use request::RequestInputs;
pub use token::RuleToken;
pub use validator::{FieldInput, FnValidator, Outcome, Validator};
pub use value::{record_from_json, record_to_json, Record, Value};

/// Validate against the process-wide catalogue
pub fn validate(input: &mut Record, rules: &RuleSet) -> Result<Option<Report>, ConfigError> {
    Engine::global().validate(input, rules)
}

/// Register a closure in the process-wide catalogue
pub fn register<F>(name: &str, f: F) -> Result<(), ConfigError>
where
    F: Fn(&FieldInput<'_>, &[String]) -> Result<Outcome, ConfigError> + Send + Sync + 'static,
{
    Catalogue::global().register_fn(name, f)
}
