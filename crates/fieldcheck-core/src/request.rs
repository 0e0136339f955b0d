//! Framework-free request inputs.
//!
//! HTTP layers hand over the three records a request carries; each can be
//! validated on its own against a rule set.

use crate::engine::{Engine, RuleSet};
use crate::error::ConfigError;
use crate::report::Report;
use crate::value::{record_from_json, Record};
use serde::{Deserialize, Serialize};

/// Route parameters, parsed body and query string of one request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestInputs {
    #[serde(default)]
    pub params: Record,
    #[serde(default)]
    pub body: Record,
    #[serde(default)]
    pub query: Record,
}

impl RequestInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body from a JSON document; non-object bodies are treated as empty.
    pub fn with_json_body(mut self, body: serde_json::Value) -> Self {
        self.body = record_from_json(body).unwrap_or_default();
        self
    }

    pub fn with_query<K, V, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.query = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), crate::value::Value::String(v.into())))
            .collect();
        self
    }

    pub fn with_params<K, V, I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.params = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), crate::value::Value::String(v.into())))
            .collect();
        self
    }

    pub fn validate_params(
        &mut self,
        engine: &Engine,
        rules: &RuleSet,
    ) -> Result<Option<Report>, ConfigError> {
        engine.validate(&mut self.params, rules)
    }

    pub fn validate_body(
        &mut self,
        engine: &Engine,
        rules: &RuleSet,
    ) -> Result<Option<Report>, ConfigError> {
        engine.validate(&mut self.body, rules)
    }

    pub fn validate_query(
        &mut self,
        engine: &Engine,
        rules: &RuleSet,
    ) -> Result<Option<Report>, ConfigError> {
        engine.validate(&mut self.query, rules)
    }
}
