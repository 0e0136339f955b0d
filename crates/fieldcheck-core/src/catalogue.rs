//! Name → validator mapping consulted by every validation call.

use crate::builtin::Builtin;
use crate::error::ConfigError;
use crate::validator::{FieldInput, FnValidator, Outcome, Validator};
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

type ValidatorMap = HashMap<String, Arc<dyn Validator>>;

static GLOBAL: Lazy<Arc<Catalogue>> = Lazy::new(|| Arc::new(Catalogue::with_builtins()));

/// Registry of named validators.
///
/// Lookups load the current map without locking; registration swaps in an
/// updated copy, so a registration is visible to every later lookup.
pub struct Catalogue {
    validators: ArcSwap<ValidatorMap>,
}

impl Catalogue {
    /// A catalogue with no validators at all
    pub fn empty() -> Self {
        Self {
            validators: ArcSwap::from_pointee(HashMap::new()),
        }
    }

    /// A catalogue holding every built-in validator
    pub fn with_builtins() -> Self {
        let validators: ValidatorMap = Builtin::ALL
            .into_iter()
            .map(|b| (b.name().to_string(), b.validator()))
            .collect();
        debug!("Registered {} built-in validators", validators.len());
        Self {
            validators: ArcSwap::from_pointee(validators),
        }
    }

    /// The process-wide catalogue behind the free `validate`/`register` functions
    pub fn global() -> Arc<Catalogue> {
        Arc::clone(&GLOBAL)
    }

    /// Add or replace a validator. Built-ins can be overridden.
    pub fn register(
        &self,
        name: &str,
        validator: impl Validator + 'static,
    ) -> Result<(), ConfigError> {
        self.register_arc(name, Arc::new(validator))
    }

    /// Register a closure as a validator
    pub fn register_fn<F>(&self, name: &str, f: F) -> Result<(), ConfigError>
    where
        F: Fn(&FieldInput<'_>, &[String]) -> Result<Outcome, ConfigError> + Send + Sync + 'static,
    {
        self.register(name, FnValidator::new(f))
    }

    pub fn register_arc(
        &self,
        name: &str,
        validator: Arc<dyn Validator>,
    ) -> Result<(), ConfigError> {
        if name.is_empty() || name.contains(':') {
            return Err(ConfigError::InvalidName(name.to_string()));
        }

        let mut replaced = false;
        self.validators.rcu(|current| {
            let mut next = HashMap::clone(current);
            replaced = next.insert(name.to_string(), Arc::clone(&validator)).is_some();
            next
        });

        if replaced {
            info!(validator = name, "Replaced existing validator");
        } else {
            debug!(validator = name, "Registered validator");
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Validator>> {
        self.validators.load().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.validators.load().contains_key(name)
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.validators.load().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.validators.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Catalogue {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl std::fmt::Debug for Catalogue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Catalogue")
            .field("validators", &self.names())
            .finish()
    }
}
