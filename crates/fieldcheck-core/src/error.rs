/// Rule-set authoring mistakes. These abort a validation call and are never
/// reported as field failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Validator `{validator}` requires a `{param}` parameter")]
    MissingArgument {
        validator: String,
        param: &'static str,
    },

    #[error("Validator `date` requires a proper date format for the `{bound}` parameter, got `{value}`")]
    InvalidDateBound { bound: &'static str, value: String },

    #[error("Validator `regex` received an invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid validator name `{0}`: names must be non-empty and must not contain `:`")]
    InvalidName(String),

    #[error("Unknown validator `{name}` referenced by field `{field}`")]
    UnknownValidator { name: String, field: String },
}

impl ConfigError {
    pub fn missing(validator: &str, param: &'static str) -> Self {
        ConfigError::MissingArgument {
            validator: validator.to_string(),
            param,
        }
    }
}
