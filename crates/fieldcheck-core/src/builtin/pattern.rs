use crate::error::ConfigError;
use crate::validator::{arg, FieldInput, Outcome, Validator};
use crate::value::Value;
use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

// Non-ASCII letters accepted in addresses.
const UCS: &str = r"\x{A0}-\x{D7FF}\x{F900}-\x{FDCF}\x{FDF0}-\x{FFEF}";

static URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(ftp|rtmp|git|https?)://(\w+:?\w*@)?(\S+)(:[0-9]+)?(/|/([\w#!:.?+=&%@\-/]))?$")
        .expect("url pattern compiles")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    let atom = [r"[a-z0-9!#$%&'*+\-/=?^_`{|}~", UCS, "]"].concat();
    let dot_atom = [atom.as_str(), r"+(\.", atom.as_str(), "+)*"].concat();

    let fws = r"(([ \t]*\r\n)?[ \t]+)?";
    let qtext = [r"[\x01-\x08\x0b\x0c\x0e-\x1f\x7f\x21\x23-\x5b\x5d-\x7e", UCS, "]"].concat();
    let qpair = [r"\\[\x01-\x09\x0b\x0c\x0d-\x7f", UCS, "]"].concat();
    let quoted = [
        r"\x22(",
        fws,
        "(",
        qtext.as_str(),
        "|",
        qpair.as_str(),
        "))*",
        fws,
        r"\x22",
    ]
    .concat();

    let alnum = ["[a-z0-9", UCS, "]"].concat();
    let alpha = ["[a-z", UCS, "]"].concat();
    let inner = [r"[a-z0-9\-._~", UCS, "]"].concat();
    let label = [
        "(",
        alnum.as_str(),
        "|",
        alnum.as_str(),
        inner.as_str(),
        "*",
        alnum.as_str(),
        ")",
    ]
    .concat();
    let tld = [
        "(",
        alpha.as_str(),
        "|",
        alpha.as_str(),
        inner.as_str(),
        "*",
        alpha.as_str(),
        ")",
    ]
    .concat();

    let full = [
        "(?i)^(",
        dot_atom.as_str(),
        "|",
        quoted.as_str(),
        ")@(",
        label.as_str(),
        r"\.)+",
        tld.as_str(),
        r"\.?$",
    ]
    .concat();
    Regex::new(&full).expect("email pattern compiles")
});

// `regex:` patterns compiled so far, keyed by source
static COMPILED: Lazy<ArcSwap<HashMap<String, Regex>>> =
    Lazy::new(|| ArcSwap::from_pointee(HashMap::new()));

fn compiled(source: &str) -> Result<Regex, ConfigError> {
    if let Some(pattern) = COMPILED.load().get(source) {
        return Ok(pattern.clone());
    }

    let pattern = Regex::new(source).map_err(|e| ConfigError::InvalidPattern {
        pattern: source.to_string(),
        source: e,
    })?;
    COMPILED.rcu(|current| {
        let mut next = HashMap::clone(current);
        next.insert(source.to_string(), pattern.clone());
        next
    });
    Ok(pattern)
}

fn matches(value: &Value, pattern: &Regex) -> bool {
    value.as_text().map_or(false, |text| pattern.is_match(&text))
}

/// `url`: ftp, rtmp, git, http or https URLs.
///
/// The pattern is anchored at both ends: the whole value must be a URL, so
/// text that merely contains one (`see http://example.com today`) and URLs
/// with embedded spaces fail.
pub struct UrlValidator;

impl Validator for UrlValidator {
    fn check(&self, input: &FieldInput<'_>, _args: &[String]) -> Result<Outcome, ConfigError> {
        match input.value {
            Some(value) if !value.is_empty() && !matches(value, &URL) => Ok(Outcome::fail(
                format!("Field `{}` must be a valid URL.", input.field),
            )),
            _ => Ok(Outcome::Pass),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// `email`: RFC 5322-style addresses, including quoted local parts
pub struct EmailValidator;

impl Validator for EmailValidator {
    fn check(&self, input: &FieldInput<'_>, _args: &[String]) -> Result<Outcome, ConfigError> {
        match input.value {
            Some(value) if !value.is_empty() && !matches(value, &EMAIL) => Ok(Outcome::fail(
                format!("Field `{}` must be a valid email address.", input.field),
            )),
            _ => Ok(Outcome::Pass),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(0)
    }
}

/// `regex:pattern`: the pattern is everything after the first colon
pub struct RegexValidator;

impl Validator for RegexValidator {
    fn check(&self, input: &FieldInput<'_>, args: &[String]) -> Result<Outcome, ConfigError> {
        let source = arg(args, 0).ok_or_else(|| ConfigError::missing("regex", "pattern"))?;
        let pattern = compiled(source)?;

        match input.value {
            Some(value) if !value.is_empty() && !matches(value, &pattern) => {
                Ok(Outcome::fail(format!(
                    "Field `{}` does not match regexp: `/{}/`.",
                    input.field, source
                )))
            }
            _ => Ok(Outcome::Pass),
        }
    }

    fn max_args(&self) -> Option<usize> {
        Some(1)
    }

    fn params(&self) -> &'static [&'static str] {
        &["pattern"]
    }
}
