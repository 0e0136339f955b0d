//! Rule token grammar: `name(':' argument)*`.
//!
//! Arguments are positional and empty segments are kept, so `num::20` carries an
//! explicitly absent minimum. A validator may cap its argument count; the last
//! argument then absorbs any remaining colons (`regex:^\d{2}:\d{2}$` has a single
//! argument).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed rule token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleToken {
    pub name: String,
    pub args: Vec<String>,
}

impl RuleToken {
    /// Parse with every segment becoming its own argument.
    pub fn parse(token: &str) -> Self {
        Self::parse_with_arity(token, None)
    }

    /// Parse with at most `max_args` arguments.
    pub fn parse_with_arity(token: &str, max_args: Option<usize>) -> Self {
        let (name, rest) = split_name(token);
        let args = match rest {
            None => Vec::new(),
            Some(rest) => split_args(rest, max_args),
        };
        Self {
            name: name.to_string(),
            args,
        }
    }
}

/// Validator name of a token, without touching its arguments.
pub fn split_name(token: &str) -> (&str, Option<&str>) {
    match token.split_once(':') {
        Some((name, rest)) => (name, Some(rest)),
        None => (token, None),
    }
}

fn split_args(rest: &str, max_args: Option<usize>) -> Vec<String> {
    match max_args {
        Some(0) => Vec::new(),
        Some(n) => rest.splitn(n, ':').map(str::to_string).collect(),
        None => rest.split(':').map(str::to_string).collect(),
    }
}

impl fmt::Display for RuleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for arg in &self.args {
            write!(f, ":{}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_has_no_args() {
        let token = RuleToken::parse("required");
        assert_eq!(token.name, "required");
        assert!(token.args.is_empty());
    }

    #[test]
    fn empty_segments_are_preserved() {
        let token = RuleToken::parse("num::20");
        assert_eq!(token.name, "num");
        assert_eq!(token.args, vec!["".to_string(), "20".to_string()]);
    }

    #[test]
    fn trailing_colon_yields_empty_argument() {
        let token = RuleToken::parse("sameAs:");
        assert_eq!(token.args, vec!["".to_string()]);
    }

    #[test]
    fn last_argument_absorbs_remaining_colons() {
        let token = RuleToken::parse_with_arity(r"regex:^\d{2}:\d{2}$", Some(1));
        assert_eq!(token.args, vec![r"^\d{2}:\d{2}$".to_string()]);

        let token = RuleToken::parse_with_arity("date:1:2:3", Some(2));
        assert_eq!(token.args, vec!["1".to_string(), "2:3".to_string()]);
    }

    #[test]
    fn zero_arity_drops_arguments() {
        let token = RuleToken::parse_with_arity("url:ignored", Some(0));
        assert!(token.args.is_empty());
    }

    #[test]
    fn display_restores_token() {
        assert_eq!(RuleToken::parse("num::20").to_string(), "num::20");
    }
}
