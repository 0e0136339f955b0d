use crate::validator::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

pub mod array;
pub mod boolean;
pub mod compare;
pub mod date;
pub mod numeric;
pub mod pattern;
pub mod presence;

/// The validators every catalogue starts with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Builtin {
    Required,
    RequiredWith,
    RequiredWithout,
    Array,
    SameAs,
    Different,
    Num,
    Url,
    Email,
    Bool,
    Date,
    Regex,
}

impl Builtin {
    pub const ALL: [Builtin; 12] = [
        Builtin::Required,
        Builtin::RequiredWith,
        Builtin::RequiredWithout,
        Builtin::Array,
        Builtin::SameAs,
        Builtin::Different,
        Builtin::Num,
        Builtin::Url,
        Builtin::Email,
        Builtin::Bool,
        Builtin::Date,
        Builtin::Regex,
    ];

    /// Name used in rule tokens
    pub fn name(self) -> &'static str {
        match self {
            Builtin::Required => "required",
            Builtin::RequiredWith => "requiredWith",
            Builtin::RequiredWithout => "requiredWithout",
            Builtin::Array => "array",
            Builtin::SameAs => "sameAs",
            Builtin::Different => "different",
            Builtin::Num => "num",
            Builtin::Url => "url",
            Builtin::Email => "email",
            Builtin::Bool => "bool",
            Builtin::Date => "date",
            Builtin::Regex => "regex",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn validator(self) -> Arc<dyn Validator> {
        match self {
            Builtin::Required => Arc::new(presence::RequiredValidator),
            Builtin::RequiredWith => Arc::new(presence::RequiredWithValidator),
            Builtin::RequiredWithout => Arc::new(presence::RequiredWithoutValidator),
            Builtin::Array => Arc::new(array::ArrayValidator),
            Builtin::SameAs => Arc::new(compare::SameAsValidator),
            Builtin::Different => Arc::new(compare::DifferentValidator),
            Builtin::Num => Arc::new(numeric::NumValidator),
            Builtin::Url => Arc::new(pattern::UrlValidator),
            Builtin::Email => Arc::new(pattern::EmailValidator),
            Builtin::Bool => Arc::new(boolean::BoolValidator),
            Builtin::Date => Arc::new(date::DateValidator),
            Builtin::Regex => Arc::new(pattern::RegexValidator),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
