use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One failed rule on one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureEntry {
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
}

impl FailureEntry {
    pub fn new(kind: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            msg: msg.into(),
        }
    }
}

/// Failures per field. Only fields with at least one failure are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Report {
    fields: BTreeMap<String, Vec<FailureEntry>>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a field's failures; an empty list leaves the report unchanged.
    pub fn insert_field(&mut self, field: impl Into<String>, failures: Vec<FailureEntry>) {
        if failures.is_empty() {
            return;
        }
        self.fields.entry(field.into()).or_default().extend(failures);
    }

    /// `None` when nothing failed, which is how an overall pass is signalled.
    pub fn into_option(self) -> Option<Self> {
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of failing fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Number of failed rules across all fields
    pub fn failure_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum()
    }

    pub fn get(&self, field: &str) -> Option<&[FailureEntry]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn has_failure(&self, field: &str, kind: &str) -> bool {
        self.get(field)
            .map_or(false, |entries| entries.iter().any(|e| e.kind == kind))
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FailureEntry])> {
        self.fields
            .iter()
            .map(|(field, entries)| (field.as_str(), entries.as_slice()))
    }

    /// Pretty-print the report to stdout.
    pub fn print_human(&self) {
        for (field, entries) in self.iter() {
            println!("{}", field.bold());
            for entry in entries {
                println!("  {} {}", format!("[{}]", entry.kind).red().bold(), entry.msg);
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl IntoIterator for Report {
    type Item = (String, Vec<FailureEntry>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<FailureEntry>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<(String, Vec<FailureEntry>)> for Report {
    fn from_iter<I: IntoIterator<Item = (String, Vec<FailureEntry>)>>(iter: I) -> Self {
        let mut report = Report::new();
        for (field, failures) in iter {
            report.insert_field(field, failures);
        }
        report
    }
}
