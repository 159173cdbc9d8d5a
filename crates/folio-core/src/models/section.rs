//! Content sections and their persisted document shapes.
//!
//! Each section is stored as one document keyed by the section name. Singleton
//! sections persist their fields flat (`{ field: value, ... }`); list sections
//! persist wrapped as `{ "data": [...] }`. The wrap/unwrap helpers are the only
//! place that convention lives.

use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;

/// Whether a section holds a single object or a list of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Singleton,
    List,
}

/// The content sections of the portfolio site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Profile,
    Skills,
    Projects,
    Experience,
    Stats,
    Settings,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Profile,
        Section::Skills,
        Section::Projects,
        Section::Experience,
        Section::Stats,
        Section::Settings,
    ];

    /// Document name the section is stored under.
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Profile => "profile",
            Section::Skills => "skills",
            Section::Projects => "projects",
            Section::Experience => "experience",
            Section::Stats => "stats",
            Section::Settings => "settings",
        }
    }

    pub fn kind(&self) -> SectionKind {
        match self {
            Section::Profile | Section::Settings => SectionKind::Singleton,
            Section::Skills | Section::Projects | Section::Experience | Section::Stats => {
                SectionKind::List
            }
        }
    }

    /// Wrap an in-memory section value into its persisted document shape.
    pub fn wrap_payload(&self, value: Value) -> Value {
        match self.kind() {
            SectionKind::Singleton => value,
            SectionKind::List => json!({ "data": value }),
        }
    }

    /// Extract the in-memory section value from a persisted document.
    ///
    /// A list document missing its `data` field yields an empty list.
    pub fn unwrap_payload(&self, document: Value) -> Value {
        match self.kind() {
            SectionKind::Singleton => document,
            SectionKind::List => match document {
                Value::Object(mut map) => map.remove("data").unwrap_or_else(|| json!([])),
                _ => json!([]),
            },
        }
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "profile" => Ok(Section::Profile),
            "skills" => Ok(Section::Skills),
            "projects" => Ok(Section::Projects),
            "experience" => Ok(Section::Experience),
            "stats" => Ok(Section::Stats),
            "settings" => Ok(Section::Settings),
            other => Err(format!("Unknown content section: {}", other)),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
