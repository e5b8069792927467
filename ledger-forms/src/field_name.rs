//! Names of repeated form controls: `<prefix>-<index>-<field>`, with the
//! element id rendered as `id_<prefix>-<index>-<field>`.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

const ID_PREFIX: &str = "id_";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldNameError {
    #[error("'{0}' does not follow the <prefix>-<index>-<field> convention")]
    Malformed(String),

    #[error("row index in '{0}' is out of range")]
    IndexOutOfRange(String),
}

/// A parsed or to-be-rendered control name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldName {
    pub prefix: String,
    pub index: usize,
    pub field: String,
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Prefixes may contain hyphens (nested forms), field names never do.
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?P<prefix>.+)-(?P<index>[0-9]+)-(?P<field>[^-]+)$")
            .expect("field name pattern is valid")
    })
}

impl FieldName {
    pub fn new(
        prefix: impl Into<String>,
        index: usize,
        field: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            index,
            field: field.into(),
        }
    }

    /// Parses a control `name` attribute such as `details-3-debit`.
    pub fn parse_name(name: &str) -> Result<Self, FieldNameError> {
        let captures = name_pattern()
            .captures(name)
            .ok_or_else(|| FieldNameError::Malformed(name.to_string()))?;

        let index = captures["index"]
            .parse::<usize>()
            .map_err(|_| FieldNameError::IndexOutOfRange(name.to_string()))?;

        Ok(Self {
            prefix: captures["prefix"].to_string(),
            index,
            field: captures["field"].to_string(),
        })
    }

    pub fn name(&self) -> String {
        self.to_string()
    }

    pub fn id(&self) -> String {
        format!("{ID_PREFIX}{self}")
    }
}

impl fmt::Display for FieldName {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}-{}-{}", self.prefix, self.index, self.field)
    }
}
