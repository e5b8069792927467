//! Ordered `(name, value)` pairs of a form submission.
//!
//! On disk a submission is a two-column CSV file:
//!
//! ```csv
//! name,value
//! details-TOTAL_FORMS,2
//! details-0-debit,10.00
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormDataError {
    #[error("form data CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("form data I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize, Serialize)]
struct FieldRecord {
    name: String,
    #[serde(default)]
    value: String,
}

/// A submission in field order. Names may repeat; lookups use the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) {
        self.fields.push((name.into(), value.into()));
    }

    /// Replaces the first field called `name`, or appends it.
    pub fn set(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) {
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((name.to_string(), value)),
        }
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Reads a `name,value` CSV. Surrounding whitespace is trimmed.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, FormDataError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut data = Self::new();
        for result in csv_reader.deserialize() {
            let record: FieldRecord = result?;
            data.push(record.name, record.value);
        }

        Ok(data)
    }

    pub fn from_csv_file(path: &std::path::Path) -> Result<Self, FormDataError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(file)
    }

    pub fn write_csv<W: Write>(
        &self,
        writer: W,
    ) -> Result<(), FormDataError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for (name, value) in self.iter() {
            csv_writer.serialize(FieldRecord {
                name: name.to_string(),
                value: value.to_string(),
            })?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

impl<N, V> FromIterator<(N, V)> for FormData
where
    N: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        }
    }
}
