//! Recipe catalog
//!
//! The ordered list of recipe names that queries resolve against. Built once
//! at startup and never mutated; a new catalog means a new index.

pub mod source;

pub use source::CatalogSource;

use crate::{Error, Result};
use std::io::Read;

/// Column holding the recipe name in tabular sources
pub const NAME_COLUMN: &str = "name";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCatalog {
    names: Vec<String>,
}

impl RecipeCatalog {
    /// Build a catalog, dropping empty names and keeping order and duplicates
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names = names
            .into_iter()
            .map(Into::into)
            .filter(|name: &String| !name.is_empty())
            .collect();

        Self { names }
    }

    /// Read a CSV document with a header row containing a `name` column
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| Error::CatalogLoad(format!("Failed to read CSV header: {e}")))?;

        let name_idx = headers
            .iter()
            .position(|h| h.trim() == NAME_COLUMN)
            .ok_or_else(|| {
                Error::CatalogLoad(format!("Missing required column '{NAME_COLUMN}'"))
            })?;

        let mut names = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| Error::CatalogLoad(format!("Malformed CSV row {}: {e}", row + 1)))?;
            if let Some(name) = record.get(name_idx) {
                names.push(name.to_string());
            }
        }

        Ok(Self::new(names))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
