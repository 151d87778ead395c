//! Parsed document model: header-aligned rows of text pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::csv::format_record;
use crate::dialect::Dialect;

/// A single header name paired with the cell value at the same position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub key: String,
    pub value: String,
}

/// One data record aligned against the header.
///
/// Always holds exactly one pair per header column, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pairs: Vec<Pair>,
}

impl Row {
    /// Builds a row by zipping `values` against `header`.
    ///
    /// Missing trailing values become empty strings and values beyond the
    /// header width are dropped.
    pub fn aligned(header: &[String], values: &[String]) -> Self {
        let pairs = header
            .iter()
            .enumerate()
            .map(|(idx, key)| Pair {
                key: key.clone(),
                value: values.get(idx).cloned().unwrap_or_default(),
            })
            .collect();
        Self { pairs }
    }

    /// Returns the number of pairs (equal to the header width).
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if the row has no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates `(key, value)` pairs in header order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|pair| (pair.key.as_str(), pair.value.as_str()))
    }

    /// The pairs in header order.
    pub fn pairs(&self) -> &[Pair] {
        &self.pairs
    }

    /// Iterates values in header order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|pair| pair.value.as_str())
    }

    /// Returns the value of the first column named `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| pair.value.as_str())
    }

    /// Serializes the row's values as one delimited line (no terminator).
    pub fn to_line(&self, dialect: Dialect) -> String {
        format_record(self.values(), dialect)
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// Non-fatal observations made while assembling a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The header cell at `column` (1-indexed) is empty.
    MissingHeaderField { column: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHeaderField { column } => {
                write!(f, "missing header at column {column}")
            }
        }
    }
}

/// A fully parsed delimited text source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    header: Vec<String>,
    rows: Vec<Row>,
    diagnostics: Vec<Diagnostic>,
}

impl Document {
    pub(crate) fn new(header: Vec<String>, rows: Vec<Row>, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            header,
            rows,
            diagnostics,
        }
    }

    /// Header names in column order. Empty when no header was found.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Rows in source order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Iterates rows in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if there are no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Diagnostics collected during header acquisition.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl IntoIterator for Document {
    type Item = Row;
    type IntoIter = std::vec::IntoIter<Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn test_aligned_pads_short_values() {
        let row = Row::aligned(&strings(&["a", "b", "c"]), &strings(&["1", "2"]));
        let pairs: Vec<_> = row.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "")]);
    }

    #[test]
    fn test_aligned_truncates_long_values() {
        let row = Row::aligned(&strings(&["a"]), &strings(&["1", "2", "3"]));
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a"), Some("1"));
    }

    #[test]
    fn test_get_returns_first_duplicate() {
        let row = Row::aligned(&strings(&["id", "id"]), &strings(&["1", "2"]));
        assert_eq!(row.get("id"), Some("1"));
        assert_eq!(row.values().collect::<Vec<_>>(), vec!["1", "2"]);
    }

    #[test]
    fn test_empty_header_gives_empty_row() {
        let row = Row::aligned(&[], &strings(&["1"]));
        assert!(row.is_empty());
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::MissingHeaderField { column: 3 };
        assert_eq!(diagnostic.to_string(), "missing header at column 3");
    }

    #[test]
    fn test_row_to_line_quotes_when_needed() {
        let row = Row::aligned(&strings(&["a", "b"]), &strings(&["x,y", "z"]));
        assert_eq!(row.to_line(Dialect::default()), "\"x,y\",z");
    }
}
