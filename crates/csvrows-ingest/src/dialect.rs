//! Delimiter and qualifier configuration.

use serde::{Deserialize, Serialize};

/// Default field delimiter.
pub const DEFAULT_DELIMITER: char = ',';

/// Default text qualifier (quote character).
pub const DEFAULT_QUALIFIER: char = '"';

/// The pair of single characters that define a delimited text format.
///
/// The delimiter and qualifier are expected to differ. This is not checked;
/// when they coincide the qualifier interpretation wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialect {
    /// Separates fields outside a quoted section.
    pub delimiter: char,
    /// Opens and closes a quoted section; doubled inside one for a literal.
    pub qualifier: char,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            qualifier: DEFAULT_QUALIFIER,
        }
    }
}

impl Dialect {
    /// Creates a dialect from an explicit delimiter and qualifier.
    pub fn new(delimiter: char, qualifier: char) -> Self {
        Self {
            delimiter,
            qualifier,
        }
    }

    /// Set the field delimiter.
    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the text qualifier.
    #[must_use]
    pub fn with_qualifier(mut self, qualifier: char) -> Self {
        self.qualifier = qualifier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_dialect() {
        let dialect = Dialect::default();
        assert_eq!(dialect.delimiter, ',');
        assert_eq!(dialect.qualifier, '"');
    }

    #[test]
    fn test_builder_overrides() {
        let dialect = Dialect::default().with_delimiter(';').with_qualifier('\'');
        assert_eq!(dialect, Dialect::new(';', '\''));
    }
}
