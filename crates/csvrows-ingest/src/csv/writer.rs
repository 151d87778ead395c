//! Serialization of records back to delimited text.

use crate::dialect::Dialect;

/// Formats `values` as a single delimited line without a line terminator.
///
/// A value is qualified when it contains the delimiter, the qualifier or a
/// line break. Qualifiers inside a qualified value are doubled.
pub fn format_record<I, S>(values: I, dialect: Dialect) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut line = String::new();
    for (idx, value) in values.into_iter().enumerate() {
        if idx > 0 {
            line.push(dialect.delimiter);
        }
        push_field(&mut line, value.as_ref(), dialect);
    }
    line
}

fn needs_qualifier(value: &str, dialect: Dialect) -> bool {
    value
        .chars()
        .any(|c| c == dialect.delimiter || c == dialect.qualifier || c == '\n' || c == '\r')
}

fn push_field(line: &mut String, value: &str, dialect: Dialect) {
    if !needs_qualifier(value, dialect) {
        line.push_str(value);
        return;
    }

    line.push(dialect.qualifier);
    for c in value.chars() {
        if c == dialect.qualifier {
            line.push(dialect.qualifier);
        }
        line.push(c);
    }
    line.push(dialect.qualifier);
}
