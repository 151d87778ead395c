//! Quote-aware record tokenizer.
//!
//! A logical record is read from one or more physical lines. A quoted field
//! that contains a line break keeps the record open, and the break is folded
//! into a single space.

use std::io::BufRead;

use tracing::{debug, trace};

use crate::dialect::Dialect;
use crate::error::{IngestError, Result};

/// One logical record: trimmed fields in source order.
pub type Record = Vec<String>;

const UTF8_BOM: char = '\u{feff}';

/// ASCII whitespace as classified by C `isspace`, vertical tab included.
fn is_field_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0b' | '\x0c' | '\r')
}

/// Trims leading and trailing ASCII whitespace from a field.
pub fn normalize_field(value: &str) -> String {
    value.trim_matches(is_field_space).to_string()
}

/// Returns true when every field of the record is empty.
pub fn is_blank_record(record: &[String]) -> bool {
    record.iter().all(String::is_empty)
}

/// Splits a single line into fields without reading continuation lines.
///
/// A quote left open at the end of `line` swallows the rest of the line.
pub fn split_line(line: &str, dialect: Dialect) -> Record {
    let mut scanner = FieldScanner::new(dialect);
    scanner.scan_line(line);
    scanner.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Unquoted,
    Quoted,
}

/// Character-level state machine shared by every tokenizer entry point.
#[derive(Debug)]
struct FieldScanner {
    dialect: Dialect,
    state: ScanState,
    fields: Record,
    current: String,
}

impl FieldScanner {
    fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            state: ScanState::Unquoted,
            fields: Vec::new(),
            current: String::new(),
        }
    }

    fn scan_line(&mut self, line: &str) {
        let Dialect {
            delimiter,
            qualifier,
        } = self.dialect;
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            match self.state {
                ScanState::Unquoted if c == qualifier => {
                    self.state = ScanState::Quoted;
                }
                ScanState::Unquoted if c == delimiter => {
                    self.finish_field();
                }
                ScanState::Quoted if c == qualifier => {
                    // Doubled qualifier is a literal one
                    if chars.peek() == Some(&qualifier) {
                        self.current.push(qualifier);
                        chars.next();
                    } else {
                        self.state = ScanState::Unquoted;
                    }
                }
                _ => self.current.push(c),
            }
        }
    }

    fn is_quoted(&self) -> bool {
        self.state == ScanState::Quoted
    }

    /// Joins the next physical line onto an open quoted field.
    fn break_line(&mut self) {
        if !self.current.is_empty() && !self.current.ends_with(' ') {
            self.current.push(' ');
        }
    }

    fn finish_field(&mut self) {
        self.fields.push(normalize_field(&self.current));
        self.current.clear();
    }

    fn finish(mut self) -> Record {
        self.finish_field();
        self.fields
    }
}

/// Reads logical records from a line-oriented source.
///
/// Each call to [`Tokenizer::next_record`] consumes exactly the physical lines
/// that make up one record. Line terminators (`\n` or `\r\n`) are not part of
/// the scanned content.
#[derive(Debug)]
pub struct Tokenizer<R> {
    reader: R,
    dialect: Dialect,
    buffer: Vec<u8>,
    lines_read: u64,
}

impl<R: BufRead> Tokenizer<R> {
    /// Create a tokenizer over `reader`.
    pub fn new(reader: R, dialect: Dialect) -> Self {
        Self {
            reader,
            dialect,
            buffer: Vec::new(),
            lines_read: 0,
        }
    }

    /// Number of physical lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Reads the next logical record.
    ///
    /// Returns `Ok(None)` once the source is exhausted. A quoted field that is
    /// still open at end of input is closed implicitly.
    pub fn next_record(&mut self) -> Result<Option<Record>> {
        let Some(first) = self.read_physical_line()? else {
            return Ok(None);
        };
        let start_line = self.lines_read;

        let mut scanner = FieldScanner::new(self.dialect);
        scanner.scan_line(&first);

        while scanner.is_quoted() {
            scanner.break_line();
            match self.read_physical_line()? {
                Some(line) => scanner.scan_line(&line),
                None => {
                    debug!(
                        line = start_line,
                        "quoted field not closed before end of input"
                    );
                    break;
                }
            }
        }

        let record = scanner.finish();
        trace!(
            line = start_line,
            physical_lines = self.lines_read - start_line + 1,
            fields = record.len(),
            "record tokenized"
        );
        Ok(Some(record))
    }

    fn read_physical_line(&mut self) -> Result<Option<String>> {
        self.buffer.clear();
        let read = self
            .reader
            .read_until(b'\n', &mut self.buffer)
            .map_err(|source| IngestError::Read { source })?;
        if read == 0 {
            return Ok(None);
        }

        let mut content = self.buffer.as_slice();
        if let Some(stripped) = content.strip_suffix(b"\n") {
            content = stripped;
            if let Some(stripped) = content.strip_suffix(b"\r") {
                content = stripped;
            }
        }

        let decoded = String::from_utf8_lossy(content);
        let line = if self.lines_read == 0 {
            decoded.strip_prefix(UTF8_BOM).unwrap_or(&decoded).to_string()
        } else {
            decoded.into_owned()
        };
        self.lines_read += 1;
        Ok(Some(line))
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn records(input: &str) -> Vec<Record> {
        Tokenizer::new(Cursor::new(input), Dialect::default())
            .collect::<Result<Vec<_>>>()
            .unwrap()
    }

    #[test]
    fn test_normalize_field() {
        assert_eq!(normalize_field("  hello  "), "hello");
        assert_eq!(normalize_field("\thello\r"), "hello");
        assert_eq!(normalize_field("hello"), "hello");
    }

    #[test]
    fn test_normalize_field_strips_vertical_tab_and_form_feed() {
        assert_eq!(normalize_field("\x0bx\x0b"), "x");
        assert_eq!(normalize_field("\x0c y \x0b"), "y");
        assert_eq!(normalize_field("\x0b"), "");
    }

    #[test]
    fn test_split_line_simple() {
        let result = split_line("a,b,c", Dialect::default());
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_line_quoted() {
        let result = split_line("\"hello, world\",b,c", Dialect::default());
        assert_eq!(result, vec!["hello, world", "b", "c"]);
    }

    #[test]
    fn test_split_line_escaped_quotes() {
        let result = split_line("\"He said \"\"hi\"\"\"", Dialect::default());
        assert_eq!(result, vec!["He said \"hi\""]);
    }

    #[test]
    fn test_split_line_trimmed() {
        let result = split_line("  abc  ,  b  ", Dialect::default());
        assert_eq!(result, vec!["abc", "b"]);
    }

    #[test]
    fn test_split_line_empty_has_one_field() {
        assert_eq!(split_line("", Dialect::default()), vec![""]);
        assert_eq!(split_line(",", Dialect::default()), vec!["", ""]);
    }

    #[test]
    fn test_split_line_custom_dialect() {
        let dialect = Dialect::new(';', '\'');
        let result = split_line("'a;b';'it''s';\"x\"", dialect);
        assert_eq!(result, vec!["a;b", "it's", "\"x\""]);
    }

    #[test]
    fn test_qualifier_inside_unquoted_field_toggles() {
        let result = split_line("ab\"c,d\"e,f", Dialect::default());
        assert_eq!(result, vec!["abc,de", "f"]);
    }

    #[test]
    fn test_is_blank_record() {
        assert!(is_blank_record(&split_line("  ,\t, ", Dialect::default())));
        assert!(!is_blank_record(&split_line(" ,x", Dialect::default())));
    }

    #[test]
    fn test_multiline_quoted_field_folds_to_space() {
        let result = records("\"line1\nline2\",next\n");
        assert_eq!(result, vec![vec!["line1 line2", "next"]]);
    }

    #[test]
    fn test_multiline_with_blank_physical_line() {
        let result = records("\"a\n\nb\"\n");
        assert_eq!(result, vec![vec!["a b"]]);
    }

    #[test]
    fn test_crlf_terminators_are_stripped() {
        let result = records("a,b\r\n\"x\r\ny\",z\r\n");
        assert_eq!(result, vec![vec!["a", "b"], vec!["x y", "z"]]);
    }

    #[test]
    fn test_unterminated_quote_is_accepted() {
        let result = records("a,\"open\nstill open");
        assert_eq!(result, vec![vec!["a", "open still open"]]);
    }

    #[test]
    fn test_no_phantom_record_after_final_newline() {
        assert_eq!(records("a\nb\n").len(), 2);
        assert_eq!(records("a\nb").len(), 2);
        assert!(records("").is_empty());
    }

    #[test]
    fn test_blank_lines_are_records() {
        let result = records("a\n\nb\n");
        assert_eq!(result, vec![vec!["a"], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_bom_is_stripped_from_first_line_only() {
        let result = records("\u{feff}A,B\n\u{feff}C\n");
        assert_eq!(result[0], vec!["A", "B"]);
        assert_eq!(result[1], vec!["\u{feff}C"]);
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let mut tokenizer = Tokenizer::new(Cursor::new(b"a,\xff\n".to_vec()), Dialect::default());
        let record = tokenizer.next_record().unwrap().unwrap();
        assert_eq!(record, vec!["a", "\u{fffd}"]);
    }

    #[test]
    fn test_lines_read_counts_physical_lines() {
        let mut tokenizer = Tokenizer::new(Cursor::new("\"a\nb\"\nc\n"), Dialect::default());
        tokenizer.next_record().unwrap();
        assert_eq!(tokenizer.lines_read(), 2);
        tokenizer.next_record().unwrap();
        assert_eq!(tokenizer.lines_read(), 3);
        assert!(tokenizer.next_record().unwrap().is_none());
    }
}
