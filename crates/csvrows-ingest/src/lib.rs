//! Delimited text ingestion.
//!
//! This crate turns CSV-style text into an ordered [`Document`] of rows, each
//! row holding one `(header, value)` pair per header column.
//!
//! # Features
//!
//! - **Tokenizer**: quote-aware scanning with doubled-qualifier escapes and
//!   quoted fields that span physical lines
//! - **Row Assembly**: first non-blank record becomes the header, data rows
//!   are padded or truncated to the header width
//! - **Writer**: format values back into a delimited line
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use csvrows_ingest::{Dialect, parse};
//!
//! let doc = parse(Cursor::new("a,b,c\n1,2\n"), Dialect::default())?;
//! let pairs: Vec<_> = doc.rows()[0].iter().collect();
//! assert_eq!(pairs, [("a", "1"), ("b", "2"), ("c", "")]);
//! # Ok::<(), csvrows_ingest::IngestError>(())
//! ```

mod csv;
mod dialect;
mod document;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use dialect::{DEFAULT_DELIMITER, DEFAULT_QUALIFIER, Dialect};

// === Document Model ===
pub use document::{Diagnostic, Document, Pair, Row};

// === Reading and Writing ===
pub use crate::csv::{
    Record, RowReader, Tokenizer, format_record, is_blank_record, normalize_field, parse,
    parse_path, split_line,
};
