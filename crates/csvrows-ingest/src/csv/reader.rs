//! Row assembly: header acquisition and header-aligned data rows.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::dialect::Dialect;
use crate::document::{Diagnostic, Document, Row};
use crate::error::{IngestError, Result};

use super::tokenizer::{Record, Tokenizer, is_blank_record};

/// Lazily assembles rows from a delimited text source.
///
/// The header is acquired when the reader is created; rows are produced on
/// demand, one logical record at a time.
#[derive(Debug)]
pub struct RowReader<R> {
    tokenizer: Tokenizer<R>,
    header: Vec<String>,
    diagnostics: Vec<Diagnostic>,
    rows_read: usize,
}

impl<R: BufRead> RowReader<R> {
    /// Creates a reader and consumes records up to and including the header.
    ///
    /// Blank records before the header are skipped. When the source holds no
    /// non-blank record the header is empty and no rows are produced.
    pub fn new(reader: R, dialect: Dialect) -> Result<Self> {
        let mut tokenizer = Tokenizer::new(reader, dialect);
        let header = acquire_header(&mut tokenizer)?.unwrap_or_default();
        let diagnostics = header_diagnostics(&header);

        for diagnostic in &diagnostics {
            tracing::warn!("{diagnostic}");
        }

        Ok(Self {
            tokenizer,
            header,
            diagnostics,
            rows_read: 0,
        })
    }

    /// Header names in column order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Diagnostics raised while acquiring the header.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Reads the next data row.
    ///
    /// Every record after the header becomes a row, including blank ones.
    pub fn next_row(&mut self) -> Result<Option<Row>> {
        let Some(record) = self.tokenizer.next_record()? else {
            return Ok(None);
        };
        self.rows_read += 1;

        let width = self.header.len();
        if record.len() < width {
            tracing::trace!(
                row = self.rows_read,
                fields = record.len(),
                columns = width,
                "padding short row"
            );
        } else if record.len() > width {
            tracing::trace!(
                row = self.rows_read,
                fields = record.len(),
                columns = width,
                "truncating long row"
            );
        }

        Ok(Some(Row::aligned(&self.header, &record)))
    }

    /// Drains the remaining rows into a [`Document`].
    pub fn into_document(mut self) -> Result<Document> {
        let mut rows = Vec::new();
        while let Some(row) = self.next_row()? {
            rows.push(row);
        }

        tracing::debug!(
            columns = self.header.len(),
            rows = rows.len(),
            lines = self.tokenizer.lines_read(),
            "document assembled"
        );
        Ok(Document::new(self.header, rows, self.diagnostics))
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

/// Returns the first record with at least one non-empty field.
fn acquire_header<R: BufRead>(tokenizer: &mut Tokenizer<R>) -> Result<Option<Record>> {
    let mut skipped = 0usize;
    while let Some(record) = tokenizer.next_record()? {
        if is_blank_record(&record) {
            skipped += 1;
            continue;
        }
        tracing::debug!(
            line = tokenizer.lines_read(),
            columns = record.len(),
            skipped_blank = skipped,
            "header acquired"
        );
        return Ok(Some(record));
    }

    tracing::debug!(skipped_blank = skipped, "no header before end of input");
    Ok(None)
}

fn header_diagnostics(header: &[String]) -> Vec<Diagnostic> {
    header
        .iter()
        .enumerate()
        .filter(|(_, name)| name.is_empty())
        .map(|(idx, _)| Diagnostic::MissingHeaderField { column: idx + 1 })
        .collect()
}

/// Parses a delimited text stream into a [`Document`].
pub fn parse<R: BufRead>(reader: R, dialect: Dialect) -> Result<Document> {
    RowReader::new(reader, dialect)?.into_document()
}

/// Opens `path` and parses it into a [`Document`].
///
/// Failing to open the file is reported as [`IngestError::SourceUnavailable`].
pub fn parse_path(path: &Path, dialect: Dialect) -> Result<Document> {
    let file = File::open(path).map_err(|source| IngestError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let span = tracing::debug_span!("parse", path = %path.display());
    let _guard = span.enter();
    parse(BufReader::new(file), dialect)
}
