//! Delimited text reading and writing.

mod reader;
mod tokenizer;
mod writer;

pub use reader::{RowReader, parse, parse_path};
pub use tokenizer::{Record, Tokenizer, is_blank_record, normalize_field, split_line};
pub use writer::format_record;
