//! Shared utilities: date parsing, list-literal cells, logging and progress.

pub mod date;
pub mod list_literal;
pub mod logging;

pub use date::{DateFormatConfig, parse_date_string};
pub use list_literal::{is_list_literal, parse_list_literal};
