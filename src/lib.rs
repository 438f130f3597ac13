pub mod config;
pub mod error;
pub mod record;
pub mod table;
pub mod tokenize;

pub use error::{LineSkipped, LoadError};
pub use record::{parse_line, Field, Record};
pub use table::Table;
