//! Error types for loading and parsing a process table.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::record::Field;

/// Fatal conditions that abort [`Table::load`](crate::Table::load).
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened.
    #[error("failed to open process table {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input holds no active lines, or none of them produced a record.
    #[error("process table has no records ({active_lines} active lines)")]
    Empty { active_lines: usize },

    /// An I/O error other than end-of-file while reading. Bad encoding is
    /// not an I/O error; such lines are skipped.
    #[error("failed to read process table at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Why [`parse_line`](crate::record::parse_line) produced no record.
///
/// Never surfaced by a load; skipped lines are only traced.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum LineSkipped {
    #[error("blank or comment line")]
    Inactive,

    #[error("expected 6 columns, found {found}")]
    MissingColumns { found: usize },

    #[error("empty {0} column")]
    EmptyField(Field),

    #[error("{0} is not a valid port")]
    InvalidPort(Field),

    #[error("line is not valid UTF-8")]
    InvalidUtf8,
}
