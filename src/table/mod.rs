// src/table/mod.rs
mod load;

use serde::Serialize;
use std::{
    fs::File,
    io::{BufRead, BufReader, Seek},
    path::Path,
    slice,
};
use tracing::{debug, instrument};

use crate::error::LoadError;
use crate::record::{parse_line, Record};

/// Immutable, ordered set of records loaded from one process file.
///
/// `records()[i].index() == Some(i)` for every record.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Table {
    records: Vec<Record>,
}

impl Table {
    /// Load the process file at `path`.
    ///
    /// Fails with [`LoadError::Open`] if the file can't be opened,
    /// [`LoadError::Empty`] if it yields no records and [`LoadError::Read`]
    /// on any I/O failure. Malformed lines are skipped.
    #[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(BufReader::new(file))
    }

    /// Same as [`Table::load`] over any seekable reader.
    pub fn from_reader<R: BufRead + Seek>(reader: R) -> Result<Self, LoadError> {
        let records = load::read_records(reader)?;
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// First record equal to the record parsed from `candidate`.
    ///
    /// A candidate that doesn't parse simply finds nothing.
    pub fn lookup_by_record(&self, candidate: &str) -> Option<&Record> {
        self.position_of_record(candidate).map(|i| &self.records[i])
    }

    /// First record whose binary name is `name`.
    pub fn lookup_by_binary_name(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.binary_name() == name)
    }

    /// First record whose process name is `name`.
    pub fn lookup_by_name(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name() == name)
    }

    pub fn position_of_record(&self, candidate: &str) -> Option<usize> {
        let key = parse_line(candidate).ok()?;
        self.records.iter().position(|r| *r == key)
    }

    pub fn position_by_binary_name(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.binary_name() == name)
    }

    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        self.records.iter().position(|r| r.name() == name)
    }

    /// Line form of `record`, fields joined by single spaces.
    pub fn format(record: &Record) -> String {
        record.format()
    }

    /// Release every record. Borrows taken from the table can't outlive this.
    ///
    /// ```compile_fail
    /// use procinfo::Table;
    /// use std::io::Cursor;
    ///
    /// let table = Table::from_reader(Cursor::new("web1 svrA 8080 9090 httpd enabled\n")).unwrap();
    /// let web1 = table.lookup_by_name("web1");
    /// table.destroy();
    /// assert!(web1.is_some());
    /// ```
    pub fn destroy(self) {
        debug!(records = self.records.len(), "destroying process table");
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
