// src/table/load.rs
use std::io::{BufRead, Seek};

use tracing::{debug, instrument, trace, warn};

use crate::error::{LineSkipped, LoadError};
use crate::record::{parse_line, Record};
use crate::tokenize::is_active_bytes;

/// Reads one raw line into `buf`, returning `false` at end of input.
///
/// Lines are bytes here; decoding happens per line so bad encoding stays
/// local to the line that carries it.
fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>, line_no: usize) -> Result<bool, LoadError> {
    buf.clear();
    let n = reader.read_until(b'\n', buf).map_err(|source| LoadError::Read {
        line: line_no + 1,
        source,
    })?;
    Ok(n > 0)
}

/// First pass: number of active lines, used to presize the record vector.
pub(crate) fn count_active_lines<R: BufRead>(reader: &mut R) -> Result<usize, LoadError> {
    let mut buf = Vec::new();
    let mut line_no = 0;
    let mut active = 0;
    while next_line(reader, &mut buf, line_no)? {
        line_no += 1;
        if is_active_bytes(&buf) {
            active += 1;
        }
    }
    trace!(lines = line_no, active, "counted active lines");
    Ok(active)
}

/// Both passes over `reader`: count, rewind, parse.
///
/// Nothing accumulated survives an error.
#[instrument(level = "debug", skip(reader))]
pub(crate) fn read_records<R: BufRead + Seek>(mut reader: R) -> Result<Vec<Record>, LoadError> {
    let active = count_active_lines(&mut reader)?;
    if active == 0 {
        return Err(LoadError::Empty { active_lines: 0 });
    }

    reader
        .rewind()
        .map_err(|source| LoadError::Read { line: 0, source })?;

    let mut records = Vec::with_capacity(active);
    let mut buf = Vec::new();
    let mut line_no = 0;
    while next_line(&mut reader, &mut buf, line_no)? {
        line_no += 1;
        let parsed = match std::str::from_utf8(&buf) {
            Ok(line) => parse_line(line),
            Err(_) if !is_active_bytes(&buf) => Err(LineSkipped::Inactive),
            Err(_) => Err(LineSkipped::InvalidUtf8),
        };
        match parsed {
            Ok(record) => {
                let index = records.len();
                records.push(record.with_index(index));
            }
            Err(LineSkipped::Inactive) => {}
            Err(reason) => trace!(line = line_no, %reason, "skipping line"),
        }
    }

    if records.is_empty() {
        return Err(LoadError::Empty {
            active_lines: active,
        });
    }
    if records.len() < active {
        warn!(
            accepted = records.len(),
            active,
            "some active lines were rejected"
        );
    }
    debug!(records = records.len(), "parsed process table");
    Ok(records)
}
