// src/record/mod.rs
pub mod validate;

pub use validate::{Field, Validator, COLUMNS};

use serde::{Serialize, Serializer};
use std::{fmt, str::FromStr};
use tracing::trace;

use crate::error::LineSkipped;
use crate::tokenize::{is_active, split_columns, trim_line_end, COLUMN_COUNT};

/// A port column: the text as written plus its numeric value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Port {
    text: String,
    value: u64,
}

impl Port {
    /// `None` unless `text` is all digits. Values past `u64::MAX` saturate.
    pub fn parse(text: &str) -> Option<Self> {
        if !validate::is_port_text(text) {
            return None;
        }
        let value = text.bytes().fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        });
        Some(Self {
            text: text.to_string(),
            value,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl Serialize for Port {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(self.value)
    }
}

/// One validated process registry entry.
///
/// Only [`parse_line`] builds a `Record`, so every instance has all six
/// columns validated and both ports parsed.
#[derive(Debug, Clone, Serialize)]
pub struct Record {
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    name: String,
    server: String,
    io_port: Port,
    cmd_port: Port,
    binary_name: String,
    attribute: String,
}

impl Record {
    /// Position among the accepted records of its table, `None` when standalone.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn server(&self) -> &str {
        &self.server
    }

    pub fn io_port(&self) -> u64 {
        self.io_port.value()
    }

    pub fn io_port_text(&self) -> &str {
        self.io_port.as_str()
    }

    pub fn cmd_port(&self) -> u64 {
        self.cmd_port.value()
    }

    pub fn cmd_port_text(&self) -> &str {
        self.cmd_port.as_str()
    }

    pub fn binary_name(&self) -> &str {
        &self.binary_name
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    /// Render back to a single-space separated line.
    pub fn format(&self) -> String {
        self.to_string()
    }

    pub(crate) fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }
}

/// Equal when all six text columns match; index and numeric ports are ignored.
impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.server == other.server
            && self.io_port.text == other.io_port.text
            && self.cmd_port.text == other.cmd_port.text
            && self.binary_name == other.binary_name
            && self.attribute == other.attribute
    }
}

impl Eq for Record {}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.name, self.server, self.io_port.text, self.cmd_port.text, self.binary_name
        )?;
        for word in self.attribute.split([' ', '\t']).filter(|w| !w.is_empty()) {
            write!(f, " {}", word)?;
        }
        Ok(())
    }
}

impl FromStr for Record {
    type Err = LineSkipped;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_line(s)
    }
}

/// Parse one raw line into a standalone, unindexed [`Record`].
///
/// Inactive lines yield [`LineSkipped::Inactive`]. Any column failing its
/// validator rejects the whole line.
pub fn parse_line(line: &str) -> Result<Record, LineSkipped> {
    if !is_active(line) {
        return Err(LineSkipped::Inactive);
    }

    let line = trim_line_end(line);
    let spans = split_columns(line);
    if spans.len() < COLUMN_COUNT {
        return Err(LineSkipped::MissingColumns { found: spans.len() });
    }

    let mut texts = [""; COLUMN_COUNT];
    for (slot, ((field, validator), span)) in texts.iter_mut().zip(COLUMNS.iter().zip(spans)) {
        let text = &line[span];
        validator.check(*field, text)?;
        *slot = text;
    }

    let [name, server, io_port, cmd_port, binary_name, attribute] = texts;
    let io_port = Port::parse(io_port).ok_or(LineSkipped::InvalidPort(Field::IoPort))?;
    let cmd_port = Port::parse(cmd_port).ok_or(LineSkipped::InvalidPort(Field::CmdPort))?;

    let record = Record {
        index: None,
        name: name.to_string(),
        server: server.to_string(),
        io_port,
        cmd_port,
        binary_name: binary_name.to_string(),
        attribute: attribute.to_string(),
    };
    trace!(name = %record.name, binary = %record.binary_name, "parsed record");
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_fields() {
        let rec = parse_line("web1 svrA 8080 9090 httpd enabled\n").unwrap();
        assert_eq!(rec.index(), None);
        assert_eq!(rec.name(), "web1");
        assert_eq!(rec.server(), "svrA");
        assert_eq!(rec.io_port(), 8080);
        assert_eq!(rec.io_port_text(), "8080");
        assert_eq!(rec.cmd_port(), 9090);
        assert_eq!(rec.binary_name(), "httpd");
        assert_eq!(rec.attribute(), "enabled");
    }

    #[test]
    fn test_leading_zero_port_keeps_text() {
        let rec = parse_line("db svr 0080 0 postgres -D /data").unwrap();
        assert_eq!(rec.io_port(), 80);
        assert_eq!(rec.io_port_text(), "0080");
        assert_eq!(rec.cmd_port(), 0);
        assert_eq!(rec.attribute(), "-D /data");
    }

    #[test]
    fn test_rejections() {
        assert_eq!(parse_line("# web1 svrA 8080 9090 httpd enabled").unwrap_err(), LineSkipped::Inactive);
        assert_eq!(parse_line("\r\n").unwrap_err(), LineSkipped::Inactive);
        assert_eq!(
            parse_line("web1 svrA 8080 9090 httpd").unwrap_err(),
            LineSkipped::MissingColumns { found: 5 }
        );
        assert_eq!(
            parse_line("web2 svrB notaport 9091 nginx disabled").unwrap_err(),
            LineSkipped::InvalidPort(Field::IoPort)
        );
        assert_eq!(
            parse_line("web2 svrB 9091 90x1 nginx disabled").unwrap_err(),
            LineSkipped::InvalidPort(Field::CmdPort)
        );
    }

    #[test]
    fn test_oversized_port_saturates() {
        let rec = parse_line("web1 svrA 99999999999 9090 httpd enabled").unwrap();
        assert_eq!(rec.io_port(), 99_999_999_999);
        assert_eq!(rec.io_port_text(), "99999999999");

        let rec = parse_line("web1 svrA 8080 123456789012345678901234567890 httpd enabled").unwrap();
        assert_eq!(rec.cmd_port(), u64::MAX);
        assert_eq!(rec.cmd_port_text(), "123456789012345678901234567890");
    }

    #[test]
    fn test_format_round_trip() {
        let rec = parse_line("web1\t svrA 8080  9090 httpd  enabled  --fast\n").unwrap();
        let line = rec.format();
        assert_eq!(line, "web1 svrA 8080 9090 httpd enabled --fast");
        let again: Record = line.parse().unwrap();
        assert_eq!(again.format(), line);
        assert_eq!(again.name(), rec.name());
        assert_eq!(again.server(), rec.server());
        assert_eq!(again.io_port_text(), rec.io_port_text());
        assert_eq!(again.cmd_port_text(), rec.cmd_port_text());
        assert_eq!(again.binary_name(), rec.binary_name());
        // the stored attribute keeps its inner whitespace, the line form does not
        assert_eq!(rec.attribute(), "enabled  --fast");
        assert_eq!(again.attribute(), "enabled --fast");
        assert_ne!(again, rec);
    }

    #[test]
    fn test_single_spaced_round_trip() {
        let rec = parse_line("web1 svrA 8080 9090 httpd enabled --fast\n").unwrap();
        let again: Record = rec.format().parse().unwrap();
        assert_eq!(again, rec);
    }

    #[test]
    fn test_equality_ignores_index() {
        let a = parse_line("web1 svrA 8080 9090 httpd enabled").unwrap();
        let b = parse_line("web1 svrA 8080 9090 httpd enabled").unwrap().with_index(3);
        assert_eq!(a, b);
        let c = parse_line("web1 svrA 08080 9090 httpd enabled").unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_serialize() {
        let rec = parse_line("web1 svrA 8080 9090 httpd enabled").unwrap().with_index(0);
        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["index"], 0);
        assert_eq!(json["io_port"], 8080);
        assert_eq!(json["binary_name"], "httpd");
    }
}
