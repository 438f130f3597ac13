// src/record/validate.rs
use std::fmt;

use serde::Serialize;

use crate::error::LineSkipped;
use crate::tokenize::COLUMN_COUNT;

/// One of the six fixed columns, in file order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Server,
    IoPort,
    CmdPort,
    BinaryName,
    Attribute,
}

impl Field {
    pub fn as_str(&self) -> &str {
        match self {
            Field::Name => "name",
            Field::Server => "server",
            Field::IoPort => "io_port",
            Field::CmdPort => "cmd_port",
            Field::BinaryName => "binary_name",
            Field::Attribute => "attribute",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-column check applied to the raw column text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validator {
    /// Text must be non-empty.
    NonEmpty,
    /// Text must be one or more ASCII digits.
    Port,
    /// Anything goes.
    Unchecked,
}

impl Validator {
    /// Check `text` for `field`, reporting the rejection reason on failure.
    pub fn check(self, field: Field, text: &str) -> Result<(), LineSkipped> {
        match self {
            Validator::NonEmpty if text.is_empty() => Err(LineSkipped::EmptyField(field)),
            Validator::Port if !is_port_text(text) => Err(LineSkipped::InvalidPort(field)),
            _ => Ok(()),
        }
    }
}

/// Column order and the validator each column gets.
pub const COLUMNS: [(Field, Validator); COLUMN_COUNT] = [
    (Field::Name, Validator::NonEmpty),
    (Field::Server, Validator::NonEmpty),
    (Field::IoPort, Validator::Port),
    (Field::CmdPort, Validator::Port),
    (Field::BinaryName, Validator::NonEmpty),
    (Field::Attribute, Validator::Unchecked),
];

/// Non-empty and every byte an ASCII digit.
pub fn is_port_text(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_text() {
        assert!(is_port_text("0"));
        assert!(is_port_text("08080"));
        assert!(!is_port_text(""));
        assert!(!is_port_text("+80"));
        assert!(!is_port_text("80a"));
        assert!(!is_port_text("８０"));
    }

    #[test]
    fn test_validators() {
        assert_eq!(
            Validator::NonEmpty.check(Field::Server, ""),
            Err(LineSkipped::EmptyField(Field::Server))
        );
        assert_eq!(
            Validator::Port.check(Field::CmdPort, "notaport"),
            Err(LineSkipped::InvalidPort(Field::CmdPort))
        );
        assert_eq!(Validator::Unchecked.check(Field::Attribute, ""), Ok(()));
        assert_eq!(Validator::Port.check(Field::IoPort, "9090"), Ok(()));
    }

    #[test]
    fn test_column_order() {
        let order: Vec<&str> = COLUMNS.iter().map(|(f, _)| f.as_str()).collect();
        assert_eq!(
            order,
            vec!["name", "server", "io_port", "cmd_port", "binary_name", "attribute"]
        );
    }
}
