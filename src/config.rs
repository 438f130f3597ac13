// src/config.rs
use anyhow::{bail, Context, Result};
use std::{fmt, path::PathBuf};

pub const USAGE: &str =
    "procinfo <PATH> [list | name <NAME> | bin <BINARY> | record <LINE...>] [--format text|json|yaml]";

/// How matched records are printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Which records to select from the loaded table.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Query {
    #[default]
    List,
    Name(String),
    Binary(String),
    Record(String),
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Query::List => f.write_str("all records"),
            Query::Name(n) => write!(f, "name {n:?}"),
            Query::Binary(b) => write!(f, "binary {b:?}"),
            Query::Record(r) => write!(f, "record {r:?}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub path: PathBuf,
    pub query: Query,
    pub format: OutputFormat,
}

impl Config {
    /// Parse command-line arguments, program name already stripped.
    pub fn from_args<I>(args: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut format = OutputFormat::default();
        let mut positional = Vec::new();

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(arg) = args.next() {
            let value = match arg.strip_prefix("--format=") {
                Some(v) => v.to_string(),
                None if arg == "--format" => args.next().context("--format needs a value")?,
                None => {
                    positional.push(arg);
                    continue;
                }
            };
            format = OutputFormat::from_str(&value)
                .with_context(|| format!("unknown output format `{}`", value))?;
        }

        let mut positional = positional.into_iter();
        let path = PathBuf::from(positional.next().context("missing process table path")?);
        let command = positional.next();
        let rest: Vec<String> = positional.collect();

        let query = match command.as_deref() {
            None | Some("list") => {
                if !rest.is_empty() {
                    bail!("`list` takes no arguments");
                }
                Query::List
            }
            Some("name") => Query::Name(single(rest, "name")?),
            Some("bin") => Query::Binary(single(rest, "bin")?),
            Some("record") => {
                if rest.is_empty() {
                    bail!("`record` needs a line to match");
                }
                Query::Record(rest.join(" "))
            }
            Some(other) => bail!("unknown command `{}`", other),
        };

        Ok(Self {
            path,
            query,
            format,
        })
    }
}

fn single(mut rest: Vec<String>, command: &str) -> Result<String> {
    if rest.len() != 1 {
        bail!("`{}` takes exactly one argument", command);
    }
    Ok(rest.remove(0))
}

/// Log filter directive: `LOG_LEVEL` if set, else `warn`.
pub fn log_level(var: Option<String>) -> String {
    var.filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| "warn".to_string())
}
