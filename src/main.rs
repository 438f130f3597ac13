use anyhow::{Context, Result};
use procinfo::{
    config::{self, Config, OutputFormat, Query},
    Record, Table,
};
use std::{env, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> ExitCode {
    // ─── 1) init logging ─────────────────────────────────────────────
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config::log_level(env::var("LOG_LEVEL").ok())));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<ExitCode> {
    // ─── 2) parse args ───────────────────────────────────────────────
    let config = Config::from_args(env::args().skip(1))
        .with_context(|| format!("usage: {}", config::USAGE))?;

    // ─── 3) load table ───────────────────────────────────────────────
    let table = Table::load(&config.path)
        .with_context(|| format!("loading {}", config.path.display()))?;
    info!(records = table.len(), "loaded process table");

    // ─── 4) select & print ───────────────────────────────────────────
    let selected: Vec<&Record> = match &config.query {
        Query::List => table.iter().collect(),
        Query::Name(name) => table.lookup_by_name(name).into_iter().collect(),
        Query::Binary(bin) => table.lookup_by_binary_name(bin).into_iter().collect(),
        Query::Record(line) => table.lookup_by_record(line).into_iter().collect(),
    };

    if selected.is_empty() && config.query != Query::List {
        eprintln!("not found: {}", config.query);
        return Ok(ExitCode::from(1));
    }

    print!("{}", render(&selected, config.format)?);
    table.destroy();
    Ok(ExitCode::SUCCESS)
}

fn render(records: &[&Record], format: OutputFormat) -> Result<String> {
    let out = match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for rec in records {
                let index = rec.index().map(|i| i.to_string()).unwrap_or_default();
                out.push_str(&format!("{:>4}  {}\n", index, rec));
            }
            out
        }
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(records).context("serializing records")?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yaml::to_string(records).context("serializing records")?,
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample() -> Table {
        Table::from_reader(Cursor::new(
            "web1 svrA 8080 9090 httpd enabled\nweb3 svrC 8081 9092 nginx enabled\n",
        ))
        .unwrap()
    }

    #[test]
    fn test_render_text() -> Result<()> {
        let table = sample();
        let recs: Vec<&Record> = table.iter().collect();
        let out = render(&recs, OutputFormat::Text)?;
        assert_eq!(
            out,
            "   0  web1 svrA 8080 9090 httpd enabled\n   1  web3 svrC 8081 9092 nginx enabled\n"
        );
        Ok(())
    }

    #[test]
    fn test_render_json_and_yaml() -> Result<()> {
        let table = sample();
        let recs: Vec<&Record> = table.lookup_by_name("web3").into_iter().collect();

        let json: serde_json::Value = serde_json::from_str(&render(&recs, OutputFormat::Json)?)?;
        assert_eq!(json[0]["cmd_port"], 9092);

        let yaml = render(&recs, OutputFormat::Yaml)?;
        assert!(yaml.contains("binary_name: nginx"), "{yaml}");
        Ok(())
    }
}
