use anyhow::{Context, Result};
use clap::Parser;
use esfilter::config::Config;
use esfilter::FilterBuilder;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;

/// Merge filters into a bool/filtered search query clause
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Clause document to extend; `-` or omitted reads stdin
    clause: Option<PathBuf>,

    /// Filters to append, as JSON (an object or an array of objects).
    /// Repeat to append several groups in order.
    #[arg(short, long = "append", value_name = "JSON")]
    append: Vec<String>,

    /// Print the strategy the clause would use and exit
    #[arg(long)]
    classify: bool,

    /// Print compact JSON regardless of config
    #[arg(long)]
    compact: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if cli.compact {
        config.output.pretty = false;
    }

    let text = read_clause(cli.clause.as_deref())?;
    let mut builder = FilterBuilder::from_json(&text).context("Invalid query clause")?;

    if cli.classify {
        println!("{}", builder.strategy());
        return Ok(());
    }

    for (i, raw) in cli.append.iter().enumerate() {
        let filters: Value = serde_json::from_str(raw)
            .with_context(|| format!("--append #{} is not valid JSON", i + 1))?;
        builder
            .append_value(filters)
            .with_context(|| format!("Failed to append filter group #{}", i + 1))?;
    }

    println!("{}", config.output.render(&builder.into_value())?);
    Ok(())
}

fn read_clause(path: Option<&std::path::Path>) -> Result<String> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .with_context(|| format!("Failed to read {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}
