mod report;

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use promolex::{BatchResult, ItemRecord, default_catalog, logging, process_batch_with, worker_count};

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    logging::init(config.color);

    let runtime = tokio::runtime::Builder::new_multi_thread().worker_threads(config.workers).enable_all().build();
    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start the worker runtime: {err}");
            std::process::exit(1);
        }
    };

    match runtime.block_on(run(&config)) {
        Ok(result) => report::print_summary(&result, config.color),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}

struct CliConfig {
    input: PathBuf,
    output: PathBuf,
    patterns: Option<PathBuf>,
    workers: usize,
    color: bool,
}

async fn run(config: &CliConfig) -> anyhow::Result<BatchResult> {
    let catalog = default_catalog();
    if let Some(path) = &config.patterns {
        catalog
            .write_patterns(path)
            .with_context(|| format!("writing the grammar listing to {}", path.display()))?;
    }

    let raw = std::fs::read_to_string(&config.input)
        .with_context(|| format!("reading items from {}", config.input.display()))?;
    let items: Vec<ItemRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {} as a JSON array of items", config.input.display()))?;
    tracing::info!(items = items.len(), workers = config.workers, "processing batch");

    let result = process_batch_with(&catalog, &items).await;

    let enriched = serde_json::to_string_pretty(&result.records).context("serializing the enriched items")?;
    std::fs::write(&config.output, enriched)
        .with_context(|| format!("writing enriched items to {}", config.output.display()))?;

    Ok(result)
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut patterns: Option<PathBuf> = None;
    let mut workers = worker_count();
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{}", help_text());
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("promolex {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--input" | "-i" => set_path(&mut input, "--input", args.next())?,
            "--output" | "-o" => set_path(&mut output, "--output", args.next())?,
            "--patterns" => set_path(&mut patterns, "--patterns", args.next())?,
            "--workers" => {
                let value = args.next().ok_or_else(|| "error: --workers expects a value".to_string())?;
                workers = parse_workers(&value)?;
            }
            _ if arg.starts_with("--input=") => {
                set_path(&mut input, "--input", Some(arg.trim_start_matches("--input=").to_string()))?;
            }
            _ if arg.starts_with("--output=") => {
                set_path(&mut output, "--output", Some(arg.trim_start_matches("--output=").to_string()))?;
            }
            _ if arg.starts_with("--patterns=") => {
                set_path(&mut patterns, "--patterns", Some(arg.trim_start_matches("--patterns=").to_string()))?;
            }
            _ if arg.starts_with("--workers=") => {
                workers = parse_workers(arg.trim_start_matches("--workers="))?;
            }
            _ => return Err(format!("error: unknown argument '{arg}'\n\n{}", help_text())),
        }
    }

    let input = input.ok_or_else(|| format!("error: --input is required\n\n{}", help_text()))?;
    let output = output.ok_or_else(|| format!("error: --output is required\n\n{}", help_text()))?;

    Ok(CliConfig { input, output, patterns, workers, color })
}

fn set_path(slot: &mut Option<PathBuf>, flag: &str, value: Option<String>) -> Result<(), String> {
    let value = value.ok_or_else(|| format!("error: {flag} expects a value"))?;
    if slot.is_some() {
        return Err(format!("error: {flag} provided multiple times"));
    }
    *slot = Some(PathBuf::from(value));
    Ok(())
}

fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("error: invalid --workers '{value}' (expected a positive integer)")),
    }
}

fn help_text() -> String {
    format!(
        "promolex {version}

Promotion parsing engine CLI.

Usage:
  promolex --input <items.json> --output <out.json> [OPTIONS]

Options:
  -i, --input <path>         Input JSON file: an array of item records.
  -o, --output <path>        Output JSON file for the enriched records.
  --patterns <path>          Also write the consolidated grammar listing here.
  --workers <n>              Worker tasks to run in parallel.
                             Default: min(32, 4 x available cores) = {workers}.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Exit codes:
  0  Success (individual items may still appear in the failure report).
  1  Internal error.
  2  Invalid arguments.
",
        version = env!("CARGO_PKG_VERSION"),
        workers = worker_count()
    )
}
