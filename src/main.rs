use clap::Parser;
use serde_yaml::Mapping;
use std::io::{self, Read};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use tabq::values;

#[derive(Parser)]
#[command(name = "tabq", about = "Build an Airtable filter formula from field values")]
struct Cli {
    #[arg(long, help = "Match records where any field matches (OR instead of AND)")]
    any: bool,

    #[arg(long, help = "Read the field mapping from stdin")]
    stdin: bool,

    #[arg(long, env = "TABQ_LOG", default_value = "warn", help = "Log filter, e.g. debug")]
    log_level: String,

    #[arg(help = "Field mapping in YAML or JSON, e.g. '{Name: John, Age: [\">=\", 21]}'")]
    mapping: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let source = if cli.stdin {
        let mut buf = String::new();
        if let Err(e) = io::stdin().read_to_string(&mut buf) {
            eprintln!("Error: Failed to read stdin: {}", e);
            return ExitCode::from(2);
        }
        buf
    } else {
        match cli.mapping {
            Some(m) => m,
            None => {
                eprintln!("Error: No field mapping provided. Pass one as an argument or use --stdin");
                return ExitCode::from(2);
            }
        }
    };

    run_match(&source, cli.any)
}

fn run_match(source: &str, match_any: bool) -> ExitCode {
    let mapping: Mapping = match serde_yaml::from_str(source) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Mapping error: {}", e);
            return ExitCode::from(2);
        }
    };

    let formula = match values::match_mapping(&mapping, match_any) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Formula error: {}", e);
            return ExitCode::from(2);
        }
    };

    tracing::debug!(formula = %formula, "rendered formula");
    println!("{}", formula);
    ExitCode::from(0)
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .with_env_filter(filter)
        .init();
}
