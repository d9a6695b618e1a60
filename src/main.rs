use prodcons_compare::compare::{self, write_header};
use prodcons_compare::journal::Console;
use prodcons_compare::Config;
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: prodcons_compare [seq|par|both] [capacity items producer_ms consumer_ms]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = match Config::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let mut out = io::stdout();
    let result = write_header(&config, &mut out)
        .and_then(|()| compare::run(&config, Arc::new(Console), &mut out));
    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "failed writing to stdout");
            ExitCode::FAILURE
        }
    }
}
