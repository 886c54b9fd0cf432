//! Greeter entry-point: parse flags, then print the greeting.

use std::io;

use greeter::{GreeterError, Result, parse_args, write_greeting};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
    run().map_err(color_eyre::eyre::Report::from)
}

fn run() -> Result<()> {
    let greet = match parse_args(std::env::args_os()) {
        Ok(greet) => greet,
        Err(GreeterError::Flags(err)) if err.is_display_request() => {
            if let Some(clap_err) = err.as_clap() {
                clap_err.exit();
            }
            return Err(err.into());
        }
        Err(err) => return Err(err),
    };
    let mut stdout = io::stdout().lock();
    write_greeting(&mut stdout, &greet)
}
