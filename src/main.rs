use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use toml_raider::{Error, TomlPath};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, PROG_NAME};

/// Environment variable holding the log filter, e.g. `TOMLRAIDER_LOG=debug`.
const LOG_ENV: &str = "TOMLRAIDER_LOG";

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // help and version requests are not failures
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(Error::USAGE as u8)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let filter = if cli.quiet {
        EnvFilter::new("off")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            message(&e.to_string(), cli.quiet);
            // exit codes are small positive integers
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), Error> {
    let path = TomlPath::new(&cli.property)?;
    let source = cli.source()?;
    message(
        &format!("Reading property <{path}> from <{}>...", source.name()),
        cli.quiet,
    );
    let buffer = source.read()?;
    let value = toml_raider::get(&buffer, &source.name(), &cli.property, cli.output())?;
    tracing::debug!(bytes = value.len(), "writing value");

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(value.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| Error::Io(e.to_string().into()))
}

fn message(value: &str, quiet: bool) {
    if !quiet {
        eprintln!("{PROG_NAME}: {value}");
    }
}
