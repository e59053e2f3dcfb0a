use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod cmd;
mod error;
mod format;
mod io;

pub use cli::{Cli, Command, InputFormat, OutputFormat, PathOrStdin};

use error::CliError;
use format::FormatterConfig;
use rowdiff_core::{ChangesetOptions, DiffOptions};

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        if !matches!(e, CliError::DiffHasDifferences) {
            eprintln!("{}", e.message());
        }
        std::process::exit(e.exit_code());
    }
}

/// Installs a stderr subscriber; `RUST_LOG` overrides the flag-derived level.
fn init_tracing(cli: &Cli) {
    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Diff {
            left,
            right,
            source,
            ignore_field,
            common_fields_only,
            ignore_adds,
            ignore_deletes,
            ignore_updates,
            ignore_moves,
            summary_only,
        } => {
            if matches!(left, PathOrStdin::Stdin) && matches!(right, PathOrStdin::Stdin) {
                return Err(CliError::InvalidArgument {
                    detail: "LEFT and RIGHT cannot both be read from stdin".to_owned(),
                });
            }
            let config = cmd::source_config(&source)?;
            let read = cmd::read_options(&source, cli.max_file_size)?;
            let inputs = cmd::diff::DiffInputs {
                left: io::read_rows(&left, &read)?,
                right: io::read_rows(&right, &read)?,
            };
            let options = ChangesetOptions {
                diff: DiffOptions {
                    include_adds: !ignore_adds,
                    include_deletes: !ignore_deletes,
                    include_updates: !ignore_updates,
                    include_moves: !ignore_moves,
                    ..DiffOptions::default()
                },
                ignore_fields: ignore_field,
                common_fields_only,
            };
            let formatter = FormatterConfig::from_flags(cli.no_color, cli.quiet);
            cmd::diff::run(
                inputs,
                &config,
                &options,
                summary_only,
                cli.format,
                &formatter,
            )
        }
        Command::Inspect { file, source } => {
            let config = cmd::source_config(&source)?;
            let read = cmd::read_options(&source, cli.max_file_size)?;
            cmd::inspect::run(io::read_rows(&file, &read)?, &config, cli.format)
        }
    }
}
