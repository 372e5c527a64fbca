//! scranagement: list or symlink the most recently modified files in a directory

use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use scranagement::commands::{dispatch, CommandOutcome};
use scranagement::core::LOG_ENV_VAR;
use scranagement::error::{EXIT_CONFIG_ERROR, EXIT_FAILURE, EXIT_NO_RESULTS, EXIT_SUCCESS};
use scranagement::settings::{resolve, ConfigRequest, Overrides};
use scranagement::ScranError;

const EXIT_CODES_HELP: &str = "\
Exit codes:
  0  success
  1  filesystem error (missing directory, permission, conflicting file)
  2  configuration error
  3  no files selected";

/// Find the N most recently modified files in a directory and print them or keep
/// rank-named symlinks (latest-1, latest-2, ...) pointing at them.
#[derive(Parser, Debug)]
#[command(name = "scranagement", version, after_help = EXIT_CODES_HELP)]
struct Cli {
    /// Directory to search. Defaults to the config file value, then $HOME/screenshots
    directory: Option<String>,

    /// Number of files to select
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Directory for the symlinks. Defaults to the searched directory
    #[arg(short = 'o', long)]
    symlink_dir: Option<String>,

    /// Symlink name format; must contain {rank} exactly once
    #[arg(short, long)]
    format: Option<String>,

    /// Config file to read (and write with --save-config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Save the effective configuration and exit
    #[arg(short, long)]
    save_config: bool,

    /// Create or refresh the symlinks instead of printing paths
    #[arg(short, long)]
    update_symlinks: bool,

    /// Prefix listed paths with their modification time
    #[arg(short, long)]
    long: bool,

    /// Show which symlinks would be made without touching the filesystem
    #[arg(long, requires = "update_symlinks")]
    dry_run: bool,

    /// Log what is being done to stderr
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_request(self) -> ConfigRequest {
        ConfigRequest {
            config_path: self.config,
            overrides: Overrides {
                directory: self.directory,
                count: self.count,
                symlink_dir: self.symlink_dir,
                format: self.format,
            },
            save_config: self.save_config,
            update_symlinks: self.update_symlinks,
            long: self.long,
            dry_run: self.dry_run,
        }
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "scranagement=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// A reader that stopped early (`scranagement | head -1`) is not a failure
fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}

fn run(request: ConfigRequest) -> anyhow::Result<CommandOutcome> {
    let config = resolve(request)?;
    let mut stdout = io::stdout().lock();
    dispatch(&config, &mut stdout)
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version also arrive here, on stdout
            let code = if e.use_stderr() { EXIT_CONFIG_ERROR } else { EXIT_SUCCESS };
            let _ = e.print();
            return ExitCode::from(code as u8);
        }
    };

    init_logging(cli.verbose);

    let code = match run(cli.into_request()) {
        Ok(CommandOutcome::Success) => EXIT_SUCCESS,
        Ok(CommandOutcome::NoResults) => EXIT_NO_RESULTS,
        Err(e) if is_broken_pipe(&e) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("❌ {e}");
            e.downcast_ref::<ScranError>()
                .map_or(EXIT_FAILURE, ScranError::exit_code)
        }
    };

    ExitCode::from(code as u8)
}
