use std::process;

use depwalk::{
    cli::{Args, Command, Completion},
    error::WalkerError,
};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse command-line arguments
    let args = Args::parse_args();

    init_logging(&args);

    let command = Command::from_args(args);
    process::exit(run_command(command));
}

/// Install the fmt subscriber on stderr
///
/// `--verbose` and `--quiet` override `RUST_LOG`.
fn init_logging(args: &Args) {
    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else if args.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!args.no_colors)
        .with_target(args.verbose)
        .without_time()
        .init();
}

/// Run the command with proper error handling
fn run_command(command: Command) -> i32 {
    match command.execute() {
        Ok(Completion::Clean) => 0,
        Ok(Completion::Partial(skipped)) => {
            eprintln!("\n{} entr{} skipped because of errors", skipped, if skipped == 1 { "y" } else { "ies" });
            1
        }
        Err(err) => report_error(&err),
    }
}

fn report_error(err: &WalkerError) -> i32 {
    eprintln!("\nError: {}", err.user_message());

    match err {
        WalkerError::UnresolvedReference { .. } => {
            eprintln!("Suggestion: Fix the import, add an --alias, or drop it with --ignore");
        }
        WalkerError::ConfigNotFound { .. } => {
            eprintln!("Suggestion: Run `depwalk --init` to create a .depwalk.toml, or specify a config file with --config");
        }
        WalkerError::PermissionDenied { .. } => {
            eprintln!("Suggestion: Check file permissions");
        }
        WalkerError::OutputDirectoryNotFound { .. } => {
            eprintln!("Suggestion: Create the output directory first or specify a different path");
        }
        _ => {}
    }

    #[cfg(not(tarpaulin_include))]
    {
        if std::env::var("RUST_BACKTRACE").is_ok() {
            eprintln!("\nBacktrace:\n{}", err.backtrace());
        }
    }

    err.exit_code()
}
