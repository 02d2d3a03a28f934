use anyhow::Result;
use clap::Parser;
use symbols_workspace::cli::{print_error, Cli};
use symbols_workspace::utils::{get_log_dir, CommandFailed};

fn main() {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let guard = match init_logging() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {:#}", e);
            None
        }
    };

    let result = cli.execute();

    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            tracing::error!("{:#}", e);
            print_error(&format!("{:#}", e));
            // Propagate the exit status of a failed external command
            e.downcast_ref::<CommandFailed>()
                .map_or(1, CommandFailed::exit_code)
        }
    };

    drop(guard);
    std::process::exit(code);
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = get_log_dir();
    std::fs::create_dir_all(&log_dir)?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&log_dir, "symbols-workspace.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false) // Disable ANSI colors in file
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(guard)
}
