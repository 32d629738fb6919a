// src/main.rs

use anyhow::Result;
use clap::Parser;
use regsync::cli::{Cli, Commands, UpdateArgs};
#[cfg(feature = "progress")]
use regsync::progress::IndicatifProgress;
use regsync::progress::{NoOpProgress, ProgressReporter};
use regsync::{ErrorCategory, StrategyTable, SyncConfig, SyncError, SyncMethod};

fn main() -> Result<()> {
    // Initialize logging. Default to 'info' if RUST_LOG is not set.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(
                if cfg!(debug_assertions) {
                    "regsync=debug".parse()?
                } else {
                    "regsync=info".parse()?
                },
            ),
        )
        .init();

    log::debug!("Starting regsync v{}...", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Commands::UpdateRegexes(args) => {
            let path = args.path.clone();
            match update_regexes(args) {
                Ok(report) => {
                    if !report.failures.is_empty() {
                        eprintln!(
                            "Warning: {} file(s) could not be downloaded:",
                            report.failures.len()
                        );
                        for (name, reason) in &report.failures {
                            eprintln!("  - {}: {}", name, reason);
                        }
                    }
                    println!("Successfully updated regex files in '{}'", path.display());
                }
                Err(e) => {
                    let code = match e.category() {
                        ErrorCategory::Input => {
                            eprintln!("Error: {}", e);
                            1
                        }
                        ErrorCategory::Transport => {
                            eprintln!("Sync failed: {}", e);
                            2
                        }
                        ErrorCategory::Unexpected => {
                            eprintln!("Unexpected error: {}", e);
                            2
                        }
                    };
                    std::process::exit(code);
                }
            }
        }
    }

    Ok(())
}

fn update_regexes(args: UpdateArgs) -> Result<regsync::SyncReport, SyncError> {
    // The method is validated first so a bad one never touches the destination.
    let method: SyncMethod = args.method.parse()?;
    let config = SyncConfig::try_from(args)?;
    log::debug!("Configuration built successfully: {:?}", config);

    // Decide whether to show a progress bar. Show it if stderr is a TTY.
    let progress: Box<dyn ProgressReporter> = {
        #[cfg(feature = "progress")]
        {
            if atty::is(atty::Stream::Stderr) {
                Box::new(IndicatifProgress::new())
            } else {
                Box::new(NoOpProgress)
            }
        }
        #[cfg(not(feature = "progress"))]
        {
            Box::new(NoOpProgress)
        }
    };

    StrategyTable::standard().dispatch(method, &config, progress.as_ref())
}
