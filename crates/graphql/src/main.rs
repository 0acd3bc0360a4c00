mod cli;
mod command_result;
mod commands;
mod output_utils;
mod schema_files;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command_result::CommandResult;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::WARN;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    let Some(command) = cli.cmd.take() else {
        return match cli.run_default().await {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                std::process::ExitCode::FAILURE
            },
        };
    };

    let result = command.run(cli).await;
    if let Some(stdout) = result.stdout {
        println!("{stdout}");
    }
    if let Some(stderr) = result.stderr {
        eprintln!("{stderr}")
    }
    result.exit_code
}

/// Logs go to stderr so that printed schemas can be piped.
fn setup_logger(cli: &Cli) {
    let mut log_level_warnings: Vec<String> = vec![];
    let log_level =
        if cli.verbose {
            tracing::Level::DEBUG
        } else {
            let env_val =
                std::env::var("LOG_LEVEL")
                    .map(|s| s.trim().to_lowercase());

            match env_val.as_deref() {
                Ok("error") => tracing::Level::ERROR,
                Ok("warn") => tracing::Level::WARN,
                Ok("info") => tracing::Level::INFO,
                Ok("debug" | "verbose") => tracing::Level::DEBUG,
                Ok("trace") => tracing::Level::TRACE,
                Ok(other) => {
                    log_level_warnings.push(format!(
                        "Invalid `LOG_LEVEL` environment variable value: \
                        `{other}`"
                    ));
                    DEFAULT_LOG_LEVEL
                },
                Err(_) => DEFAULT_LOG_LEVEL,
            }
        };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    for warning in log_level_warnings.drain(..) {
        log::warn!("{warning}");
    }
}
