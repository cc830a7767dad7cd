mod cli;
mod command;
mod command_result;
mod commands;
mod demo_grammar;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

/// `EX_CONFIG` from sysexits.h — the exit code a fatal configuration error
/// (a missing required parameter) maps to, distinct from the generic
/// `ExitCode::FAILURE` any other command error returns.
pub(crate) const EXIT_CONFIG_ERROR: u8 = 78;

fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    if let Some(command) = cli.cmd.take() {
        let result = command.run(cli);
        if let Some(stdout) = result.stdout {
            println!("{stdout}");
        }
        if let Some(stderr) = result.stderr {
            eprintln!("{stderr}")
        }
        result.exit_code
    } else {
        cli.run_default().unwrap();
        std::process::ExitCode::SUCCESS
    }
}

fn setup_logger(cli: &Cli) {
    let mut log_level_warnings: Vec<String> = vec![];
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        let env_val = std::env::var("LOG_LEVEL").map(|s| s.trim().to_string());

        match env_val.as_deref() {
            Ok("DEBUG" | "debug") => tracing::Level::DEBUG,
            Ok("INFO" | "info") => tracing::Level::INFO,
            Ok("TRACE" | "trace") => tracing::Level::TRACE,
            Ok("VERBOSE" | "verbose") => tracing::Level::DEBUG,
            Ok(other) => {
                log_level_warnings.push(format!(
                    "Invalid `LOG_LEVEL` environment variable value: `{other}`"
                ));
                DEFAULT_LOG_LEVEL
            }
            Err(_) => DEFAULT_LOG_LEVEL,
        }
    };

    tracing_subscriber::fmt().with_max_level(log_level).init();
    log::trace!("Initial logging level set to `{log_level}`.");

    for warning in log_level_warnings.drain(..) {
        log::warn!("{warning}");
    }
}
