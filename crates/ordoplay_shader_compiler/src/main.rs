// SPDX-License-Identifier: MIT OR Apache-2.0
//! `ordoplay_shaderc` - compile `OrdoPlay` shader graphs to WGSL
//!
//! Reads a RON or JSON graph document, validates it, and writes the Bevy PBR
//! fragment shader generated from it. With `--watch` the graph is recompiled
//! whenever the file changes.

mod cli;
mod config;
mod watcher;

use cli::{CliError, Command};
use config::ShadercConfig;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn init_logging(config: &ShadercConfig) -> Result<(), CliError> {
    // RUST_LOG wins over the settings file
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_filter)?,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    Ok(())
}

fn main() -> ExitCode {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match cli::parse_args(&argv) {
        Ok(Command::Compile(args)) => args,
        Ok(Command::Help) => {
            println!("{}", cli::USAGE);
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            eprintln!("{e}\n\n{}", cli::USAGE);
            return ExitCode::from(e.exit_code());
        }
    };

    if args.init_config {
        let _ = init_logging(&ShadercConfig::default());
        return match cli::init_config(&args) {
            Ok(_) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!("{e}");
                ExitCode::from(e.exit_code())
            }
        };
    }

    let config = match ShadercConfig::discover(&args.input, args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };
    if let Err(e) = init_logging(&config) {
        eprintln!("{e}");
        return ExitCode::from(e.exit_code());
    }

    tracing::info!("Starting ordoplay_shaderc v{}", env!("CARGO_PKG_VERSION"));

    match cli::run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::from(e.exit_code())
        }
    }
}
