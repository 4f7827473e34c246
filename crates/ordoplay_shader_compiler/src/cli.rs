// SPDX-License-Identifier: MIT OR Apache-2.0
//! Argument parsing and the compile driver.

use crate::config::{ConfigError, ShadercConfig};
use crate::watcher::{GraphEvent, GraphWatcher};
use notify_debouncer_full::notify;
use ordoplay_shader_graph::{load_graph, CompileError, CompileResult, ShaderCompiler, ValidationError, ValidationPolicy};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Usage text
pub const USAGE: &str = "\
usage: ordoplay_shaderc <graph.ron|graph.json> [options]

options:
  -o, --output <out.wgsl>   write the shader to a file instead of stdout
  --config <shaderc.ron>    settings file (default: shaderc.ron beside the graph)
  --strict                  reject duplicate output nodes and duplicate input edges
  --json                    print the compile result as JSON
  --watch                   recompile whenever the graph file changes
  --init-config             write a default settings file and exit
  -h, --help                show this help";

/// Error surfaced by the command-line driver
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Bad command line
    #[error("{0}")]
    Usage(String),

    /// Settings could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid log filter directives
    #[error("Invalid log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    /// Graph document could not be loaded
    #[error(transparent)]
    Document(#[from] ValidationError),

    /// Graph failed to compile
    #[error("Compilation failed: {0}")]
    Compile(#[from] CompileError),

    /// Output could not be written
    #[error("Failed to write {path:?}: {source}")]
    Io {
        /// Destination path, `-` for stdout
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Compile result could not be encoded
    #[error("Failed to encode compile result: {0}")]
    Json(#[from] serde_json::Error),

    /// File watcher failed
    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl CliError {
    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Compile(_) => 1,
            _ => 2,
        }
    }
}

/// Parsed command line
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Args {
    /// Graph document
    pub input: PathBuf,
    /// Destination file
    pub output: Option<PathBuf>,
    /// Explicit settings file
    pub config: Option<PathBuf>,
    /// Force strict validation
    pub strict: bool,
    /// Force JSON output
    pub json: bool,
    /// Keep running and recompile on change
    pub watch: bool,
    /// Write a default settings file and exit
    pub init_config: bool,
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print usage
    Help,
    /// Compile a graph
    Compile(Args),
}

/// Parse arguments, excluding the program name
pub fn parse_args(args: &[String]) -> Result<Command, CliError> {
    let mut parsed = Args::default();
    let mut input = None;
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-o" | "--output" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(CliError::Usage("missing value for --output".to_string()));
                };
                parsed.output = Some(PathBuf::from(v));
                i += 2;
            }
            "--config" => {
                let Some(v) = args.get(i + 1) else {
                    return Err(CliError::Usage("missing value for --config".to_string()));
                };
                parsed.config = Some(PathBuf::from(v));
                i += 2;
            }
            "--strict" => {
                parsed.strict = true;
                i += 1;
            }
            "--json" => {
                parsed.json = true;
                i += 1;
            }
            "--watch" => {
                parsed.watch = true;
                i += 1;
            }
            "--init-config" => {
                parsed.init_config = true;
                i += 1;
            }
            other if other.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown argument: {other}")));
            }
            other => {
                if input.is_some() {
                    return Err(CliError::Usage(format!("unexpected extra input: {other}")));
                }
                input = Some(PathBuf::from(other));
                i += 1;
            }
        }
    }

    let Some(input) = input else {
        return Err(CliError::Usage("missing input graph".to_string()));
    };
    parsed.input = input;
    Ok(Command::Compile(parsed))
}

/// Effective settings for one run, after merging flags over the config file
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Graph document
    pub input: PathBuf,
    /// Destination file, stdout when absent
    pub output: Option<PathBuf>,
    /// Validation policy for the document loader
    pub policy: ValidationPolicy,
    /// Print JSON instead of raw WGSL
    pub json: bool,
}

impl RunOptions {
    /// Merge command-line flags over settings
    pub fn new(args: &Args, config: &ShadercConfig) -> Self {
        let policy = if args.strict {
            ValidationPolicy::strict()
        } else {
            config.validation_policy()
        };
        Self {
            input: args.input.clone(),
            output: args.output.clone().or_else(|| config.output_path(&args.input)),
            policy,
            json: args.json || config.emit_json_result,
        }
    }
}

/// Write a default settings file beside the input (or to `--config`)
pub fn init_config(args: &Args) -> Result<PathBuf, CliError> {
    let path = args
        .config
        .clone()
        .unwrap_or_else(|| ShadercConfig::sibling_path(&args.input));
    ShadercConfig::default().save(&path)?;
    tracing::info!("Wrote default settings to {:?}", path);
    Ok(path)
}

/// Load, compile and emit the graph once
pub fn compile_once(compiler: &ShaderCompiler, options: &RunOptions) -> Result<(), CliError> {
    let graph = load_graph(&options.input, compiler.registry(), &options.policy)?;
    tracing::debug!("Compiling graph '{}' ({} nodes)", graph.name, graph.node_count());

    let outcome = compiler.try_compile(&graph);
    if options.json {
        let result = CompileResult::from(outcome.clone());
        emit(options.output.as_deref(), &serde_json::to_string_pretty(&result)?)?;
        outcome?;
    } else {
        emit(options.output.as_deref(), &outcome?)?;
    }
    Ok(())
}

fn emit(output: Option<&Path>, text: &str) -> Result<(), CliError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).map_err(|source| CliError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
            std::fs::write(path, text).map_err(|source| CliError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!("Wrote {} bytes to {:?}", text.len(), path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{text}").map_err(|source| CliError::Io {
                path: PathBuf::from("-"),
                source,
            })?;
        }
    }
    Ok(())
}

/// Run the command
pub fn run(args: &Args, config: &ShadercConfig) -> Result<(), CliError> {
    let compiler = ShaderCompiler::new();
    let options = RunOptions::new(args, config);

    if !args.watch {
        return compile_once(&compiler, &options);
    }

    let watcher = GraphWatcher::new(&options.input, config.debounce())?;
    report(compile_once(&compiler, &options));
    while let Some(event) = watcher.next_event() {
        match event {
            GraphEvent::Changed(path) => {
                tracing::info!("{:?} changed, recompiling", path);
                report(compile_once(&compiler, &options));
            }
            GraphEvent::Removed(path) => {
                tracing::warn!("{:?} was removed, waiting for it to reappear", path);
            }
            GraphEvent::Error(error) => tracing::warn!("File watcher error: {error}"),
        }
    }
    tracing::info!("Stopped watching {:?}", watcher.path());
    Ok(())
}

fn report(result: Result<(), CliError>) {
    match result {
        Ok(()) => tracing::info!("Compiled successfully"),
        Err(e) => tracing::error!("{e}"),
    }
}
