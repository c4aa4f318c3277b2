//! CLI entrypoint for the hrexx runtime probe.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hrexx_core::config::RuntimeConfig;
use hrexx_core::dlfcn::LoadFlags;
use hrexx_core::search::{EXT_DELIM, PATH_DELIM, split_list};
use hrexx_harness::invocation::DEFAULT_MAX_ARGS;
use hrexx_harness::structured_log::LogEmitter;
use hrexx_harness::{HarnessError, locate, parse_invocation, probe, registry_view};
use hrexx_loader::Binder;

/// Inspect and bind REXX runtimes.
#[derive(Debug, Parser)]
#[command(name = "hrexx")]
#[command(about = "Probe REXX runtime libraries and host command parsing")]
struct Cli {
    /// JSONL log destination (standard error if omitted).
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Trim and tokenize an invocation string.
    Parse {
        /// Invocation, e.g. "exec(script.rexx arg)".
        invocation: String,
        /// Maximum number of entries, command name included.
        #[arg(long, default_value_t = DEFAULT_MAX_ARGS)]
        max_args: usize,
    },
    /// List the built-in runtime registry for this OS.
    Registry,
    /// Bind a runtime, print its resolved symbols, then release it.
    Bind {
        /// Runtime package (Regina or ooRexx). Overrides HREXX_PACKAGE.
        #[arg(long)]
        package: Option<String>,
        /// Library filename or path. Overrides HREXX_LIBRARY.
        #[arg(long)]
        library: Option<String>,
        /// Defer symbol relocation (RTLD_LAZY).
        #[arg(long)]
        lazy: bool,
    },
    /// Find a script using the search path and extension list.
    Locate {
        /// Script name, with or without extension.
        script: String,
        /// Search directories in platform path-list syntax. Overrides HREXX_PATH.
        #[arg(long)]
        path: Option<String>,
        /// Extensions in platform list syntax. Overrides HREXX_EXTENSIONS.
        #[arg(long)]
        extensions: Option<String>,
    },
}

fn run_id() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    format!("{}-{secs}", std::process::id())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let run = run_id();
    let mut log = match &cli.log {
        Some(path) => LogEmitter::to_file(path, &run)?,
        None => LogEmitter::to_stderr(&run),
    };

    let result = dispatch(cli.command, &mut log);
    if let Err(err) = &result {
        log.emit_entry(err.log_entry())?;
    }
    log.flush()?;
    result.map_err(Into::into)
}

fn dispatch(command: Command, log: &mut LogEmitter) -> Result<(), HarnessError> {
    let env = RuntimeConfig::from_env();

    match command {
        Command::Parse {
            invocation,
            max_args,
        } => {
            let parsed = parse_invocation(&invocation, max_args);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Registry => {
            let rows = registry_view::registry_rows();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
        Command::Bind {
            package,
            library,
            lazy,
        } => {
            let mut config = env;
            if let Some(package) = package {
                config = config.with_package(&package);
            }
            if let Some(library) = library {
                config = config.with_library(library);
            }
            let entry = config.entry()?;
            let flags = if lazy { LoadFlags::LAZY } else { LoadFlags::NOW };
            let summary = probe(&Binder::new().with_flags(flags), &entry, log)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Command::Locate {
            script,
            path,
            extensions,
        } => {
            let mut conventions = env.search;
            if let Some(path) = path {
                conventions.paths = split_list(&path, PATH_DELIM);
            }
            if let Some(extensions) = extensions {
                conventions.extensions = split_list(&extensions, EXT_DELIM);
            }
            let found = locate::locate(&conventions, &script)
                .ok_or_else(|| HarnessError::NotFound(script.clone()))?;
            println!("{}", found.display());
        }
    }
    Ok(())
}
