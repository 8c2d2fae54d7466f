//! # tokdump
//!
//! Prints every token of the given files on its own line, with whitespace
//! spelled out as `(SPACE)`, `(TAB)` and `(NEWLINE)`.

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use std::ffi::OsString;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;
use tokdump_core::config::compile_time::file_processing::OUTPUT_BUFFER_CAPACITY;
use tokdump_core::{log_info, logging, pipeline};
use tokdump_core::{ArgumentError, Invocation, ModeFlags, RuntimeConfig};

mod error;

use error::CliError;

const AFTER_HELP: &str = "\
Examples:
    tokdump ./myfile.py ./myfile.c
    tokdump -sb ./code.rst";

#[derive(Parser, Debug)]
#[command(
    name = "tokdump",
    about = "Print each token of the given files on its own line",
    after_help = AFTER_HELP,
    args_override_self = true
)]
struct Cli {
    /// Print whitespace bytes as-is instead of their labels
    #[arg(short = 'r', long)]
    raw: bool,

    /// Omit whitespace tokens entirely (short form: -sb)
    #[arg(long)]
    suppress_blank: bool,

    /// Print runs of two or more spaces as (SPACEx<n>) (short form: -gs)
    #[arg(long)]
    group_spaces: bool,

    /// Files to tokenize, in order
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

impl Cli {
    fn mode_flags(&self) -> ModeFlags {
        ModeFlags {
            raw: self.raw,
            suppress_blank: self.suppress_blank,
            group_spaces: self.group_spaces,
        }
    }
}

/// Rewrite the two-letter single-dash flags to their long forms, up to `--`.
/// A lone `-` before `--` is an unknown flag, not a file name.
fn normalize_args<I>(args: I) -> Result<Vec<OsString>, ArgumentError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut past_separator = false;

    args.into_iter()
        .map(|arg| {
            if past_separator {
                return Ok(arg);
            }
            match arg.to_str() {
                Some("--") => {
                    past_separator = true;
                    Ok(arg)
                }
                Some("-") => Err(ArgumentError::UnknownFlag {
                    flag: "-".to_string(),
                }),
                Some("-sb") => Ok(OsString::from("--suppress-blank")),
                Some("-gs") => Ok(OsString::from("--group-spaces")),
                _ => Ok(arg),
            }
        })
        .collect()
}

fn parse_cli<I>(args: I) -> Result<Cli, CliError>
where
    I: IntoIterator<Item = OsString>,
{
    let args = normalize_args(args)?;
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if e.kind() == ErrorKind::UnknownArgument => {
            let flag = match e.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(flag)) => flag.clone(),
                _ => String::new(),
            };
            Err(ArgumentError::UnknownFlag { flag }.into())
        }
        Err(e) => {
            // Help text and clap's own usage errors
            let _ = e.print();
            std::process::exit(e.exit_code());
        }
    }
}

fn init_env_logger() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = RuntimeConfig::load()?;
    logging::init_global_logging(&config.logging)?;

    log_info!("tokdump starting", "version" => env!("CARGO_PKG_VERSION"));

    let flags = cli.mode_flags();
    let invocation = Invocation::new(flags, cli.files)?;

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(OUTPUT_BUFFER_CAPACITY, stdout.lock());

    match pipeline::run(&invocation, &config, &mut out) {
        Ok(_) => Ok(()),
        // Reader closed early (`tokdump big.c | head`)
        Err(e) if e.is_broken_pipe() => Ok(()),
        Err(e) => Err(e.into()),
    }
}

fn fail(error: &CliError) -> ExitCode {
    log::debug!(target: "tokdump", "exiting on {}", error.error_code());
    eprintln!("tokdump: error: {}", error);
    if error.is_usage_error() {
        eprintln!("Try 'tokdump --help' for more information.");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    init_env_logger();

    match parse_cli(std::env::args_os()).and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}
