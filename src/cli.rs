//! The `hq` command-line front end.
use crate::error::HqError;
use crate::{HtmlDocument, Query};
use clap::{CommandFactory, Parser};
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Query HTML documents with a jq-like pipeline language.
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// The query, e.g. `find("a")[] | attr("href")`. Without one, the input
    /// is copied to the output unchanged.
    pub query: Option<String>,

    /// Read the document from a file instead of standard input
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the parsed query in canonical form instead of running it
    #[arg(long, default_value_t = false)]
    pub explain: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

/// Initialises `env_logger`. `RUST_LOG` takes precedence over `--debug`.
pub fn init_logging(debug: bool) {
    let env = env_logger::Env::default().default_filter_or(default_log_filter(debug));
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn default_log_filter(debug: bool) -> &'static str {
    if debug { "hq=debug" } else { "hq=warn" }
}

/// Runs one invocation. Refuses to read standard input when it is an
/// interactive terminal, since a document is expected there.
pub fn run<R, W>(args: &Args, stdin: R, interactive: bool, out: &mut W) -> Result<(), HqError>
where
    R: BufRead,
    W: Write,
{
    if args.explain {
        let query = Query::compile(args.query.as_deref().unwrap_or_default())?;
        writeln!(out, "{}", query.filter())?;
        return Ok(());
    }

    match &args.file {
        Some(path) => {
            log::debug!("Reading document from {}", path.display());
            let file = io::BufReader::new(File::open(path)?);
            run_with_input(args, file, out)
        }
        None if interactive => {
            log::debug!("Standard input is a terminal, not reading it");
            Err(HqError::Usage(Args::command().render_help().to_string()))
        }
        None => run_with_input(args, stdin, out),
    }
}

fn run_with_input<R, W>(args: &Args, mut input: R, out: &mut W) -> Result<(), HqError>
where
    R: BufRead,
    W: Write,
{
    let Some(source) = args.query.as_deref() else {
        io::copy(&mut input, out)?;
        return Ok(());
    };

    // Compile first so a bad query fails before the document is read.
    let query = Query::compile(source)?;
    let document = HtmlDocument::from_reader(input)?;
    let rendered = query.exec_document(&document)?;
    writeln!(out, "{}", rendered)?;
    Ok(())
}
