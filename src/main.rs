use clap::Parser;
use hq::cli::{self, Args};
use std::io::{self, IsTerminal};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();
    cli::init_logging(args.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let interactive = stdin.is_terminal();
    match cli::run(&args, stdin.lock(), interactive, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
