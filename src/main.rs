use std::process::ExitCode;

use clap::Parser;
use theme_check::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    theme_check::cli::init_tracing(args.verbose());

    match theme_check::cli::run_cli(args) {
        Ok(status) => status.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
