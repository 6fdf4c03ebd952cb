//! CLI entry point for dirloc

use std::process::ExitCode;

use dirloc::CancellationToken;
use log::warn;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Ctrl-C stops output after the record being printed.
    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!("cannot install interrupt handler: {err}");
    }

    dirloc::cli::main_with_args(std::env::args_os(), &token)
}
