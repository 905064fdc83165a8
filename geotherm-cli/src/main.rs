//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use geotherm_cli::CliError;

#[expect(clippy::print_stderr, reason = "failures are reported on the terminal")]
fn main() {
    match geotherm_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("geotherm: {err}");
            std::process::exit(1);
        }
    }
}
