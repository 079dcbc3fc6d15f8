//! eid - Command-line tool for rendering item descriptions with inline markup

use std::process::ExitCode;

use eidtext::cli;

fn main() -> ExitCode {
    cli::run()
}
