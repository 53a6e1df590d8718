//! Shared plumbing for the command-line tools.

use clap::Parser;

/// Parses the command line, exiting on bad arguments.
///
/// Usage errors exit with status 1. `--help` and `--version` print to stdout and exit with 0.
pub fn parse_args<A: Parser>() -> A {
    A::try_parse().unwrap_or_else(|err| {
        let _ = err.print();
        std::process::exit(exit_code(&err))
    })
}

/// The exit status for a command line that couldn't be parsed.
pub fn exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}
