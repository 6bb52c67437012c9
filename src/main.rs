use std::process::ExitCode;

use parsebench::{SerdeBackend, runner};

fn main() -> ExitCode {
    runner::execute(&SerdeBackend)
}
