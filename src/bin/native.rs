use std::process::ExitCode;

use parsebench::{NativeBackend, runner};

fn main() -> ExitCode {
    runner::execute(&NativeBackend)
}
