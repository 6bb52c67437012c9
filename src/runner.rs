use std::fmt;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use tracing::{debug, error};

use crate::backend::Backend;
use crate::config::BenchConfig;
use crate::error::BenchError;
use crate::logging;

/// Elapsed time of one timed loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timing {
    nanos: u128,
}

impl Timing {
    pub fn from_nanos(nanos: u128) -> Self {
        Self { nanos }
    }

    pub fn nanos(&self) -> u128 {
        self.nanos
    }

    pub fn millis(&self) -> f64 {
        self.nanos as f64 / 1e6
    }
}

/// The single line a run prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub label: &'static str,
    pub timing: Timing,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} took {} nanoseconds => {}ms",
            self.label,
            self.timing.nanos(),
            self.timing.millis()
        )
    }
}

pub fn load_input(path: &Path) -> Result<Vec<u8>, BenchError> {
    let input = fs::read(path).map_err(|source| BenchError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = input.len(), "loaded input");
    Ok(input)
}

/// Parses `input` `iterations` times and measures the whole loop.
///
/// Every result is passed through [`black_box`] and dropped. The first parse
/// failure ends the loop and no timing is produced.
pub fn run<B: Backend>(backend: &B, input: &[u8], iterations: u32) -> Result<Timing, BenchError> {
    debug!(backend = B::LABEL, iterations, "starting timed loop");
    let start = Instant::now();
    for _ in 0..iterations {
        let value = backend.parse(black_box(input))?;
        black_box(value);
    }
    let timing = Timing::from_nanos(start.elapsed().as_nanos());
    debug!(backend = B::LABEL, nanos = %timing.nanos(), "finished timed loop");
    Ok(timing)
}

/// Loads the configured input, then times it. The clock starts after the read.
pub fn run_config<B: Backend>(backend: &B, config: &BenchConfig) -> Result<Report, BenchError> {
    let input = load_input(&config.input_path)?;
    let timing = run(backend, &input, config.iterations)?;
    Ok(Report {
        label: B::LABEL,
        timing,
    })
}

/// Binary entry point: prints the report on success, logs the error otherwise.
pub fn execute<B: Backend>(backend: &B) -> ExitCode {
    logging::init();
    match run_config(backend, &BenchConfig::default()) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
