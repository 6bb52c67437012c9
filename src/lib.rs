pub mod backend;
pub mod config;
pub mod error;
pub mod logging;
pub mod native;
pub mod runner;

pub use backend::{Backend, NativeBackend, SerdeBackend};
pub use config::BenchConfig;
pub use error::BenchError;
pub use native::{JsonValue, ParserError};
pub use runner::{Report, Timing};
