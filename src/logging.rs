use tracing::level_filters::LevelFilter;

/// Installs a stderr subscriber so stdout carries only the report line.
///
/// The level is fixed at `WARN`; calling this more than once is a no-op.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_max_level(LevelFilter::WARN)
        .try_init();
}
