use std::{io::Write, sync::OnceLock, time::Instant};

use log::LevelFilter;

fn start_time() -> Instant {
    static START: OnceLock<Instant> = OnceLock::new();
    *START.get_or_init(Instant::now)
}

/// Installs an `env_logger` backend printing the elapsed time, level and message.
/// Calling it again after a logger has been installed is a no-op.
pub fn build_logger_for_level(level: LevelFilter) {
    let start = start_time();
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format(move |buf, record| {
            writeln!(
                buf,
                "[{:>8}ms {:5}] {}",
                start.elapsed().as_millis(),
                record.level(),
                record.args()
            )
        })
        .try_init();
}

/// Raises `default` by one level per `verbose` step, e.g. `Warn` with two steps yields `Debug`.
pub fn build_logger_for_verbosity(default: LevelFilter, verbose: usize) {
    let level = LevelFilter::iter()
        .skip_while(|&l| l != default)
        .nth(verbose)
        .unwrap_or(LevelFilter::Trace);

    build_logger_for_level(level);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn repeated_initialization() {
        build_logger_for_level(LevelFilter::Info);
        build_logger_for_verbosity(LevelFilter::Warn, 2);
        ::log::info!("logger installed");
    }
}
