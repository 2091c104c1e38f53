use std::io::Write;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

/// Environment variable holding the log filter, e.g. `debug` or
/// `netbattle::session=trace`.
pub const LOG_ENV: &str = "NETBATTLE_LOG";

/// Writes records to stderr, leaving stdout to the board and prompts.
struct GameLogger {
    level: LevelFilter,
    /// Only targets under this module path are logged, if set.
    target: Option<String>,
    started: Instant,
}

impl GameLogger {
    fn from_filter(filter: &str) -> Self {
        let (level, target) = parse_filter(filter);
        Self {
            level,
            target,
            started: Instant::now(),
        }
    }

    fn accepts_target(&self, target: &str) -> bool {
        match &self.target {
            None => true,
            Some(prefix) => {
                target == prefix
                    || target
                        .strip_prefix(prefix.as_str())
                        .is_some_and(|rest| rest.starts_with("::"))
            }
        }
    }
}

impl Log for GameLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && self.accepts_target(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.started.elapsed();
        let mut err = std::io::stderr().lock();
        let _ = writeln!(
            err,
            "{:>4}.{:03} {:<5} {}: {}",
            elapsed.as_secs(),
            elapsed.subsec_millis(),
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Split a filter of the form `level` or `target=level`.
/// An unparsable level falls back to `info`.
fn parse_filter(filter: &str) -> (LevelFilter, Option<String>) {
    let filter = filter.trim();
    let (target, level) = match filter.split_once('=') {
        Some((target, level)) => (Some(target.trim()), level),
        None => (None, filter),
    };
    let level = level.trim().parse().unwrap_or(LevelFilter::Info);
    let target = target.filter(|t| !t.is_empty()).map(str::to_owned);
    (level, target)
}

/// Install the stderr logger using the filter in `NETBATTLE_LOG`, `info` when unset.
/// Calling it again is a no-op.
pub fn init_logging() {
    let filter = std::env::var(LOG_ENV).unwrap_or_default();
    let logger = GameLogger::from_filter(&filter);
    let level = logger.level;
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(parse_filter(""), (LevelFilter::Info, None));
        assert_eq!(parse_filter("DEBUG"), (LevelFilter::Debug, None));
        assert_eq!(parse_filter("loud"), (LevelFilter::Info, None));
        assert_eq!(
            parse_filter("netbattle::session=trace"),
            (LevelFilter::Trace, Some("netbattle::session".to_owned()))
        );
        assert_eq!(parse_filter("=warn"), (LevelFilter::Warn, None));
    }

    #[test]
    fn test_target_prefix_matches_whole_segments() {
        let logger = GameLogger::from_filter("netbattle::core=debug");
        assert!(logger.accepts_target("netbattle::core"));
        assert!(logger.accepts_target("netbattle::core::game"));
        assert!(!logger.accepts_target("netbattle::corer"));
        assert!(!logger.accepts_target("netbattle::session"));
    }
}
