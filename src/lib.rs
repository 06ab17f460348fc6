//! Size-constrained clustering of geographic points.
//!
//! Partitions a set of stops into exactly K clusters whose sizes stay inside a
//! deviation band around the even split, minimizing total squared distance to
//! the cluster centroids. The assignment step is an exact min-cost flow, so the
//! size bounds hold after every pass rather than being repaired afterwards.
//!
//! ## Modules
//!
//! - [`geometry`]: raw records, coordinates, and the admitted point set
//! - [`clustering`]: capacity planning, seeding, the flow solver, and the controller
//! - [`io`]: data source and data sink collaborators
pub mod clustering;
pub mod error;
pub mod geometry;
pub mod id;
pub mod io;

#[cfg(feature = "cli")]
pub mod cli;

pub use error::*;
pub use id::*;

// ============================================================================
// TYPE ALIASES
// ============================================================================
/// Squared distances, assignment costs, and objective values.
pub type Energy = f64;
/// Longitude and latitude components.
pub type Degrees = f64;

// ============================================================================
// K-MEANS CLUSTERING
// Lloyd iterations over an exact balanced assignment step.
// ============================================================================
/// Hard cap on assignment/centroid passes before settling for the best seen.
pub const KMEANS_MAX_ITERATIONS: usize = 100;
/// Default seed for k-means++ initialization.
pub const KMEANS_SEED: u64 = 42;
/// Relative size of the nudge applied when seeding runs out of distinct points.
pub const SEEDING_JITTER: Degrees = 1e-9;

// ============================================================================
// DATA SINK DELIVERY
// ============================================================================
/// Updates written per sink call.
pub const SINK_BATCH_SIZE: usize = 100;
/// Extra attempts for a batch before it is written row by row.
pub const SINK_RETRIES: usize = 3;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to stderr.
#[cfg(feature = "cli")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Parse duration string like "30s", "5m", "2h", "1d" into Duration.
pub fn parse_duration(s: &str) -> Option<std::time::Duration> {
    let s = s.trim();
    let (split, unit) = s.char_indices().last()?;
    let value: u64 = s[..split].parse().ok()?;
    let scale = match unit {
        's' => 1,
        'm' => 60,
        'h' => 3600,
        'd' => 86400,
        _ => return None,
    };
    value.checked_mul(scale).map(std::time::Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::parse_duration;
    use std::time::Duration;

    #[test]
    fn durations_parse_with_units() {
        assert_eq!(parse_duration("30s"), Some(Duration::from_secs(30)));
        assert_eq!(parse_duration(" 5m "), Some(Duration::from_secs(300)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
    }

    #[test]
    fn durations_reject_garbage() {
        assert_eq!(parse_duration("10"), None);
        assert_eq!(parse_duration("xs"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5µ"), None);
        assert_eq!(parse_duration("µ"), None);
        assert_eq!(parse_duration("999999999999999999d"), None);
    }
}
