//! Runtime tunables for the board viewer.
//!
//! Every value has a compile-time default and can be overridden through an
//! environment variable. Command-line flags take priority over both.

use std::path::PathBuf;

/// Default directory for rolling log files.
const DEFAULT_LOG_DIR: &str = "logs";

/// Default duration of one batch of animations (in milliseconds).
const DEFAULT_RUN_TIME_MS: u64 = 1000;

/// Default frame interval (in milliseconds), roughly 30fps.
const DEFAULT_FRAME_MS: u64 = 33;

/// Get the directory holding piece PNGs.
///
/// Priority:
/// 1. `CHESSBOARD_ASSETS_DIR` env variable if set
/// 2. `None`, meaning generated silhouettes are used instead of files
pub fn get_assets_dir() -> Option<PathBuf> {
    std::env::var("CHESSBOARD_ASSETS_DIR").ok().map(PathBuf::from)
}

/// Get the log directory.
///
/// Priority:
/// 1. `CHESSBOARD_LOG_DIR` env variable if set
/// 2. `logs` as fallback
pub fn get_log_dir() -> PathBuf {
    if let Ok(path) = std::env::var("CHESSBOARD_LOG_DIR") {
        return PathBuf::from(path);
    }

    PathBuf::from(DEFAULT_LOG_DIR)
}

/// Get the animation run time in milliseconds.
///
/// Priority:
/// 1. `CHESSBOARD_RUN_TIME_MS` env variable if set (falls back to default if
///    the value cannot be parsed as a `u64`)
/// 2. `1000` as fallback
pub fn get_run_time_ms() -> u64 {
    if let Ok(ms) = std::env::var("CHESSBOARD_RUN_TIME_MS") {
        return ms.parse().unwrap_or(DEFAULT_RUN_TIME_MS);
    }

    DEFAULT_RUN_TIME_MS
}

/// Get the frame interval in milliseconds.
///
/// Priority:
/// 1. `CHESSBOARD_FRAME_MS` env variable if set (falls back to default if the
///    value cannot be parsed or is zero)
/// 2. `33` as fallback
pub fn get_frame_ms() -> u64 {
    if let Ok(ms) = std::env::var("CHESSBOARD_FRAME_MS") {
        return ms.parse().ok().filter(|v| *v > 0).unwrap_or(DEFAULT_FRAME_MS);
    }

    DEFAULT_FRAME_MS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_log_dir() {
        let path = get_log_dir();
        match std::env::var("CHESSBOARD_LOG_DIR") {
            Ok(val) => assert_eq!(path, PathBuf::from(val)),
            Err(_) => assert_eq!(path, PathBuf::from(DEFAULT_LOG_DIR)),
        }
    }

    #[test]
    fn test_get_assets_dir() {
        let dir = get_assets_dir();
        match std::env::var("CHESSBOARD_ASSETS_DIR") {
            Ok(val) => assert_eq!(dir, Some(PathBuf::from(val))),
            Err(_) => assert_eq!(dir, None),
        }
    }

    #[test]
    fn test_get_run_time_ms_default() {
        if std::env::var("CHESSBOARD_RUN_TIME_MS").is_err() {
            assert_eq!(get_run_time_ms(), DEFAULT_RUN_TIME_MS);
        }
    }

    #[test]
    fn test_get_frame_ms_is_positive() {
        assert!(get_frame_ms() > 0);
    }
}
