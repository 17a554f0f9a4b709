use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Longest accepted playback tick.
pub const MAX_TICK_MS: u64 = 60_000;

/// Settings for the relay binary, read from `STREAMRING_*` variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Ring capacity in samples.
    pub capacity: usize,
    /// Samples handed to sinks per read.
    pub chunk: usize,
    /// At most [`MAX_TICK_MS`].
    pub tick_ms: u64,
    pub output: PathBuf,
    /// Capture file size in bytes, header included.
    pub capture_bytes: usize,
    pub sample_rate: u32,
    pub channels: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            capacity: 64 * 1024,
            chunk: 1024,
            tick_ms: 10,
            output: PathBuf::from("/tmp/streamring_capture.raw"),
            capture_bytes: 64 * 1024 * 1024,
            sample_rate: 48_000,
            channels: 2,
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            capacity: positive(&lookup, "STREAMRING_CAPACITY", defaults.capacity),
            chunk: positive(&lookup, "STREAMRING_CHUNK", defaults.chunk),
            tick_ms: at_most(&lookup, "STREAMRING_TICK_MS", defaults.tick_ms, MAX_TICK_MS),
            output: lookup("STREAMRING_OUTPUT")
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.output),
            capture_bytes: positive(&lookup, "STREAMRING_CAPTURE_BYTES", defaults.capture_bytes),
            sample_rate: positive(&lookup, "STREAMRING_SAMPLE_RATE", defaults.sample_rate),
            channels: positive(&lookup, "STREAMRING_CHANNELS", defaults.channels),
        }
    }
}

fn positive<F, N>(lookup: &F, key: &str, default: N) -> N
where
    F: Fn(&str) -> Option<String>,
    N: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<N>() {
        Ok(value) if value > N::default() => value,
        _ => {
            tracing::warn!(key, value = %raw, %default, "ignoring invalid setting");
            default
        }
    }
}

fn at_most<F, N>(lookup: &F, key: &str, default: N, max: N) -> N
where
    F: Fn(&str) -> Option<String>,
    N: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    let value = positive(lookup, key, default);
    if value > max {
        tracing::warn!(key, %value, %max, %default, "setting above limit");
        return default;
    }
    value
}
