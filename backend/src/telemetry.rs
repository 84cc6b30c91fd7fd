//! Tracing subscriber installation.

use std::str::FromStr;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::SettingsError;

/// Output format for log records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable multi-line output for local work.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(SettingsError::UnknownLogFormat {
                value: other.to_owned(),
            }),
        }
    }
}

/// Install the global subscriber, filtered by `RUST_LOG`.
///
/// A subscriber that is already installed wins; the failure is logged
/// through it rather than treated as fatal.
pub fn init(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let result = match format {
        LogFormat::Json => fmt().with_env_filter(filter).json().try_init(),
        LogFormat::Pretty => fmt().with_env_filter(filter).pretty().try_init(),
    };
    if let Err(error) = result {
        warn!(%error, "tracing init failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("json", LogFormat::Json)]
    #[case(" Pretty ", LogFormat::Pretty)]
    fn parses_known_formats(#[case] raw: &str, #[case] expected: LogFormat) {
        assert_eq!(raw.parse::<LogFormat>(), Ok(expected));
    }

    #[rstest]
    fn second_init_does_not_panic() {
        init(LogFormat::Json);
        init(LogFormat::Pretty);
    }
}
