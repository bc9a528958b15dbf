//! User-facing messages with a severity the sink actually honors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Info => "info",
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
            AlertLevel::Error => "error",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown alert level: {0}")]
pub struct UnknownAlertLevel(pub String);

impl FromStr for AlertLevel {
    type Err = UnknownAlertLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(AlertLevel::Info),
            "success" => Ok(AlertLevel::Success),
            "warning" | "warn" => Ok(AlertLevel::Warning),
            "error" => Ok(AlertLevel::Error),
            other => Err(UnknownAlertLevel(other.to_string())),
        }
    }
}

/// Where alerts are shown: a modal dialog, a toast area, a log.
pub trait AlertSink {
    fn present(&self, level: AlertLevel, message: &str);
}

pub fn show_alert<S: AlertSink + ?Sized>(sink: &S, message: &str, level: AlertLevel) {
    sink.present(level, message);
}

/// Writes alerts to the `tracing` subscriber at a matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAlertSink;

impl AlertSink for TracingAlertSink {
    fn present(&self, level: AlertLevel, message: &str) {
        match level {
            AlertLevel::Info | AlertLevel::Success => info!(%level, "{message}"),
            AlertLevel::Warning => warn!(%level, "{message}"),
            AlertLevel::Error => error!(%level, "{message}"),
        }
    }
}
