//! Runtime configuration read from the environment.
//!
//! | Variable                   | Default | Meaning                                      |
//! |----------------------------|---------|----------------------------------------------|
//! | `WASHDAY_HORIZON_DAYS`     | 14      | Days offered for collection and delivery     |
//! | `WASHDAY_PROCESSING_HOURS` | 24      | Minimum turnaround before delivery           |
//! | `WASHDAY_BOOKINGS_FILE`    | unset   | JSON map of ISO date to booked slot values   |
//! | `WASHDAY_LOG_FILE`         | unset   | Log destination; logging is off when unset   |
//! | `WASHDAY_LOG_LEVEL`        | `info`  | `tracing` filter directive                   |

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use washday_core::SchedulePolicy;

#[derive(Debug, Clone)]
pub(crate) struct TuiConfig {
    pub policy: SchedulePolicy,
    pub bookings_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl TuiConfig {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut policy = SchedulePolicy::default();

        if let Some(days) = lookup("WASHDAY_HORIZON_DAYS") {
            policy.horizon_days = days
                .trim()
                .parse()
                .with_context(|| format!("Invalid WASHDAY_HORIZON_DAYS value: {days}"))?;
        }
        if let Some(hours) = lookup("WASHDAY_PROCESSING_HOURS") {
            policy.processing_hours = hours
                .trim()
                .parse()
                .with_context(|| format!("Invalid WASHDAY_PROCESSING_HOURS value: {hours}"))?;
        }
        policy.validate().context("Invalid scheduling policy")?;

        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(Self {
            policy,
            bookings_file: non_empty("WASHDAY_BOOKINGS_FILE").map(PathBuf::from),
            log_file: non_empty("WASHDAY_LOG_FILE").map(PathBuf::from),
            log_level: non_empty("WASHDAY_LOG_LEVEL").unwrap_or_else(|| "info".to_owned()),
        })
    }
}
