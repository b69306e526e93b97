use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::UsageError;

/// Foreground usage for one package over the queried window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub package: String,
    pub foreground_ms: u64,
}

impl UsageRecord {
    pub fn new(package: impl Into<String>, foreground_ms: u64) -> Self {
        Self {
            package: package.into(),
            foreground_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AppCategory {
    System,
    SocialEntertainment,
    Other,
    Unknown,
}

impl AppCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppCategory::System => "SYSTEM",
            AppCategory::SocialEntertainment => "SOCIAL/ENTERTAINMENT",
            AppCategory::Other => "OTHER",
            AppCategory::Unknown => "UNKNOWN",
        }
    }

    /// Only social/entertainment usage counts against the user.
    pub fn is_non_useful(&self) -> bool {
        matches!(self, AppCategory::SocialEntertainment)
    }
}

/// Application metadata as reported by the platform package manager.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub package: String,
    pub is_system: bool,
}

/// Bucket size the platform aggregates usage into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum IntervalGranularity {
    #[default]
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Best,
}

/// Half-open query window `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UsageWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl UsageWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, UsageError> {
        if start >= end {
            return Err(UsageError::InvalidWindow {
                start_ms: start.timestamp_millis(),
                end_ms: end.timestamp_millis(),
            });
        }
        Ok(Self { start, end })
    }

    /// The `hours` leading up to `now`.
    pub fn trailing(now: DateTime<Utc>, hours: u32) -> Result<Self, UsageError> {
        let span = Duration::hours(i64::from(hours));
        let start = now
            .checked_sub_signed(span)
            .ok_or(UsageError::InvalidWindow {
                start_ms: now
                    .timestamp_millis()
                    .saturating_sub(span.num_milliseconds()),
                end_ms: now.timestamp_millis(),
            })?;
        Self::new(start, now)
    }

    pub fn start_ms(&self) -> i64 {
        self.start.timestamp_millis()
    }

    pub fn end_ms(&self) -> i64 {
        self.end.timestamp_millis()
    }
}

/// One classified package, kept until rendering.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassifiedApp {
    pub package: String,
    pub foreground_ms: u64,
    pub category: AppCategory,
}

impl ClassifiedApp {
    pub fn foreground_secs(&self) -> u64 {
        self.foreground_ms / 1000
    }
}

/// Output of a single classification pass. Built fresh every time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    pub useful: Vec<ClassifiedApp>,
    pub non_useful: Vec<ClassifiedApp>,
    /// Packages the platform could not resolve.
    pub skipped: Vec<String>,
}

impl ClassificationResult {
    pub fn push(&mut self, app: ClassifiedApp) {
        if app.category.is_non_useful() {
            self.non_useful.push(app);
        } else {
            self.useful.push(app);
        }
    }

    pub fn total_seen(&self) -> usize {
        self.useful.len() + self.non_useful.len() + self.skipped.len()
    }
}
