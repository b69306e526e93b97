//! Host platform seams. The embedding shell implements these against the
//! real permission, usage-stats, package-manager and UI services.

use std::sync::Arc;

use crate::{
    error::UsageError,
    models::{AppInfo, IntervalGranularity, UsageRecord},
};

#[cfg(test)]
pub mod fake;

pub trait UsageAccess: Send + Sync {
    fn has_usage_permission(&self) -> bool;

    /// Sends the user to the screen where usage access is granted.
    fn open_usage_access_settings(&self);
}

pub trait UsageStatsProvider: Send + Sync {
    /// Per-package foreground usage between `start_ms` and `end_ms`
    /// (epoch milliseconds).
    fn query_usage_stats(
        &self,
        granularity: IntervalGranularity,
        start_ms: i64,
        end_ms: i64,
    ) -> Vec<UsageRecord>;
}

pub trait PackageResolver: Send + Sync {
    /// Fails with `UsageError::PackageNotFound` for uninstalled packages.
    fn application_info(&self, package: &str) -> Result<AppInfo, UsageError>;
}

/// Short user-visible messages (toasts on mobile).
pub trait Notifier: Send + Sync {
    fn show_message(&self, message: &str);
}

pub trait DisplaySurface: Send + Sync {
    fn set_useful_text(&self, text: &str);
    fn set_non_useful_text(&self, text: &str);
}

/// Everything the usage screen needs from the host.
#[derive(Clone)]
pub struct Host {
    pub access: Arc<dyn UsageAccess>,
    pub stats: Arc<dyn UsageStatsProvider>,
    pub packages: Arc<dyn PackageResolver>,
    pub notifier: Arc<dyn Notifier>,
    pub display: Arc<dyn DisplaySurface>,
}
