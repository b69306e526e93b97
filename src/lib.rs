mod alerts;
mod classify;
mod error;
mod models;
mod platform;
mod render;
mod screen;
mod settings;
mod utils;

use std::{path::PathBuf, sync::Mutex};

use anyhow::Result;
use log::{info, warn};

pub use alerts::{AlertConfig, AlertKind, AlertScheduler, BreakAlert};
pub use classify::{CategoryStrategy, KeywordStrategy, TaxonomyStrategy, UsageClassifier};
pub use error::UsageError;
pub use models::{
    AppCategory, AppInfo, ClassificationResult, ClassifiedApp, IntervalGranularity, UsageRecord,
    UsageWindow,
};
pub use platform::{DisplaySurface, Host, Notifier, PackageResolver, UsageAccess, UsageStatsProvider};
pub use render::{format_line, render, render_usage, RenderedUsage};
pub use screen::{UsageScreen, PERMISSION_ADVISORY};
pub use settings::{MonitorSettings, SettingsStore};
pub use utils::init_logging;

/// Long-lived state a host shell keeps for the usage screen.
pub struct FocusApp {
    pub settings: SettingsStore,
    screen: Mutex<UsageScreen>,
}

impl FocusApp {
    /// Initialises logging, loads settings and wires the screen to `host`.
    pub fn start(host: Host, settings_path: PathBuf) -> Result<Self> {
        init_logging();
        info!("MyFocus starting up...");

        let settings = SettingsStore::new(settings_path)?;
        let screen = UsageScreen::new(host, &settings.monitor());

        Ok(Self {
            settings,
            screen: Mutex::new(screen),
        })
    }

    /// The screen as configured by the current settings.
    pub fn screen(&self) -> UsageScreen {
        let mut guard = self
            .screen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = guard.apply_settings(&self.settings.monitor());
        guard.clone()
    }

    /// Runs one activation. `None` means the user was sent to grant access.
    pub async fn on_create(&self) -> Result<Option<RenderedUsage>> {
        match self.screen().activate().await {
            Ok(rendered) => Ok(Some(rendered)),
            Err(UsageError::PermissionDenied) => {
                warn!("Usage screen waiting on usage access permission");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn on_destroy(&self) {
        self.screen().close().await;
    }
}
