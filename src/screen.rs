use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::{
    alerts::{AlertConfig, AlertScheduler},
    classify::{CategoryStrategy, KeywordStrategy, UsageClassifier},
    error::UsageError,
    models::UsageWindow,
    platform::Host,
    render::{render_usage, RenderedUsage},
    settings::MonitorSettings,
};

const ENABLE_LOGS: bool = true;

use crate::{log_info, log_warn};

pub const PERMISSION_ADVISORY: &str = "Please grant Usage Access permission";

/// Runs the activation pipeline: permission check, classification, alerts,
/// then both text blocks onto the display.
#[derive(Clone)]
pub struct UsageScreen {
    host: Host,
    classifier: UsageClassifier,
    alerts: AlertScheduler,
    window_hours: u32,
    /// Set when the caller supplied its own strategy; otherwise keywords
    /// come from settings.
    custom_strategy: Option<Arc<dyn CategoryStrategy>>,
}

impl UsageScreen {
    pub fn new(host: Host, settings: &MonitorSettings) -> Self {
        let alerts = AlertScheduler::new(host.notifier.clone(), AlertConfig::from(settings));
        Self::assemble(host, settings, alerts, None)
    }

    pub fn with_strategy(
        host: Host,
        settings: &MonitorSettings,
        strategy: Arc<dyn CategoryStrategy>,
    ) -> Self {
        let alerts = AlertScheduler::new(host.notifier.clone(), AlertConfig::from(settings));
        Self::assemble(host, settings, alerts, Some(strategy))
    }

    /// Rebuilds the screen from fresh settings. Pending follow-ups carry
    /// over and are still superseded per package.
    pub fn apply_settings(&self, settings: &MonitorSettings) -> Self {
        let alerts = self.alerts.with_config(AlertConfig::from(settings));
        Self::assemble(
            self.host.clone(),
            settings,
            alerts,
            self.custom_strategy.clone(),
        )
    }

    fn assemble(
        host: Host,
        settings: &MonitorSettings,
        alerts: AlertScheduler,
        custom_strategy: Option<Arc<dyn CategoryStrategy>>,
    ) -> Self {
        let strategy: Arc<dyn CategoryStrategy> = match &custom_strategy {
            Some(strategy) => strategy.clone(),
            None => Arc::new(KeywordStrategy::new(&settings.non_useful_keywords)),
        };
        let classifier = UsageClassifier::new(
            host.access.clone(),
            host.stats.clone(),
            host.packages.clone(),
            strategy,
        )
        .with_granularity(settings.granularity);

        Self {
            host,
            classifier,
            alerts,
            window_hours: settings.window_hours,
            custom_strategy,
        }
    }

    pub fn alerts(&self) -> &AlertScheduler {
        &self.alerts
    }

    pub async fn activate(&self) -> Result<RenderedUsage, UsageError> {
        self.activate_at(Utc::now()).await
    }

    pub async fn activate_at(&self, now: DateTime<Utc>) -> Result<RenderedUsage, UsageError> {
        if !self.classifier.has_usage_permission() {
            log_warn!("Usage access not granted; redirecting to settings");
            self.host.access.open_usage_access_settings();
            self.host.notifier.show_message(PERMISSION_ADVISORY);
            return Err(UsageError::PermissionDenied);
        }

        let window = UsageWindow::trailing(now, self.window_hours)?;
        let result = self.classifier.classify_usage(&window);

        for app in &result.non_useful {
            self.alerts
                .emit_alert_if_over_threshold(&app.package, app.foreground_ms)
                .await;
        }

        let rendered = render_usage(&result);
        self.host
            .display
            .set_useful_text(&rendered.useful_with_heading());
        self.host
            .display
            .set_non_useful_text(&rendered.non_useful_with_heading());

        log_info!(
            "Usage screen updated for {} - {}",
            window.start.to_rfc3339(),
            window.end.to_rfc3339()
        );

        Ok(rendered)
    }

    /// Drops any reminders still waiting to fire.
    pub async fn close(&self) {
        self.alerts.shutdown().await;
    }
}
