use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use tokio::{sync::Mutex, task::JoinHandle, time};
use tokio_util::sync::CancellationToken;

use crate::{platform::Notifier, settings::MonitorSettings};

use super::BreakAlert;

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info, log_warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlertConfig {
    /// Usage must be strictly greater than this to alert.
    pub threshold_ms: u64,
    pub follow_up_delay: Duration,
    pub enabled: bool,
}

impl From<&MonitorSettings> for AlertConfig {
    fn from(settings: &MonitorSettings) -> Self {
        Self {
            threshold_ms: settings.threshold_ms,
            follow_up_delay: Duration::from_millis(settings.follow_up_delay_ms),
            enabled: settings.alerts_enabled,
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self::from(&MonitorSettings::default())
    }
}

struct PendingAlert {
    generation: u64,
    cancel_token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Issues break reminders and owns the follow-up tasks, at most one per
/// package. Clones share the same pending table.
#[derive(Clone)]
pub struct AlertScheduler {
    notifier: Arc<dyn Notifier>,
    config: AlertConfig,
    pending: Arc<Mutex<HashMap<String, PendingAlert>>>,
    generations: Arc<AtomicU64>,
}

impl AlertScheduler {
    pub fn new(notifier: Arc<dyn Notifier>, config: AlertConfig) -> Self {
        Self {
            notifier,
            config,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generations: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn config(&self) -> AlertConfig {
        self.config
    }

    /// A scheduler with new thresholds that shares this one's pending table,
    /// so follow-ups already scheduled are still superseded.
    pub fn with_config(&self, config: AlertConfig) -> Self {
        Self {
            config,
            ..self.clone()
        }
    }

    /// Alerts now and schedules one follow-up when `foreground_ms` is over
    /// the threshold. Returns whether an alert fired.
    pub async fn emit_alert_if_over_threshold(&self, package: &str, foreground_ms: u64) -> bool {
        if foreground_ms <= self.config.threshold_ms {
            return false;
        }

        if !self.config.enabled {
            log_info!(
                "{} over threshold ({} ms) but alerts are disabled",
                package,
                foreground_ms
            );
            return false;
        }

        let alert = BreakAlert::immediate(package);
        log_info!("{}", alert.message);
        self.notifier.show_message(&alert.message);

        self.schedule_follow_up(package).await;
        true
    }

    /// Replaces any follow-up already pending for `package`.
    async fn schedule_follow_up(&self, package: &str) {
        let mut pending = self.pending.lock().await;

        if let Some(previous) = pending.remove(package) {
            log_debug!("Superseding pending follow-up for {}", package);
            previous.cancel_token.cancel();
        }

        let generation = self.generations.fetch_add(1, Ordering::SeqCst);
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(follow_up_task(
            package.to_string(),
            generation,
            self.config.follow_up_delay,
            self.notifier.clone(),
            self.pending.clone(),
            cancel_token.clone(),
        ));

        pending.insert(
            package.to_string(),
            PendingAlert {
                generation,
                cancel_token,
                handle,
            },
        );
    }

    /// Returns whether a follow-up was pending.
    pub async fn cancel(&self, package: &str) -> bool {
        match self.pending.lock().await.remove(package) {
            Some(alert) => {
                alert.cancel_token.cancel();
                true
            }
            None => false,
        }
    }

    pub async fn cancel_all(&self) {
        let mut pending = self.pending.lock().await;
        for (_, alert) in pending.drain() {
            alert.cancel_token.cancel();
        }
    }

    pub async fn pending_packages(&self) -> Vec<String> {
        let mut packages: Vec<String> = self.pending.lock().await.keys().cloned().collect();
        packages.sort();
        packages
    }

    /// Cancels every follow-up and waits for the tasks to finish.
    pub async fn shutdown(&self) {
        let drained: Vec<PendingAlert> = {
            let mut pending = self.pending.lock().await;
            pending.drain().map(|(_, alert)| alert).collect()
        };

        for alert in drained {
            alert.cancel_token.cancel();
            if let Err(err) = alert.handle.await {
                log_warn!("follow-up alert task failed to join: {err}");
            }
        }
    }
}

async fn follow_up_task(
    package: String,
    generation: u64,
    delay: Duration,
    notifier: Arc<dyn Notifier>,
    pending: Arc<Mutex<HashMap<String, PendingAlert>>>,
    cancel_token: CancellationToken,
) {
    tokio::select! {
        _ = time::sleep(delay) => {
            {
                let mut guard = pending.lock().await;
                let current = guard.get(&package).map(|alert| alert.generation) == Some(generation);
                // cancellation can land while this task waits on the lock
                if !current || cancel_token.is_cancelled() {
                    log_debug!("Follow-up for {} superseded before firing", package);
                    return;
                }
                guard.remove(&package);
            }

            let alert = BreakAlert::follow_up(&package);
            log_info!("{}", alert.message);
            notifier.show_message(&alert.message);
        }
        _ = cancel_token.cancelled() => {
            log_debug!("Follow-up for {} cancelled", package);
        }
    }
}
