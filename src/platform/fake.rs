use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use tokio::sync::mpsc;

use super::{DisplaySurface, Host, Notifier, PackageResolver, UsageAccess, UsageStatsProvider};
use crate::{
    error::UsageError,
    models::{AppInfo, IntervalGranularity, UsageRecord},
};

pub struct FakeAccess {
    pub granted: AtomicBool,
    pub settings_opened: AtomicUsize,
}

impl FakeAccess {
    pub fn new(granted: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
            settings_opened: AtomicUsize::new(0),
        }
    }
}

impl UsageAccess for FakeAccess {
    fn has_usage_permission(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn open_usage_access_settings(&self) {
        self.settings_opened.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
pub struct FakeStats {
    pub records: Vec<UsageRecord>,
    pub queries: Mutex<Vec<(IntervalGranularity, i64, i64)>>,
}

impl FakeStats {
    pub fn new(records: Vec<UsageRecord>) -> Self {
        Self {
            records,
            queries: Mutex::new(Vec::new()),
        }
    }
}

impl UsageStatsProvider for FakeStats {
    fn query_usage_stats(
        &self,
        granularity: IntervalGranularity,
        start_ms: i64,
        end_ms: i64,
    ) -> Vec<UsageRecord> {
        self.queries
            .lock()
            .unwrap()
            .push((granularity, start_ms, end_ms));
        self.records.clone()
    }
}

/// Installed packages mapped to their system flag.
#[derive(Default)]
pub struct FakePackages {
    pub installed: HashMap<String, bool>,
}

impl FakePackages {
    pub fn with(entries: &[(&str, bool)]) -> Self {
        Self {
            installed: entries
                .iter()
                .map(|(package, system)| ((*package).to_string(), *system))
                .collect(),
        }
    }
}

impl PackageResolver for FakePackages {
    fn application_info(&self, package: &str) -> Result<AppInfo, UsageError> {
        self.installed
            .get(package)
            .map(|is_system| AppInfo {
                package: package.to_string(),
                is_system: *is_system,
            })
            .ok_or_else(|| UsageError::PackageNotFound(package.to_string()))
    }
}

/// Records every message and mirrors it onto a channel so async tests can
/// wait for delayed alerts.
pub struct RecordingNotifier {
    pub messages: Mutex<Vec<String>>,
    tx: mpsc::UnboundedSender<String>,
}

impl RecordingNotifier {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                messages: Mutex::new(Vec::new()),
                tx,
            }),
            rx,
        )
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn show_message(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
        let _ = self.tx.send(message.to_string());
    }
}

#[derive(Default)]
pub struct FakeDisplay {
    pub useful: Mutex<Option<String>>,
    pub non_useful: Mutex<Option<String>>,
}

impl DisplaySurface for FakeDisplay {
    fn set_useful_text(&self, text: &str) {
        *self.useful.lock().unwrap() = Some(text.to_string());
    }

    fn set_non_useful_text(&self, text: &str) {
        *self.non_useful.lock().unwrap() = Some(text.to_string());
    }
}

pub struct FakeHost {
    pub access: Arc<FakeAccess>,
    pub stats: Arc<FakeStats>,
    pub packages: Arc<FakePackages>,
    pub notifier: Arc<RecordingNotifier>,
    pub display: Arc<FakeDisplay>,
    pub alerts: mpsc::UnboundedReceiver<String>,
}

impl FakeHost {
    pub fn new(granted: bool, records: Vec<UsageRecord>, installed: &[(&str, bool)]) -> Self {
        let (notifier, alerts) = RecordingNotifier::new();
        Self {
            access: Arc::new(FakeAccess::new(granted)),
            stats: Arc::new(FakeStats::new(records)),
            packages: Arc::new(FakePackages::with(installed)),
            notifier,
            display: Arc::new(FakeDisplay::default()),
            alerts,
        }
    }

    pub fn host(&self) -> Host {
        Host {
            access: self.access.clone(),
            stats: self.stats.clone(),
            packages: self.packages.clone(),
            notifier: self.notifier.clone(),
            display: self.display.clone(),
        }
    }
}
