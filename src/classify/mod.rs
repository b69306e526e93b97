pub mod strategy;

pub use strategy::{CategoryStrategy, KeywordStrategy, TaxonomyStrategy};

use std::sync::Arc;

use crate::{
    error::UsageError,
    models::{ClassificationResult, ClassifiedApp, IntervalGranularity, UsageWindow},
    platform::{PackageResolver, UsageAccess, UsageStatsProvider},
};

const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_error, log_info};

/// Queries usage for a window and splits packages into useful and
/// non-useful buckets.
#[derive(Clone)]
pub struct UsageClassifier {
    access: Arc<dyn UsageAccess>,
    stats: Arc<dyn UsageStatsProvider>,
    packages: Arc<dyn PackageResolver>,
    strategy: Arc<dyn CategoryStrategy>,
    granularity: IntervalGranularity,
}

impl UsageClassifier {
    pub fn new(
        access: Arc<dyn UsageAccess>,
        stats: Arc<dyn UsageStatsProvider>,
        packages: Arc<dyn PackageResolver>,
        strategy: Arc<dyn CategoryStrategy>,
    ) -> Self {
        Self {
            access,
            stats,
            packages,
            strategy,
            granularity: IntervalGranularity::Daily,
        }
    }

    pub fn with_granularity(mut self, granularity: IntervalGranularity) -> Self {
        self.granularity = granularity;
        self
    }

    pub fn has_usage_permission(&self) -> bool {
        self.access.has_usage_permission()
    }

    pub fn classify_usage(&self, window: &UsageWindow) -> ClassificationResult {
        let records =
            self.stats
                .query_usage_stats(self.granularity, window.start_ms(), window.end_ms());

        let mut result = ClassificationResult::default();
        for record in records {
            let info = match self.packages.application_info(&record.package) {
                Ok(info) => info,
                Err(UsageError::PackageNotFound(package)) => {
                    log_error!("App not found: {}", package);
                    result.skipped.push(package);
                    continue;
                }
                Err(err) => {
                    log_error!("Failed to resolve {}: {}", record.package, err);
                    result.skipped.push(record.package);
                    continue;
                }
            };

            let category = self.strategy.categorize(&record.package, &info);
            log_debug!("{} categorized as {}", record.package, category.as_str());
            if !category.is_non_useful() {
                log_debug!(
                    "{} is a useful app. Keep up the good work!",
                    record.package
                );
            }

            result.push(ClassifiedApp {
                package: record.package,
                foreground_ms: record.foreground_ms,
                category,
            });
        }

        log_info!(
            "Classified usage: {} useful, {} non-useful, {} skipped",
            result.useful.len(),
            result.non_useful.len(),
            result.skipped.len()
        );

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{AppCategory, UsageRecord},
        platform::fake::{FakeAccess, FakePackages, FakeStats},
    };
    use chrono::{TimeZone, Utc};

    fn classifier(records: Vec<UsageRecord>, installed: &[(&str, bool)]) -> (UsageClassifier, Arc<FakeStats>) {
        let stats = Arc::new(FakeStats::new(records));
        let classifier = UsageClassifier::new(
            Arc::new(FakeAccess::new(true)),
            stats.clone(),
            Arc::new(FakePackages::with(installed)),
            Arc::new(KeywordStrategy::default()),
        );
        (classifier, stats)
    }

    fn window() -> UsageWindow {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap();
        UsageWindow::trailing(now, 24).unwrap()
    }

    #[test]
    fn partitions_every_record() {
        let records = vec![
            UsageRecord::new("com.android.settings", 5_000),
            UsageRecord::new("com.example.socialfeed", 7_200_000),
            UsageRecord::new("com.notes.editor", 60_000),
            UsageRecord::new("com.removed.app", 1_000),
            UsageRecord::new("com.arcade.Game", 30_000),
        ];
        let (classifier, _) = classifier(
            records.clone(),
            &[
                ("com.android.settings", true),
                ("com.example.socialfeed", false),
                ("com.notes.editor", false),
                ("com.arcade.Game", false),
            ],
        );

        let result = classifier.classify_usage(&window());

        assert_eq!(result.total_seen(), records.len());
        assert_eq!(result.skipped, vec!["com.removed.app".to_string()]);
        assert!(result
            .non_useful
            .iter()
            .all(|app| app.category == AppCategory::SocialEntertainment));
        assert!(result
            .useful
            .iter()
            .all(|app| app.category != AppCategory::SocialEntertainment));

        let non_useful: Vec<_> = result.non_useful.iter().map(|a| a.package.as_str()).collect();
        assert_eq!(non_useful, vec!["com.example.socialfeed", "com.arcade.Game"]);
        let useful: Vec<_> = result.useful.iter().map(|a| a.package.as_str()).collect();
        assert_eq!(useful, vec!["com.android.settings", "com.notes.editor"]);
    }

    struct RefusingPackages;

    impl PackageResolver for RefusingPackages {
        fn application_info(&self, _package: &str) -> Result<crate::models::AppInfo, UsageError> {
            Err(UsageError::PermissionDenied)
        }
    }

    #[test]
    fn other_resolver_errors_are_skipped_too() {
        let records = vec![
            UsageRecord::new("com.social.feed", 4_000_000),
            UsageRecord::new("com.notes.editor", 1_000),
        ];
        let classifier = UsageClassifier::new(
            Arc::new(FakeAccess::new(true)),
            Arc::new(FakeStats::new(records.clone())),
            Arc::new(RefusingPackages),
            Arc::new(KeywordStrategy::default()),
        );

        let result = classifier.classify_usage(&window());

        assert!(result.useful.is_empty());
        assert!(result.non_useful.is_empty());
        assert_eq!(result.skipped, vec!["com.social.feed", "com.notes.editor"]);
        assert_eq!(result.total_seen(), records.len());
    }

    #[test]
    fn repeated_passes_do_not_accumulate() {
        let (classifier, _) = classifier(
            vec![UsageRecord::new("com.notes.editor", 1_000)],
            &[("com.notes.editor", false)],
        );

        let first = classifier.classify_usage(&window());
        let second = classifier.classify_usage(&window());

        assert_eq!(first, second);
        assert_eq!(second.useful.len(), 1);
    }

    #[test]
    fn queries_the_requested_window_and_granularity() {
        let (classifier, stats) = classifier(Vec::new(), &[]);
        let classifier = classifier.with_granularity(IntervalGranularity::Weekly);
        let window = window();

        let result = classifier.classify_usage(&window);

        assert_eq!(result, ClassificationResult::default());
        let queries = stats.queries.lock().unwrap();
        assert_eq!(
            *queries,
            vec![(IntervalGranularity::Weekly, window.start_ms(), window.end_ms())]
        );
    }

    #[test]
    fn permission_is_read_from_the_platform() {
        let (classifier, _) = classifier(Vec::new(), &[]);
        assert!(classifier.has_usage_permission());

        let denied = UsageClassifier::new(
            Arc::new(FakeAccess::new(false)),
            Arc::new(FakeStats::default()),
            Arc::new(FakePackages::default()),
            Arc::new(KeywordStrategy::default()),
        );
        assert!(!denied.has_usage_permission());
    }
}
