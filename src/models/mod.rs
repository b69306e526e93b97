pub mod usage;

pub use usage::{
    AppCategory, AppInfo, ClassificationResult, ClassifiedApp, IntervalGranularity, UsageRecord,
    UsageWindow,
};
