use std::collections::HashMap;

use crate::models::{AppCategory, AppInfo};

/// Maps a resolved package to a category. System components are expected to
/// stay `System` regardless of strategy.
pub trait CategoryStrategy: Send + Sync {
    fn categorize(&self, package: &str, info: &AppInfo) -> AppCategory;
}

/// Substring heuristic on the package identifier.
#[derive(Debug, Clone)]
pub struct KeywordStrategy {
    keywords: Vec<String>,
}

impl KeywordStrategy {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keywords: keywords
                .into_iter()
                .map(|keyword| keyword.as_ref().trim().to_lowercase())
                .filter(|keyword| !keyword.is_empty())
                .collect(),
        }
    }
}

impl Default for KeywordStrategy {
    fn default() -> Self {
        Self::new(["social", "game"])
    }
}

impl CategoryStrategy for KeywordStrategy {
    fn categorize(&self, package: &str, info: &AppInfo) -> AppCategory {
        if info.is_system {
            return AppCategory::System;
        }

        let lowered = package.to_lowercase();
        if self
            .keywords
            .iter()
            .any(|keyword| lowered.contains(keyword.as_str()))
        {
            AppCategory::SocialEntertainment
        } else {
            AppCategory::Other
        }
    }
}

/// Explicit package table; anything unlisted is `Unknown`.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyStrategy {
    table: HashMap<String, AppCategory>,
}

impl TaxonomyStrategy {
    pub fn new(table: HashMap<String, AppCategory>) -> Self {
        Self { table }
    }

    pub fn insert(&mut self, package: impl Into<String>, category: AppCategory) {
        self.table.insert(package.into(), category);
    }
}

impl CategoryStrategy for TaxonomyStrategy {
    fn categorize(&self, package: &str, info: &AppInfo) -> AppCategory {
        if info.is_system {
            return AppCategory::System;
        }
        self.table
            .get(package)
            .copied()
            .unwrap_or(AppCategory::Unknown)
    }
}
