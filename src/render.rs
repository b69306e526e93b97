use serde::Serialize;

use crate::models::{ClassificationResult, ClassifiedApp};

pub const USEFUL_HEADING: &str = "Useful Apps:";
pub const NON_USEFUL_HEADING: &str = "Non-Useful Apps:";

/// The two display blocks produced by one pass.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedUsage {
    pub useful: String,
    pub non_useful: String,
}

impl RenderedUsage {
    pub fn useful_with_heading(&self) -> String {
        with_heading(USEFUL_HEADING, &self.useful)
    }

    pub fn non_useful_with_heading(&self) -> String {
        with_heading(NON_USEFUL_HEADING, &self.non_useful)
    }
}

pub fn format_line(app: &ClassifiedApp) -> String {
    format!("{} - Time used: {} seconds", app.package, app.foreground_secs())
}

pub fn render(result: &ClassificationResult) -> (String, String) {
    (join_lines(&result.useful), join_lines(&result.non_useful))
}

pub fn render_usage(result: &ClassificationResult) -> RenderedUsage {
    let (useful, non_useful) = render(result);
    RenderedUsage { useful, non_useful }
}

fn join_lines(apps: &[ClassifiedApp]) -> String {
    apps.iter().map(format_line).collect::<Vec<_>>().join("\n")
}

fn with_heading(heading: &str, block: &str) -> String {
    format!("{heading}\n{block}")
}
