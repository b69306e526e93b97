pub mod controller;

pub use controller::{AlertConfig, AlertScheduler};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum AlertKind {
    Immediate,
    FollowUp,
}

/// A break reminder for one package.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BreakAlert {
    pub package: String,
    pub kind: AlertKind,
    pub message: String,
}

impl BreakAlert {
    pub fn immediate(package: &str) -> Self {
        Self {
            package: package.to_string(),
            kind: AlertKind::Immediate,
            message: format!("You've spent over an hour on {package}! Consider taking a break."),
        }
    }

    pub fn follow_up(package: &str) -> Self {
        Self {
            package: package.to_string(),
            kind: AlertKind::FollowUp,
            message: format!("You're still using {package}. Please take a break."),
        }
    }
}
