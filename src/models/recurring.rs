use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::assignment::Assignment;
use super::lenient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    /// Matches on the normalised descriptor, so "Bi-Weekly" and "bi_weekly"
    /// both read as [`Frequency::Biweekly`].
    pub fn from_str(s: &str) -> Option<Self> {
        match crate::schedule::normalize_frequency(s).as_str() {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "biweekly" | "fortnightly" => Some(Self::Biweekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

/// Template that generated tasks point back to through `recurringTaskId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringTask {
    #[serde(default, deserialize_with = "lenient::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "assignTo", default, skip_serializing_if = "Assignment::is_unassigned")]
    pub assignment: Assignment,
    #[serde(default, deserialize_with = "lenient::text")]
    pub frequency: String,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub last_generated_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,
    #[serde(default = "lenient::default_true", deserialize_with = "lenient::flag")]
    pub active: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
