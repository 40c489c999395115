use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed course option bag, persisted as a JSON column. The recognized
/// keys are plain fields; anything else a client sends is kept in the
/// flattened `extra` map rather than rejected.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CourseOptions {
    #[serde(default)]
    pub attendance_required: bool,
    #[serde(default)]
    pub audit_allowed: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

/// Typed assessment option bag (time limits, attempt caps, proctoring),
/// same JSON-column treatment as [`CourseOptions`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AssessmentOptions {
    #[serde(default)]
    pub time_limit_minutes: Option<u32>,
    #[serde(default)]
    pub max_attempts: Option<u32>,
    #[serde(default)]
    pub proctored: bool,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}
