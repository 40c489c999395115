use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};

/// Lifecycle of an enrollment row. Created `Enrolled`, flipped to
/// `Dropped` on withdrawal (seat freed) or `Completed` at term end
/// (grade assigned, seat kept for the term).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentStatus {
    #[strum(serialize = "ENROLLED")]
    Enrolled,
    #[strum(serialize = "DROPPED")]
    Dropped,
    #[strum(serialize = "COMPLETED")]
    Completed,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentCategory {
    #[strum(serialize = "ASSIGNMENT")]
    Assignment,
    #[strum(serialize = "QUIZ")]
    Quiz,
    #[strum(serialize = "EXAM")]
    Exam,
}

impl AssessmentCategory {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn status_round_trips() {
        for status in EnrollmentStatus::iter() {
            assert_eq!(
                EnrollmentStatus::from_str(status.as_str()).unwrap(),
                status
            );
        }
    }

    #[test]
    fn category_round_trips() {
        for category in AssessmentCategory::iter() {
            assert_eq!(
                AssessmentCategory::from_str(category.as_str()).unwrap(),
                category
            );
        }
    }
}
