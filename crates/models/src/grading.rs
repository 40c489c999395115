use crate::status::AssessmentCategory;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

/// Letter grades and their grade-point equivalents.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter, AsRefStr,
)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    pub fn as_str(&self) -> &str {
        self.as_ref()
    }

    pub fn grade_points(&self) -> f64 {
        match self {
            LetterGrade::A => 4.0,
            LetterGrade::B => 3.0,
            LetterGrade::C => 2.0,
            LetterGrade::D => 1.0,
            LetterGrade::F => 0.0,
        }
    }

    /// Standard 90/80/70/60 cutoffs.
    pub fn from_percent(percent: f64) -> LetterGrade {
        if percent >= 90.0 {
            LetterGrade::A
        } else if percent >= 80.0 {
            LetterGrade::B
        } else if percent >= 70.0 {
            LetterGrade::C
        } else if percent >= 60.0 {
            LetterGrade::D
        } else {
            LetterGrade::F
        }
    }

    pub fn all() -> Vec<LetterGrade> {
        LetterGrade::iter().collect()
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("grade weights must sum to 100, got {sum}")]
pub struct InvalidWeights {
    pub sum: f64,
}

/// Earned/possible point totals for one assessment category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub earned: f64,
    pub possible: f64,
}

impl CategoryTotals {
    pub fn percent(&self) -> f64 {
        if self.possible == 0.0 {
            0.0
        } else {
            self.earned / self.possible * 100.0
        }
    }
}

/// Professor-entered percentage split between assignments, quizzes and
/// exams. The three weights must sum to 100 within `TOLERANCE`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradeWeights {
    pub assignments: f64,
    pub quizzes: f64,
    pub exams: f64,
}

impl GradeWeights {
    pub const TOLERANCE: f64 = 0.01;

    pub fn validate(&self) -> Result<(), InvalidWeights> {
        let sum = self.assignments + self.quizzes + self.exams;
        if (sum - 100.0).abs() <= Self::TOLERANCE {
            Ok(())
        } else {
            Err(InvalidWeights { sum })
        }
    }

    pub fn share(&self, category: AssessmentCategory) -> f64 {
        match category {
            AssessmentCategory::Assignment => self.assignments,
            AssessmentCategory::Quiz => self.quizzes,
            AssessmentCategory::Exam => self.exams,
        }
    }

    /// Weighted course percentage over the categories that have graded
    /// work. Categories with no graded submissions are excluded and the
    /// remaining weights renormalized, so a course that has only graded
    /// quizzes so far reports the quiz average rather than a near-zero
    /// overall. Returns `None` when nothing is graded yet.
    pub fn weighted_percent(
        &self,
        totals: &[(AssessmentCategory, CategoryTotals)],
    ) -> Option<f64> {
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (category, total) in totals {
            if total.possible == 0.0 {
                continue;
            }
            let weight = self.share(*category);
            weighted += weight * total.percent();
            weight_sum += weight;
        }
        if weight_sum == 0.0 {
            None
        } else {
            Some(weighted / weight_sum)
        }
    }
}

impl Default for GradeWeights {
    fn default() -> Self {
        GradeWeights {
            assignments: 40.0,
            quizzes: 20.0,
            exams: 40.0,
        }
    }
}

/// Arithmetic mean of grade points; `None` when no grades exist.
pub fn gpa(grades: &[LetterGrade]) -> Option<f64> {
    if grades.is_empty() {
        return None;
    }
    let total: f64 = grades.iter().map(|g| g.grade_points()).sum();
    Some(total / grades.len() as f64)
}
