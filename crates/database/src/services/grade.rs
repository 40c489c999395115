use crate::entities::{assessments, courses, enrollments, submissions, users};
use crate::errors::GradeError;
use chrono::Utc;
use models::{
    grading::{self, CategoryTotals, GradeWeights, LetterGrade},
    options::AssessmentOptions,
    status::{AssessmentCategory, EnrollmentStatus},
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};
use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewAssessment {
    pub course_id: Uuid,
    pub title: String,
    pub category: AssessmentCategory,
    pub total_points: f64,
    pub due_at: Option<chrono::NaiveDateTime>,
    pub options: AssessmentOptions,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: AssessmentCategory,
    pub earned: f64,
    pub possible: f64,
    pub percent: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseGrade {
    pub categories: Vec<CategoryBreakdown>,
    pub percent: Option<f64>,
    pub letter: Option<LetterGrade>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TranscriptRow {
    pub course_code: String,
    pub course_title: String,
    pub credits: i16,
    pub season: String,
    pub year: i16,
    pub grade: Option<LetterGrade>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Transcript {
    pub rows: Vec<TranscriptRow>,
    pub gpa: Option<f64>,
}

pub struct GradeService;

impl GradeService {
    pub async fn create_assessment(
        db: &DatabaseConnection,
        new: NewAssessment,
    ) -> Result<assessments::Model, GradeError> {
        if new.total_points <= 0.0 {
            return Err(GradeError::InvalidTotalPoints {
                total: new.total_points,
            });
        }
        courses::Entity::find_by_id(new.course_id)
            .one(db)
            .await?
            .ok_or(GradeError::NotFound("course"))?;

        let id = Uuid::new_v4();
        assessments::Entity::insert(assessments::ActiveModel {
            id: Set(id),
            course_id: Set(new.course_id),
            title: Set(new.title),
            category: Set(new.category.as_str().to_owned()),
            total_points: Set(new.total_points),
            due_at: Set(new.due_at),
            options: Set(serde_json::to_value(&new.options).unwrap_or_default()),
            created_at: Set(Utc::now().naive_utc()),
        })
        .exec(db)
        .await?;

        assessments::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(GradeError::NotFound("assessment"))
    }

    pub async fn list_assessments(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Vec<assessments::Model>, GradeError> {
        Ok(assessments::Entity::find()
            .filter(assessments::Column::CourseId.eq(course_id))
            .all(db)
            .await?)
    }

    pub async fn find_assessment(
        db: &DatabaseConnection,
        assessment_id: Uuid,
    ) -> Result<assessments::Model, GradeError> {
        assessments::Entity::find_by_id(assessment_id)
            .one(db)
            .await?
            .ok_or(GradeError::NotFound("assessment"))
    }

    /// Records (or overwrites) a student's score for an assessment.
    /// One submission row per (assessment, student).
    pub async fn record_score(
        db: &DatabaseConnection,
        assessment_id: Uuid,
        student_id: Uuid,
        points: f64,
    ) -> Result<submissions::Model, GradeError> {
        let assessment = Self::find_assessment(db, assessment_id).await?;
        if points < 0.0 || points > assessment.total_points {
            return Err(GradeError::ScoreOutOfRange {
                points,
                total: assessment.total_points,
            });
        }
        users::Entity::find_by_id(student_id)
            .one(db)
            .await?
            .ok_or(GradeError::NotFound("student"))?;

        let now = Utc::now().naive_utc();
        let existing = submissions::Entity::find()
            .filter(submissions::Column::AssessmentId.eq(assessment_id))
            .filter(submissions::Column::StudentId.eq(student_id))
            .one(db)
            .await?;

        let model = match existing {
            Some(submission) => {
                let mut active: submissions::ActiveModel = submission.into();
                active.points_earned = Set(Some(points));
                active.graded_at = Set(Some(now));
                submissions::Entity::update(active).exec(db).await?
            }
            None => {
                let id = Uuid::new_v4();
                submissions::Entity::insert(submissions::ActiveModel {
                    id: Set(id),
                    assessment_id: Set(assessment_id),
                    student_id: Set(student_id),
                    points_earned: Set(Some(points)),
                    graded_at: Set(Some(now)),
                })
                .exec(db)
                .await?;
                submissions::Entity::find_by_id(id)
                    .one(db)
                    .await?
                    .ok_or(GradeError::NotFound("submission"))?
            }
        };
        Ok(model)
    }

    /// Per-category breakdown plus the weighted course percentage for a
    /// student in a course. Only graded submissions count; categories
    /// without graded work are excluded and the remaining weights
    /// renormalized by `GradeWeights::weighted_percent`.
    pub async fn course_grade(
        db: &DatabaseConnection,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<CourseGrade, GradeError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(GradeError::NotFound("course"))?;
        let weights = GradeWeights {
            assignments: course.weight_assignments,
            quizzes: course.weight_quizzes,
            exams: course.weight_exams,
        };

        let assessments = Self::list_assessments(db, course_id).await?;
        let assessment_ids: Vec<Uuid> = assessments.iter().map(|a| a.id).collect();

        let graded: HashMap<Uuid, f64> = if assessment_ids.is_empty() {
            HashMap::new()
        } else {
            submissions::Entity::find()
                .filter(submissions::Column::AssessmentId.is_in(assessment_ids))
                .filter(submissions::Column::StudentId.eq(student_id))
                .all(db)
                .await?
                .into_iter()
                .filter_map(|s| s.points_earned.map(|points| (s.assessment_id, points)))
                .collect()
        };

        let mut by_category: HashMap<AssessmentCategory, CategoryTotals> = HashMap::new();
        for assessment in &assessments {
            let Some(&earned) = graded.get(&assessment.id) else {
                continue;
            };
            let Ok(category) = AssessmentCategory::from_str(&assessment.category) else {
                continue;
            };
            let totals = by_category.entry(category).or_insert(CategoryTotals {
                earned: 0.0,
                possible: 0.0,
            });
            totals.earned += earned;
            totals.possible += assessment.total_points;
        }

        let totals: Vec<(AssessmentCategory, CategoryTotals)> =
            by_category.into_iter().collect();
        let percent = weights.weighted_percent(&totals);

        let mut categories: Vec<CategoryBreakdown> = totals
            .into_iter()
            .map(|(category, t)| CategoryBreakdown {
                category,
                earned: t.earned,
                possible: t.possible,
                percent: t.percent(),
                weight: weights.share(category),
            })
            .collect();
        categories.sort_by_key(|c| c.category.as_str().to_owned());

        Ok(CourseGrade {
            categories,
            percent,
            letter: percent.map(LetterGrade::from_percent),
        })
    }

    /// One transcript row per COMPLETED enrollment plus the GPA over the
    /// rows that carry a grade.
    pub async fn transcript(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Transcript, GradeError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Completed.as_str()))
            .find_also_related(courses::Entity)
            .all(db)
            .await?;

        let mut transcript_rows = Vec::new();
        let mut grades = Vec::new();
        for (enrollment, course) in rows {
            let Some(course) = course else { continue };
            let grade = enrollment
                .grade
                .as_deref()
                .and_then(|g| LetterGrade::from_str(g).ok());
            if let Some(grade) = grade {
                grades.push(grade);
            }
            transcript_rows.push(TranscriptRow {
                course_code: course.code,
                course_title: course.title,
                credits: course.credits,
                season: course.season,
                year: course.year,
                grade,
            });
        }
        transcript_rows.sort_by(|a, b| (b.year, &b.season).cmp(&(a.year, &a.season)));

        Ok(Transcript {
            gpa: grading::gpa(&grades),
            rows: transcript_rows,
        })
    }
}
