use crate::entities::{courses, enrollments, prerequisites, users};
use crate::errors::EnrollError;
use chrono::Utc;
use models::{grading::LetterGrade, status::EnrollmentStatus};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, TransactionTrait, sea_query::Expr,
};
use std::collections::HashSet;
use uuid::Uuid;

pub struct EnrollmentService;

impl EnrollmentService {
    /// Fixed ceiling on a student's simultaneous enrolled credit load.
    pub const MAX_ENROLLED_CREDITS: i16 = 18;

    /// Admits a student to a course. The four validations run in a fixed
    /// order (seats, prerequisites, duplicate, credit cap) and the first
    /// failure wins with no writes performed. On success the enrollment
    /// insert and the seat increment commit as one transaction; the
    /// increment is conditional on `current_seats < max_seats`, so a
    /// concurrent enroll that takes the last seat rolls this one back
    /// and surfaces as `CourseFull`.
    pub async fn enroll(
        db: &DatabaseConnection,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<enrollments::Model, EnrollError> {
        let txn = db.begin().await?;

        let course = courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await?
            .ok_or(EnrollError::NotFound("course"))?;
        users::Entity::find_by_id(student_id)
            .one(&txn)
            .await?
            .ok_or(EnrollError::NotFound("student"))?;

        // 1. Seat availability
        if course.current_seats >= course.max_seats {
            return Err(EnrollError::CourseFull);
        }

        // 2. Prerequisites
        let missing = Self::missing_prerequisites(&txn, student_id, course_id).await?;
        if !missing.is_empty() {
            return Err(EnrollError::PrerequisitesNotMet { missing });
        }

        // 3. Duplicate enrollment
        let duplicate = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.as_str()))
            .one(&txn)
            .await?;
        if duplicate.is_some() {
            return Err(EnrollError::AlreadyEnrolled);
        }

        // 4. Credit cap
        let enrolled = Self::enrolled_credits(&txn, student_id).await?;
        if enrolled + course.credits > Self::MAX_ENROLLED_CREDITS {
            return Err(EnrollError::CreditLimitExceeded {
                enrolled,
                requested: course.credits,
            });
        }

        let enrollment_id = Uuid::new_v4();
        enrollments::Entity::insert(enrollments::ActiveModel {
            id: Set(enrollment_id),
            student_id: Set(student_id),
            course_id: Set(course_id),
            status: Set(EnrollmentStatus::Enrolled.as_str().to_owned()),
            grade: Set(None),
            enrolled_at: Set(Utc::now().naive_utc()),
        })
        .exec(&txn)
        .await?;

        // Conditional increment: loses the race for the last seat cleanly.
        let updated = courses::Entity::update_many()
            .col_expr(
                courses::Column::CurrentSeats,
                Expr::col(courses::Column::CurrentSeats).add(1),
            )
            .filter(courses::Column::Id.eq(course_id))
            .filter(
                Expr::col(courses::Column::CurrentSeats)
                    .lt(Expr::col(courses::Column::MaxSeats)),
            )
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Err(EnrollError::CourseFull);
        }

        txn.commit().await?;

        // Re-fetch so the caller sees committed state.
        enrollments::Entity::find_by_id(enrollment_id)
            .one(db)
            .await?
            .ok_or(EnrollError::NotFound("enrollment"))
    }

    /// Withdraws an enrollment. Absent ids and rows that are not
    /// currently ENROLLED return `Ok(false)` without touching anything;
    /// otherwise the status flip and the seat decrement commit together.
    /// The decrement is guarded by `current_seats > 0` so the counter
    /// never goes negative.
    pub async fn drop(db: &DatabaseConnection, enrollment_id: Uuid) -> Result<bool, EnrollError> {
        let txn = db.begin().await?;

        let Some(enrollment) = enrollments::Entity::find_by_id(enrollment_id).one(&txn).await?
        else {
            return Ok(false);
        };
        if enrollment.status != EnrollmentStatus::Enrolled.as_str() {
            return Ok(false);
        }

        let mut active: enrollments::ActiveModel = enrollment.clone().into();
        active.status = Set(EnrollmentStatus::Dropped.as_str().to_owned());
        enrollments::Entity::update(active).exec(&txn).await?;

        courses::Entity::update_many()
            .col_expr(
                courses::Column::CurrentSeats,
                Expr::col(courses::Column::CurrentSeats).sub(1),
            )
            .filter(courses::Column::Id.eq(enrollment.course_id))
            .filter(courses::Column::CurrentSeats.gt(0))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(true)
    }

    /// Finalizes an ENROLLED row as COMPLETED with a letter grade. The
    /// seat is kept for the term; only dropping frees it.
    pub async fn complete(
        db: &DatabaseConnection,
        enrollment_id: Uuid,
        grade: LetterGrade,
    ) -> Result<enrollments::Model, EnrollError> {
        let enrollment = enrollments::Entity::find_by_id(enrollment_id)
            .one(db)
            .await?
            .ok_or(EnrollError::NotFound("enrollment"))?;
        if enrollment.status != EnrollmentStatus::Enrolled.as_str() {
            return Err(EnrollError::NotCurrentlyEnrolled);
        }

        let mut active: enrollments::ActiveModel = enrollment.into();
        active.status = Set(EnrollmentStatus::Completed.as_str().to_owned());
        active.grade = Set(Some(grade.as_str().to_owned()));
        Ok(enrollments::Entity::update(active).exec(db).await?)
    }

    /// A student's enrollments paired with their courses, newest first.
    pub async fn for_student(
        db: &DatabaseConnection,
        student_id: Uuid,
    ) -> Result<Vec<(enrollments::Model, courses::Model)>, EnrollError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .find_also_related(courses::Entity)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| course.map(|c| (enrollment, c)))
            .collect())
    }

    /// The ENROLLED students of a course.
    pub async fn roster(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Vec<(enrollments::Model, users::Model)>, EnrollError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.as_str()))
            .find_also_related(users::Entity)
            .all(db)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, student)| student.map(|s| (enrollment, s)))
            .collect())
    }

    /// Prerequisite course codes the student has not completed, sorted.
    async fn missing_prerequisites(
        txn: &DatabaseTransaction,
        student_id: Uuid,
        course_id: Uuid,
    ) -> Result<Vec<String>, EnrollError> {
        let prereqs = prerequisites::Entity::find()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .all(txn)
            .await?;
        if prereqs.is_empty() {
            return Ok(vec![]);
        }

        let completed: HashSet<Uuid> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Completed.as_str()))
            .all(txn)
            .await?
            .into_iter()
            .map(|e| e.course_id)
            .collect();

        let missing_ids: Vec<Uuid> = prereqs
            .iter()
            .map(|p| p.prereq_course_id)
            .filter(|id| !completed.contains(id))
            .collect();
        if missing_ids.is_empty() {
            return Ok(vec![]);
        }

        let mut missing: Vec<String> = courses::Entity::find()
            .filter(courses::Column::Id.is_in(missing_ids))
            .all(txn)
            .await?
            .into_iter()
            .map(|c| c.code)
            .collect();
        missing.sort();
        Ok(missing)
    }

    /// Sum of credits across the student's currently ENROLLED courses.
    async fn enrolled_credits(
        txn: &DatabaseTransaction,
        student_id: Uuid,
    ) -> Result<i16, EnrollError> {
        let course_ids: Vec<Uuid> = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.as_str()))
            .all(txn)
            .await?
            .into_iter()
            .map(|e| e.course_id)
            .collect();
        if course_ids.is_empty() {
            return Ok(0);
        }

        let total = courses::Entity::find()
            .filter(courses::Column::Id.is_in(course_ids))
            .all(txn)
            .await?
            .into_iter()
            .map(|c| c.credits)
            .sum();
        Ok(total)
    }
}
