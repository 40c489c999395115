use crate::entities::{courses, prerequisites, users};
use crate::errors::CatalogError;
use chrono::Utc;
use models::{grading::GradeWeights, options::CourseOptions, term::Season};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, TransactionTrait,
};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub credits: i16,
    pub max_seats: i32,
    pub season: Season,
    pub year: i16,
    pub instructor_id: Option<Uuid>,
    pub weights: GradeWeights,
    pub options: CourseOptions,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub max_seats: Option<i32>,
    pub instructor_id: Option<Option<Uuid>>,
    pub active: Option<bool>,
    pub weights: Option<GradeWeights>,
    pub options: Option<CourseOptions>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseFilter {
    pub search: Option<String>,
    pub department: Option<String>,
    pub season: Option<Season>,
    pub year: Option<i16>,
    pub active: Option<bool>,
}

pub struct CatalogService;

impl CatalogService {
    pub async fn create_course(
        db: &DatabaseConnection,
        new: NewCourse,
    ) -> Result<courses::Model, CatalogError> {
        new.weights
            .validate()
            .map_err(|e| CatalogError::InvalidWeights { sum: e.sum })?;

        let existing = courses::Entity::find()
            .filter(courses::Column::Code.eq(new.code.clone()))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(CatalogError::DuplicateCode(new.code));
        }

        let now = Utc::now().naive_utc();
        let course = courses::ActiveModel {
            id: Set(Uuid::new_v4()),
            code: Set(new.code),
            title: Set(new.title),
            description: Set(new.description),
            credits: Set(new.credits),
            max_seats: Set(new.max_seats),
            current_seats: Set(0),
            season: Set(new.season.as_str().to_owned()),
            year: Set(new.year),
            instructor_id: Set(new.instructor_id),
            active: Set(true),
            weight_assignments: Set(new.weights.assignments),
            weight_quizzes: Set(new.weights.quizzes),
            weight_exams: Set(new.weights.exams),
            options: Set(serde_json::to_value(&new.options).unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = courses::Entity::insert(course).exec(db).await?;
        courses::Entity::find_by_id(result.last_insert_id)
            .one(db)
            .await?
            .ok_or(CatalogError::NotFound)
    }

    /// Applies a partial update. Shrinking `max_seats` below the current
    /// enrollment count is rejected to preserve the seat invariant.
    pub async fn update_course(
        db: &DatabaseConnection,
        course_id: Uuid,
        update: CourseUpdate,
    ) -> Result<courses::Model, CatalogError> {
        let course = courses::Entity::find_by_id(course_id)
            .one(db)
            .await?
            .ok_or(CatalogError::NotFound)?;

        if let Some(max_seats) = update.max_seats
            && max_seats < course.current_seats
        {
            return Err(CatalogError::SeatCapBelowEnrollment {
                requested: max_seats,
                enrolled: course.current_seats,
            });
        }
        if let Some(weights) = &update.weights {
            weights
                .validate()
                .map_err(|e| CatalogError::InvalidWeights { sum: e.sum })?;
        }

        let mut active: courses::ActiveModel = course.into();
        if let Some(title) = update.title {
            active.title = Set(title);
        }
        if let Some(description) = update.description {
            active.description = Set(description);
        }
        if let Some(max_seats) = update.max_seats {
            active.max_seats = Set(max_seats);
        }
        if let Some(instructor_id) = update.instructor_id {
            active.instructor_id = Set(instructor_id);
        }
        if let Some(is_active) = update.active {
            active.active = Set(is_active);
        }
        if let Some(weights) = update.weights {
            active.weight_assignments = Set(weights.assignments);
            active.weight_quizzes = Set(weights.quizzes);
            active.weight_exams = Set(weights.exams);
        }
        if let Some(options) = update.options {
            active.options = Set(serde_json::to_value(&options).unwrap_or_default());
        }
        active.updated_at = Set(Utc::now().naive_utc());

        Ok(courses::Entity::update(active).exec(db).await?)
    }

    /// Replaces the prerequisite set transactionally. Self-references and
    /// unknown course ids are rejected before any row changes.
    pub async fn set_prerequisites(
        db: &DatabaseConnection,
        course_id: Uuid,
        prereq_ids: Vec<Uuid>,
    ) -> Result<(), CatalogError> {
        let txn = db.begin().await?;

        courses::Entity::find_by_id(course_id)
            .one(&txn)
            .await?
            .ok_or(CatalogError::NotFound)?;

        for prereq_id in &prereq_ids {
            if *prereq_id == course_id {
                return Err(CatalogError::SelfPrerequisite);
            }
            let known = courses::Entity::find_by_id(*prereq_id).one(&txn).await?;
            if known.is_none() {
                return Err(CatalogError::UnknownPrerequisite(*prereq_id));
            }
        }

        prerequisites::Entity::delete_many()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .exec(&txn)
            .await?;
        if !prereq_ids.is_empty() {
            let rows = prereq_ids.into_iter().map(|prereq_id| {
                prerequisites::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    course_id: Set(course_id),
                    prereq_course_id: Set(prereq_id),
                }
            });
            prerequisites::Entity::insert_many(rows).exec(&txn).await?;
        }

        txn.commit().await?;
        Ok(())
    }

    /// Query courses with pagination and filtering.
    pub async fn get_courses_paginated(
        db: &DatabaseConnection,
        page: u64,
        per_page: u64,
        filter: CourseFilter,
    ) -> Result<(Vec<courses::Model>, u64), CatalogError> {
        let mut condition = Condition::all();

        if let Some(search) = filter.search {
            condition = condition.add(
                Condition::any()
                    .add(courses::Column::Code.like(format!("%{search}%")))
                    .add(courses::Column::Title.like(format!("%{search}%")))
                    .add(courses::Column::Description.like(format!("%{search}%"))),
            );
        }

        // The leading letters of the course code are the department prefix
        if let Some(department) = filter.department {
            condition = condition.add(courses::Column::Code.like(format!("{department}%")));
        }
        if let Some(season) = filter.season {
            condition = condition.add(courses::Column::Season.eq(season.as_str()));
        }
        if let Some(year) = filter.year {
            condition = condition.add(courses::Column::Year.eq(year));
        }
        if let Some(active) = filter.active {
            condition = condition.add(courses::Column::Active.eq(active));
        }

        let query = courses::Entity::find().filter(condition);
        let total_items = query.clone().count(db).await?;
        let paginator = query.paginate(db, per_page);
        let courses = paginator.fetch_page(page.saturating_sub(1)).await?;

        Ok((courses, total_items))
    }

    /// A course with its prerequisite (id, code) pairs and instructor name.
    pub async fn get_course_detail(
        db: &DatabaseConnection,
        course_id: Uuid,
    ) -> Result<Option<(courses::Model, Vec<(Uuid, String)>, Option<String>)>, CatalogError> {
        let Some(course) = courses::Entity::find_by_id(course_id).one(db).await? else {
            return Ok(None);
        };

        let prereq_ids: Vec<Uuid> = prerequisites::Entity::find()
            .filter(prerequisites::Column::CourseId.eq(course_id))
            .all(db)
            .await?
            .into_iter()
            .map(|p| p.prereq_course_id)
            .collect();

        let mut prereq_courses: Vec<(Uuid, String)> = if prereq_ids.is_empty() {
            vec![]
        } else {
            courses::Entity::find()
                .filter(courses::Column::Id.is_in(prereq_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|c| (c.id, c.code))
                .collect()
        };
        prereq_courses.sort_by(|a, b| a.1.cmp(&b.1));

        let instructor = match course.instructor_id {
            Some(id) => users::Entity::find_by_id(id)
                .one(db)
                .await?
                .map(|u| u.full_name),
            None => None,
        };

        Ok(Some((course, prereq_courses, instructor)))
    }
}
