use crate::entities::{announcements, courses, enrollments};
use crate::errors::EnrollError;
use chrono::Utc;
use models::{role::Role, status::EnrollmentStatus};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

pub struct AnnouncementService;

impl AnnouncementService {
    pub async fn post(
        db: &DatabaseConnection,
        author_id: Uuid,
        course_id: Option<Uuid>,
        title: String,
        body: String,
    ) -> Result<announcements::Model, EnrollError> {
        if let Some(course_id) = course_id {
            courses::Entity::find_by_id(course_id)
                .one(db)
                .await?
                .ok_or(EnrollError::NotFound("course"))?;
        }

        let id = Uuid::new_v4();
        announcements::Entity::insert(announcements::ActiveModel {
            id: Set(id),
            author_id: Set(author_id),
            course_id: Set(course_id),
            title: Set(title),
            body: Set(body),
            posted_at: Set(Utc::now().naive_utc()),
        })
        .exec(db)
        .await?;

        announcements::Entity::find_by_id(id)
            .one(db)
            .await?
            .ok_or(EnrollError::NotFound("announcement"))
    }

    /// Announcements visible to a user, newest first. Campus-wide posts
    /// are visible to everyone; course-scoped posts only to students
    /// enrolled in (or professors teaching) that course. Staff and
    /// admins see everything.
    pub async fn visible_for(
        db: &DatabaseConnection,
        user_id: Uuid,
        role: Role,
    ) -> Result<Vec<announcements::Model>, DbErr> {
        if role.is_staff() {
            return announcements::Entity::find()
                .order_by_desc(announcements::Column::PostedAt)
                .all(db)
                .await;
        }

        let (enrolled, teaching) = futures::try_join!(
            enrollments::Entity::find()
                .filter(enrollments::Column::StudentId.eq(user_id))
                .filter(enrollments::Column::Status.eq(EnrollmentStatus::Enrolled.as_str()))
                .all(db),
            courses::Entity::find()
                .filter(courses::Column::InstructorId.eq(user_id))
                .all(db),
        )?;

        let mut course_ids: Vec<Uuid> = enrolled.into_iter().map(|e| e.course_id).collect();
        course_ids.extend(teaching.into_iter().map(|c| c.id));

        let mut condition = Condition::any().add(announcements::Column::CourseId.is_null());
        if !course_ids.is_empty() {
            condition = condition.add(announcements::Column::CourseId.is_in(course_ids));
        }

        announcements::Entity::find()
            .filter(condition)
            .order_by_desc(announcements::Column::PostedAt)
            .all(db)
            .await
    }
}
