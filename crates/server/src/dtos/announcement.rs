use chrono::NaiveDateTime;
use database::entities::announcements;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct PostAnnouncementRequest {
    /// Absent = campus-wide.
    pub course_id: Option<Uuid>,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AnnouncementResponse {
    pub id: Uuid,
    pub author_id: Uuid,
    pub course_id: Option<Uuid>,
    pub title: String,
    pub body: String,
    pub posted_at: NaiveDateTime,
}

impl From<announcements::Model> for AnnouncementResponse {
    fn from(announcement: announcements::Model) -> Self {
        AnnouncementResponse {
            id: announcement.id,
            author_id: announcement.author_id,
            course_id: announcement.course_id,
            title: announcement.title,
            body: announcement.body,
            posted_at: announcement.posted_at,
        }
    }
}
