use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction row: `course_id` requires `prereq_course_id` to be completed
/// before enrollment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "prerequisites")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub course_id: Uuid,
    pub prereq_course_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::CourseId",
        to = "super::courses::Column::Id"
    )]
    Course,
    #[sea_orm(
        belongs_to = "super::courses::Entity",
        from = "Column::PrereqCourseId",
        to = "super::courses::Column::Id"
    )]
    PrereqCourse,
}

impl ActiveModelBehavior for ActiveModel {}
