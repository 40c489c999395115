use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on courses for common query patterns
        manager
            .create_index(
                Index::create()
                    .name("idx_courses_season_year")
                    .table(Courses::Table)
                    .col(Courses::Season)
                    .col(Courses::Year)
                    .to_owned(),
            )
            .await?;

        // Indexes on enrollments for roster and per-student lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_student_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_enrollments_course_id")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .to_owned(),
            )
            .await?;

        // Index on prerequisites.course_id for the admission check
        manager
            .create_index(
                Index::create()
                    .name("idx_prerequisites_course_id")
                    .table(Prerequisites::Table)
                    .col(Prerequisites::CourseId)
                    .to_owned(),
            )
            .await?;

        // One submission row per (assessment, student)
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_assessment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssessmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on assessments.course_id for gradebook queries
        manager
            .create_index(
                Index::create()
                    .name("idx_assessments_course_id")
                    .table(Assessments::Table)
                    .col(Assessments::CourseId)
                    .to_owned(),
            )
            .await?;

        // Index on reservations for the overlap check
        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_room_id")
                    .table(Reservations::Table)
                    .col(Reservations::RoomId)
                    .to_owned(),
            )
            .await?;

        // Index on announcements.course_id for visibility filtering
        manager
            .create_index(
                Index::create()
                    .name("idx_announcements_course_id")
                    .table(Announcements::Table)
                    .col(Announcements::CourseId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_courses_season_year",
            "idx_enrollments_student_id",
            "idx_enrollments_course_id",
            "idx_prerequisites_course_id",
            "idx_submissions_assessment_student",
            "idx_assessments_course_id",
            "idx_reservations_room_id",
            "idx_announcements_course_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Courses {
    Table,
    Season,
    Year,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    StudentId,
    CourseId,
}

#[derive(Iden)]
enum Prerequisites {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Submissions {
    Table,
    AssessmentId,
    StudentId,
}

#[derive(Iden)]
enum Assessments {
    Table,
    CourseId,
}

#[derive(Iden)]
enum Reservations {
    Table,
    RoomId,
}

#[derive(Iden)]
enum Announcements {
    Table,
    CourseId,
}
