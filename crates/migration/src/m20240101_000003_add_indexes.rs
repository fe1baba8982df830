use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Student: index on name for the name lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_student_name")
                    .table(Student::Table)
                    .col(Student::Name)
                    .to_owned(),
            )
            .await?;

        // ExamScore: composite index for the exam/threshold query
        manager
            .create_index(
                Index::create()
                    .name("idx_exam_score_exam_score")
                    .table(ExamScore::Table)
                    .col(ExamScore::Exam)
                    .col(ExamScore::Score)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_student_name").table(Student::Table).to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_exam_score_exam_score")
                    .table(ExamScore::Table)
                    .to_owned(),
            )
            .await
    }
}

#[derive(DeriveIden)]
enum Student { Table, Name }

#[derive(DeriveIden)]
enum ExamScore { Table, Exam, Score }
