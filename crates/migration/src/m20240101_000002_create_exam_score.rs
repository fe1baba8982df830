//! Create `exam_score` table with FK to `student`.
//!
//! One row per (student, exam); the composite primary key keeps exam names
//! unique per student.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ExamScore::Table)
                    .if_not_exists()
                    .col(big_integer(ExamScore::StudentId).not_null())
                    .col(string_len(ExamScore::Exam, 128).not_null())
                    .col(integer(ExamScore::Score).not_null())
                    .primary_key(
                        Index::create()
                            .col(ExamScore::StudentId)
                            .col(ExamScore::Exam),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_exam_score_student")
                            .from(ExamScore::Table, ExamScore::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ExamScore::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ExamScore { Table, StudentId, Exam, Score }

#[derive(DeriveIden)]
enum Student { Table, Id }
