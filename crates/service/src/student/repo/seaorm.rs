use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect};
use std::collections::BTreeMap;

use crate::student::domain::Student;
use crate::student::errors::StudentError;
use crate::student::repository::StudentRepository;

/// SeaORM-backed repository decomposing the domain student into the
/// `student` row and its `exam_score` rows.
pub struct SeaOrmStudentRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStudentRepository {
    async fn load_scores(&self, id: i64) -> Result<BTreeMap<String, i32>, StudentError> {
        let rows = models::exam_score::for_student(&self.db, id)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        Ok(rows.into_iter().map(|r| (r.exam, r.score)).collect())
    }

    async fn assemble(&self, row: models::student::Model) -> Result<Student, StudentError> {
        let scores = self.load_scores(row.id).await?;
        Ok(Student { id: row.id, name: row.name, password: row.password, scores })
    }
}

#[async_trait::async_trait]
impl StudentRepository for SeaOrmStudentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StudentError> {
        let found = models::student::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        match found {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn save(&self, student: Student) -> Result<Student, StudentError> {
        models::student::upsert(&self.db, student.id, &student.name, &student.password)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        models::exam_score::replace_for_student(&self.db, student.id, &student.scores)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        Ok(student)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StudentError> {
        // exam_score rows go with the student via FK cascade
        models::student::hard_delete(&self.db, id)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))
    }

    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Vec<Student>, StudentError> {
        let rows = models::student::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(models::student::Column::Name)))
                    .eq(name.to_lowercase()),
            )
            .all(&self.db)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        let mut students = Vec::with_capacity(rows.len());
        for row in rows {
            students.push(self.assemble(row).await?);
        }
        Ok(students)
    }

    async fn count_by_name_in_ignore_case(&self, names: &[String]) -> Result<u64, StudentError> {
        let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
        models::student::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(models::student::Column::Name)))
                    .is_in(needles),
            )
            .count(&self.db)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))
    }

    async fn find_by_exam_and_score_greater_than(
        &self,
        exam: &str,
        min_score: i32,
    ) -> Result<Vec<Student>, StudentError> {
        // (student_id, exam) is unique, so the join yields each student once
        let rows = models::student::Entity::find()
            .inner_join(models::exam_score::Entity)
            .filter(models::exam_score::Column::Exam.eq(exam))
            .filter(models::exam_score::Column::Score.gt(min_score))
            .all(&self.db)
            .await
            .map_err(|e| StudentError::Repository(e.to_string()))?;
        let mut students = Vec::with_capacity(rows.len());
        for row in rows {
            students.push(self.assemble(row).await?);
        }
        Ok(students)
    }
}
