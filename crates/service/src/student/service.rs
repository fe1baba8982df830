use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::Student;
use super::dto::{ScoreDto, StudentAddDto, StudentDto, StudentUpdateDto};
use super::errors::StudentError;
use super::repository::StudentRepository;

/// Student business service independent of web framework
pub struct StudentService<R: StudentRepository> {
    repo: Arc<R>,
}

impl<R: StudentRepository> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a student when the id is still free.
    ///
    /// Returns `Ok(false)` without writing when the id is already taken.
    ///
    /// # Examples
    /// ```
    /// use service::student::{service::StudentService, repository::mock::MockStudentRepository};
    /// use service::student::dto::StudentAddDto;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockStudentRepository::default());
    /// let svc = StudentService::new(repo);
    /// let dto = StudentAddDto { id: 1000, name: "John".into(), password: "1234".into() };
    /// assert!(tokio_test::block_on(svc.add_student(dto)).unwrap());
    /// ```
    #[instrument(skip(self, dto), fields(student_id = dto.id))]
    pub async fn add_student(&self, dto: StudentAddDto) -> Result<bool, StudentError> {
        if self.repo.find_by_id(dto.id).await?.is_some() {
            debug!(student_id = dto.id, "student id already taken");
            return Ok(false);
        }
        let student = self.repo.save(Student::from(dto)).await?;
        info!(student_id = student.id, "student_added");
        Ok(true)
    }

    /// Look up a student by id.
    ///
    /// # Examples
    /// ```
    /// use service::student::{service::StudentService, repository::mock::MockStudentRepository};
    /// use service::student::domain::Student;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockStudentRepository::with_students([Student::new(1000, "John", "1234")]));
    /// let svc = StudentService::new(repo);
    /// let dto = tokio_test::block_on(svc.find_student(1000)).unwrap();
    /// assert_eq!(dto.name, "John");
    /// ```
    pub async fn find_student(&self, id: i64) -> Result<StudentDto, StudentError> {
        let student = self.repo.find_by_id(id).await?.ok_or(StudentError::NotFound(id))?;
        Ok(StudentDto::from(student))
    }

    /// Delete a student, returning the projection taken before deletion.
    #[instrument(skip(self))]
    pub async fn remove_student(&self, id: i64) -> Result<StudentDto, StudentError> {
        let student = self.repo.find_by_id(id).await?.ok_or(StudentError::NotFound(id))?;
        let snapshot = StudentDto::from(&student);
        self.repo.delete_by_id(id).await?;
        info!(student_id = id, "student_removed");
        Ok(snapshot)
    }

    /// Apply the fields present in `update`, leaving the rest untouched.
    #[instrument(skip(self, update))]
    pub async fn update_student(
        &self,
        id: i64,
        update: StudentUpdateDto,
    ) -> Result<StudentAddDto, StudentError> {
        let mut student = self.repo.find_by_id(id).await?.ok_or(StudentError::NotFound(id))?;
        if let Some(name) = update.name {
            student.name = name;
        }
        if let Some(password) = update.password {
            student.password = password;
        }
        let saved = self.repo.save(student).await?;
        info!(student_id = id, "student_updated");
        Ok(StudentAddDto::from(&saved))
    }

    /// Record a score, overwriting any previous entry for the same exam.
    #[instrument(skip(self, score), fields(exam = %score.exam_name))]
    pub async fn add_score(&self, id: i64, score: ScoreDto) -> Result<bool, StudentError> {
        let mut student = self.repo.find_by_id(id).await?.ok_or(StudentError::NotFound(id))?;
        student.put_score(score.exam_name, score.score);
        self.repo.save(student).await?;
        info!(student_id = id, "score_added");
        Ok(true)
    }

    /// Case-insensitive name lookup, in gateway-returned order.
    pub async fn find_students_by_name(&self, name: &str) -> Result<Vec<StudentDto>, StudentError> {
        let students = self.repo.find_by_name_ignore_case(name).await?;
        Ok(students.into_iter().map(StudentDto::from).collect())
    }

    /// Pure delegation to the gateway's count.
    pub async fn get_students_quantity_by_names(
        &self,
        names: &[String],
    ) -> Result<u64, StudentError> {
        self.repo.count_by_name_in_ignore_case(names).await
    }

    /// Students whose score for `exam` is strictly greater than `min_score`.
    pub async fn get_students_by_exam_min_score(
        &self,
        exam: &str,
        min_score: i32,
    ) -> Result<Vec<StudentDto>, StudentError> {
        let students = self.repo.find_by_exam_and_score_greater_than(exam, min_score).await?;
        Ok(students.into_iter().map(StudentDto::from).collect())
    }
}
