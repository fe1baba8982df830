use async_trait::async_trait;

use super::domain::Student;
use super::errors::StudentError;

/// Repository abstraction for student persistence.
///
/// Id uniqueness is the store's concern; callers get whatever consistency the
/// backing database provides.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StudentError>;
    async fn save(&self, student: Student) -> Result<Student, StudentError>;
    async fn delete_by_id(&self, id: i64) -> Result<(), StudentError>;
    async fn find_by_name_ignore_case(&self, name: &str) -> Result<Vec<Student>, StudentError>;
    async fn count_by_name_in_ignore_case(&self, names: &[String]) -> Result<u64, StudentError>;
    async fn find_by_exam_and_score_greater_than(
        &self,
        exam: &str,
        min_score: i32,
    ) -> Result<Vec<Student>, StudentError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::Mutex;

    /// Counts saves and deletes so tests can assert write behavior, not just
    /// returned values.
    #[derive(Default)]
    pub struct MockStudentRepository {
        students: Mutex<BTreeMap<i64, Student>>,
        saves: Mutex<u64>,
        deletes: Mutex<u64>,
    }

    impl MockStudentRepository {
        pub fn with_students(students: impl IntoIterator<Item = Student>) -> Self {
            let repo = Self::default();
            {
                let mut map = repo.students.lock().unwrap();
                for s in students {
                    map.insert(s.id, s);
                }
            }
            repo
        }

        pub fn get(&self, id: i64) -> Option<Student> {
            self.students.lock().unwrap().get(&id).cloned()
        }

        pub fn save_count(&self) -> u64 {
            *self.saves.lock().unwrap()
        }

        pub fn delete_count(&self) -> u64 {
            *self.deletes.lock().unwrap()
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn find_by_id(&self, id: i64) -> Result<Option<Student>, StudentError> {
            Ok(self.students.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, student: Student) -> Result<Student, StudentError> {
            *self.saves.lock().unwrap() += 1;
            self.students.lock().unwrap().insert(student.id, student.clone());
            Ok(student)
        }

        async fn delete_by_id(&self, id: i64) -> Result<(), StudentError> {
            *self.deletes.lock().unwrap() += 1;
            self.students.lock().unwrap().remove(&id);
            Ok(())
        }

        async fn find_by_name_ignore_case(
            &self,
            name: &str,
        ) -> Result<Vec<Student>, StudentError> {
            let needle = name.to_lowercase();
            Ok(self
                .students
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.name.to_lowercase() == needle)
                .cloned()
                .collect())
        }

        async fn count_by_name_in_ignore_case(
            &self,
            names: &[String],
        ) -> Result<u64, StudentError> {
            let needles: Vec<String> = names.iter().map(|n| n.to_lowercase()).collect();
            Ok(self
                .students
                .lock()
                .unwrap()
                .values()
                .filter(|s| needles.contains(&s.name.to_lowercase()))
                .count() as u64)
        }

        async fn find_by_exam_and_score_greater_than(
            &self,
            exam: &str,
            min_score: i32,
        ) -> Result<Vec<Student>, StudentError> {
            Ok(self
                .students
                .lock()
                .unwrap()
                .values()
                .filter(|s| s.scores.get(exam).is_some_and(|score| *score > min_score))
                .cloned()
                .collect())
        }
    }
}
