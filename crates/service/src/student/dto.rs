use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::domain::Student;

/// Input to creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentAddDto {
    pub id: i64,
    pub name: String,
    pub password: String,
}

/// Output projection; never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentDto {
    pub id: i64,
    pub name: String,
    pub scores: BTreeMap<String, i32>,
}

/// Partial update carrier; `None` leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentUpdateDto {
    pub name: Option<String>,
    pub password: Option<String>,
}

/// Input to score addition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreDto {
    pub exam_name: String,
    pub score: i32,
}

impl From<StudentAddDto> for Student {
    fn from(dto: StudentAddDto) -> Self {
        Student::new(dto.id, dto.name, dto.password)
    }
}

impl From<&Student> for StudentDto {
    fn from(student: &Student) -> Self {
        Self { id: student.id, name: student.name.clone(), scores: student.scores.clone() }
    }
}

impl From<Student> for StudentDto {
    fn from(student: Student) -> Self {
        Self { id: student.id, name: student.name, scores: student.scores }
    }
}

impl From<&Student> for StudentAddDto {
    fn from(student: &Student) -> Self {
        Self { id: student.id, name: student.name.clone(), password: student.password.clone() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_dto_builds_entity_with_empty_scores() {
        let dto = StudentAddDto { id: 1000, name: "John".into(), password: "1234".into() };
        let student = Student::from(dto);
        assert_eq!(student.id, 1000);
        assert_eq!(student.name, "John");
        assert!(student.scores.is_empty());
    }

    #[test]
    fn output_projection_carries_scores() {
        let mut student = Student::new(1000, "John", "1234");
        student.put_score("Math", 90);
        let dto = StudentDto::from(&student);
        assert_eq!(dto.id, 1000);
        assert_eq!(dto.scores.get("Math"), Some(&90));
    }

    #[test]
    fn output_projection_serializes_without_password() {
        let student = Student::new(1000, "John", "1234");
        let json = serde_json::to_value(StudentDto::from(&student)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json.get("name").and_then(|v| v.as_str()), Some("John"));
    }
}
