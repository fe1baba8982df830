use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Domain student (business view). The id is caller-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub password: String,
    pub scores: BTreeMap<String, i32>,
}

impl Student {
    pub fn new(id: i64, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self { id, name: name.into(), password: password.into(), scores: BTreeMap::new() }
    }

    /// Insert or overwrite the entry for `exam`, returning the previous score if any.
    pub fn put_score(&mut self, exam: impl Into<String>, score: i32) -> Option<i32> {
        self.scores.insert(exam.into(), score)
    }
}

#[cfg(test)]
mod tests {
    use super::Student;

    #[test]
    fn put_score_overwrites_existing_exam() {
        let mut s = Student::new(1, "John", "1234");
        assert_eq!(s.put_score("Math", 80), None);
        assert_eq!(s.put_score("Math", 95), Some(80));
        assert_eq!(s.scores.get("Math"), Some(&95));
        assert_eq!(s.scores.len(), 1);
    }
}
