use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::errors;
use crate::student;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "exam_score")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub student_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub exam: String,
    pub score: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Student,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Student => Entity::belongs_to(student::Entity)
                .from(Column::StudentId)
                .to(student::Column::Id)
                .into(),
        }
    }
}

impl Related<student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn for_student(
    db: &DatabaseConnection,
    student_id: i64,
) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .filter(Column::StudentId.eq(student_id))
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

pub async fn upsert_score(
    db: &DatabaseConnection,
    student_id: i64,
    exam: &str,
    score: i32,
) -> Result<Model, errors::ModelError> {
    if exam.trim().is_empty() {
        return Err(errors::ModelError::Validation("exam name required".into()));
    }
    let found = Entity::find_by_id((student_id, exam.to_string()))
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    match found {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.score = Set(score);
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => {
            let am = ActiveModel {
                student_id: Set(student_id),
                exam: Set(exam.to_string()),
                score: Set(score),
            };
            am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
    }
}

/// Reconcile the stored rows with `scores`: upsert present entries, drop the rest.
pub async fn replace_for_student(
    db: &DatabaseConnection,
    student_id: i64,
    scores: &BTreeMap<String, i32>,
) -> Result<(), errors::ModelError> {
    let existing = for_student(db, student_id).await?;
    for row in &existing {
        if !scores.contains_key(&row.exam) {
            Entity::delete_by_id((student_id, row.exam.clone()))
                .exec(db)
                .await
                .map_err(|e| errors::ModelError::Db(e.to_string()))?;
        }
    }
    for (exam, score) in scores {
        upsert_score(db, student_id, exam, *score).await?;
    }
    Ok(())
}
