use chrono::Utc;
use sea_orm::{entity::prelude::*, DatabaseConnection, Set};
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::exam_score;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "student")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub name: String,
    pub password: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ExamScore,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ExamScore => Entity::has_many(exam_score::Entity).into(),
        }
    }
}

impl Related<exam_score::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ExamScore.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub async fn create(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    password: &str,
) -> Result<Model, errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(id),
        name: Set(name.to_string()),
        password: Set(password.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Insert the row if the id is new, otherwise overwrite name/password.
pub async fn upsert(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    password: &str,
) -> Result<Model, errors::ModelError> {
    let found = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    match found {
        Some(existing) => {
            let mut am: ActiveModel = existing.into();
            am.name = Set(name.to_string());
            am.password = Set(password.to_string());
            am.updated_at = Set(Utc::now().into());
            am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
        }
        None => create(db, id, name, password).await,
    }
}

pub async fn hard_delete(db: &DatabaseConnection, id: i64) -> Result<(), errors::ModelError> {
    Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(())
}
