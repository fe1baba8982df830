use crate::db::connect;
use crate::{exam_score, student};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Setup test database with migrations
async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Caller-assigned ids must be unique per test run.
fn fresh_id() -> i64 {
    (SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos() as i64) & i64::MAX
}

fn db_available() -> bool {
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip db tests");
        return false;
    }
    true
}

#[tokio::test]
async fn test_student_crud() -> Result<()> {
    if !db_available() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let id = fresh_id();
    let created = student::create(&db, id, "John", "1234").await?;
    assert_eq!(created.id, id);
    assert_eq!(created.name, "John");

    let found = student::Entity::find_by_id(id).one(&db).await?;
    assert!(found.is_some());
    assert_eq!(found.unwrap().password, "1234");

    let renamed = student::upsert(&db, id, "Johnny", "1234").await?;
    assert_eq!(renamed.name, "Johnny");

    student::hard_delete(&db, id).await?;
    let gone = student::Entity::find_by_id(id).one(&db).await?;
    assert!(gone.is_none());
    Ok(())
}

#[tokio::test]
async fn test_upsert_inserts_when_missing() -> Result<()> {
    if !db_available() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let id = fresh_id();
    let created = student::upsert(&db, id, "Jane", "pw").await?;
    assert_eq!(created.name, "Jane");

    student::hard_delete(&db, id).await?;
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_blank_name() -> Result<()> {
    if !db_available() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let res = student::create(&db, fresh_id(), "  ", "pw").await;
    assert!(matches!(res, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}

#[tokio::test]
async fn test_exam_score_upsert_and_replace() -> Result<()> {
    if !db_available() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let id = fresh_id();
    student::create(&db, id, "John", "1234").await?;

    let inserted = exam_score::upsert_score(&db, id, "Math", 80).await?;
    assert_eq!(inserted.score, 80);

    // Second upsert for the same exam overwrites instead of inserting
    let overwritten = exam_score::upsert_score(&db, id, "Math", 95).await?;
    assert_eq!(overwritten.score, 95);
    assert_eq!(exam_score::for_student(&db, id).await?.len(), 1);

    let mut target = BTreeMap::new();
    target.insert("Physics".to_string(), 70);
    exam_score::replace_for_student(&db, id, &target).await?;
    let rows = exam_score::for_student(&db, id).await?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].exam, "Physics");

    // FK cascade drops the remaining scores with the student
    student::hard_delete(&db, id).await?;
    assert!(exam_score::for_student(&db, id).await?.is_empty());
    Ok(())
}
