use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

use service::student::dto::{ScoreDto, StudentAddDto, StudentDto, StudentUpdateDto};
use service::student::repo::seaorm::SeaOrmStudentRepository;
use service::student::service::StudentService;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
}

fn student_service(state: &ServerState) -> StudentService<SeaOrmStudentRepository> {
    StudentService::new(Arc::new(SeaOrmStudentRepository { db: state.db.clone() }))
}

#[utoipa::path(post, path = "/students", tag = "students", request_body = crate::openapi::StudentAddRequest, responses((status = 201, description = "Created"), (status = 409, description = "Id already exists")))]
pub async fn add_student(
    State(state): State<ServerState>,
    Json(input): Json<StudentAddDto>,
) -> Result<(StatusCode, Json<bool>), ApiError> {
    let created = student_service(&state).add_student(input).await?;
    if created {
        Ok((StatusCode::CREATED, Json(true)))
    } else {
        Err(ApiError::conflict("student id already exists"))
    }
}

#[utoipa::path(get, path = "/students/{id}", tag = "students", params(("id" = i64, Path, description = "student id")), responses((status = 200, description = "Found"), (status = 404, description = "Not Found")))]
pub async fn get_student(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentDto>, ApiError> {
    let dto = student_service(&state).find_student(id).await?;
    Ok(Json(dto))
}

#[utoipa::path(delete, path = "/students/{id}", tag = "students", params(("id" = i64, Path, description = "student id")), responses((status = 200, description = "Removed"), (status = 404, description = "Not Found")))]
pub async fn remove_student(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<StudentDto>, ApiError> {
    let dto = student_service(&state).remove_student(id).await?;
    Ok(Json(dto))
}

#[utoipa::path(patch, path = "/students/{id}", tag = "students", params(("id" = i64, Path, description = "student id")), request_body = crate::openapi::StudentUpdateRequest, responses((status = 200, description = "Updated"), (status = 404, description = "Not Found")))]
pub async fn update_student(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(update): Json<StudentUpdateDto>,
) -> Result<Json<StudentAddDto>, ApiError> {
    let dto = student_service(&state).update_student(id, update).await?;
    Ok(Json(dto))
}

#[utoipa::path(patch, path = "/students/{id}/score", tag = "students", params(("id" = i64, Path, description = "student id")), request_body = crate::openapi::ScoreRequest, responses((status = 200, description = "Score recorded"), (status = 404, description = "Not Found")))]
pub async fn add_score(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(score): Json<ScoreDto>,
) -> Result<Json<bool>, ApiError> {
    let recorded = student_service(&state).add_score(id, score).await?;
    Ok(Json(recorded))
}

#[utoipa::path(get, path = "/students/name/{name}", tag = "students", params(("name" = String, Path, description = "student name, any case")), responses((status = 200, description = "Matching students")))]
pub async fn find_students_by_name(
    State(state): State<ServerState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<StudentDto>>, ApiError> {
    let dtos = student_service(&state).find_students_by_name(&name).await?;
    Ok(Json(dtos))
}

#[utoipa::path(post, path = "/students/quantity", tag = "students", request_body = Vec<String>, responses((status = 200, description = "Count of students with the given names")))]
pub async fn students_quantity_by_names(
    State(state): State<ServerState>,
    Json(names): Json<Vec<String>>,
) -> Result<Json<u64>, ApiError> {
    let quantity = student_service(&state).get_students_quantity_by_names(&names).await?;
    Ok(Json(quantity))
}

#[utoipa::path(get, path = "/students/exam/{exam}/min-score/{score}", tag = "students", params(("exam" = String, Path, description = "exam name"), ("score" = i32, Path, description = "exclusive lower bound")), responses((status = 200, description = "Students above the threshold")))]
pub async fn students_by_exam_min_score(
    State(state): State<ServerState>,
    Path((exam, score)): Path<(String, i32)>,
) -> Result<Json<Vec<StudentDto>>, ApiError> {
    let dtos = student_service(&state).get_students_by_exam_min_score(&exam, score).await?;
    Ok(Json(dtos))
}
