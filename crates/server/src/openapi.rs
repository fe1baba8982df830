use std::collections::BTreeMap;
use utoipa::{OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(ToSchema)]
pub struct StudentAddRequest {
    pub id: i64,
    pub name: String,
    pub password: String,
}

#[derive(ToSchema)]
pub struct StudentUpdateRequest {
    pub name: Option<String>,
    pub password: Option<String>,
}

#[derive(ToSchema)]
pub struct ScoreRequest {
    pub exam_name: String,
    pub score: i32,
}

#[derive(ToSchema)]
pub struct StudentResponse {
    pub id: i64,
    pub name: String,
    pub scores: BTreeMap<String, i32>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::students::add_student,
        crate::routes::students::get_student,
        crate::routes::students::remove_student,
        crate::routes::students::update_student,
        crate::routes::students::add_score,
        crate::routes::students::find_students_by_name,
        crate::routes::students::students_quantity_by_names,
        crate::routes::students::students_by_exam_min_score,
    ),
    components(
        schemas(
            HealthResponse,
            StudentAddRequest,
            StudentUpdateRequest,
            ScoreRequest,
            StudentResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "students")
    )
)]
pub struct ApiDoc;
