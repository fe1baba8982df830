use axum::{
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::types::Health;

use crate::openapi::ApiDoc;
use crate::routes::students::ServerState;

pub mod students;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is alive")))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// Build the full application router: health, the student API, and API docs
pub fn build_router(cors: CorsLayer, state: ServerState) -> Router {
    let api = Router::new()
        .route("/students", post(students::add_student))
        .route("/students/quantity", post(students::students_quantity_by_names))
        .route(
            "/students/:id",
            get(students::get_student)
                .delete(students::remove_student)
                .patch(students::update_student),
        )
        .route("/students/:id/score", patch(students::add_score))
        .route("/students/name/:name", get(students::find_students_by_name))
        .route(
            "/students/exam/:exam/min-score/:score",
            get(students::students_by_exam_min_score),
        )
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // One span per request with method and path at INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // Response line carries status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
