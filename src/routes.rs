use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use hyper::{
    HeaderMap,
    header::{HeaderValue, LOCATION},
};
use utoipa::OpenApi;

use crate::errors::ApiError;
use crate::models::{BulkInsertRequest, NameEmailView, NameGradeView, Student, StudentCreate};
use crate::service::{Created, RESOURCE_PATH, StudentService};

fn location_header(location: &str) -> Result<HeaderMap, ApiError> {
    let value = HeaderValue::from_str(location).map_err(|err| {
        ApiError::internal("Failed to build Location header", Some(err.to_string()))
    })?;
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, value);
    Ok(headers)
}

fn created<T>(created: Created<T>) -> Result<(StatusCode, HeaderMap, Json<T>), ApiError> {
    let headers = location_header(&created.location)?;
    Ok((StatusCode::CREATED, headers, Json(created.value)))
}

#[utoipa::path(
    get,
    path = "/api/students",
    responses((status = 200, description = "Active students", body = [Student])),
    tag = "students"
)]
pub async fn get_all(State(service): State<StudentService>) -> Result<Json<Vec<Student>>, ApiError> {
    Ok(Json(service.list_active().await?))
}

#[utoipa::path(
    get,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 200, description = "The student", body = Student),
        (status = 404, description = "No active student with this id")
    ),
    tag = "students"
)]
pub async fn get_one(
    State(service): State<StudentService>,
    Path(id): Path<i32>,
) -> Result<Json<Student>, ApiError> {
    Ok(Json(service.get_active_by_id(id).await?))
}

#[utoipa::path(
    get,
    path = "/api/students/name-email",
    responses((status = 200, description = "Active students by last name, descending", body = [NameEmailView])),
    tag = "students"
)]
pub async fn get_name_email(
    State(service): State<StudentService>,
) -> Result<Json<Vec<NameEmailView>>, ApiError> {
    Ok(Json(service.list_name_email_by_last_name_desc().await?))
}

#[utoipa::path(
    get,
    path = "/api/students/name-grade",
    responses((status = 200, description = "Active students by first name, descending", body = [NameGradeView])),
    tag = "students"
)]
pub async fn get_name_grade(
    State(service): State<StudentService>,
) -> Result<Json<Vec<NameGradeView>>, ApiError> {
    Ok(Json(service.list_name_grade_by_first_name_desc().await?))
}

#[utoipa::path(
    put,
    path = "/api/students/{id}/name-email",
    params(("id" = i32, Path, description = "Student id")),
    request_body = NameEmailView,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No active student with this id")
    ),
    tag = "students"
)]
pub async fn update_name_email(
    State(service): State<StudentService>,
    Path(id): Path<i32>,
    Json(view): Json<NameEmailView>,
) -> Result<StatusCode, ApiError> {
    service.update_name_email(id, view).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    put,
    path = "/api/students/{id}/name-grade",
    params(("id" = i32, Path, description = "Student id")),
    request_body = NameGradeView,
    responses(
        (status = 204, description = "Updated"),
        (status = 404, description = "No active student with this id")
    ),
    tag = "students"
)]
pub async fn update_name_grade(
    State(service): State<StudentService>,
    Path(id): Path<i32>,
    Json(view): Json<NameGradeView>,
) -> Result<StatusCode, ApiError> {
    service.update_name_grade(id, view).await?;
    Ok(StatusCode::NO_CONTENT)
}

// A JSON `null` body deserializes to `None` and is rejected by the service.
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = StudentCreate,
    responses(
        (status = 201, description = "Created", body = Student),
        (status = 400, description = "Missing student"),
        (status = 409, description = "Duplicate student id")
    ),
    tag = "students"
)]
pub async fn create_one(
    State(service): State<StudentService>,
    Json(payload): Json<Option<StudentCreate>>,
) -> Result<(StatusCode, HeaderMap, Json<Student>), ApiError> {
    created(service.create(payload).await?)
}

#[utoipa::path(
    put,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    request_body = Student,
    responses(
        (status = 204, description = "Updated"),
        (status = 400, description = "Path id and body studentId differ"),
        (status = 404, description = "No student with this id")
    ),
    tag = "students"
)]
pub async fn update_one(
    State(service): State<StudentService>,
    Path(id): Path<i32>,
    Json(student): Json<Student>,
) -> Result<StatusCode, ApiError> {
    service.full_update(id, student).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/students/by-grade",
    request_body = BulkInsertRequest,
    responses(
        (status = 201, description = "Created", body = [Student]),
        (status = 400, description = "Student list is empty"),
        (status = 409, description = "Duplicate student id")
    ),
    tag = "students"
)]
pub async fn create_by_grade(
    State(service): State<StudentService>,
    Json(request): Json<BulkInsertRequest>,
) -> Result<(StatusCode, HeaderMap, Json<Vec<Student>>), ApiError> {
    created(service.bulk_insert_by_grade(request).await?)
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = i32, Path, description = "Student id")),
    responses(
        (status = 204, description = "Deactivated"),
        (status = 404, description = "No active student with this id")
    ),
    tag = "students"
)]
pub async fn delete_one(
    State(service): State<StudentService>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    service.soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(OpenApi)]
#[openapi(
    paths(
        get_all,
        get_one,
        get_name_email,
        get_name_grade,
        update_name_email,
        update_name_grade,
        create_one,
        update_one,
        create_by_grade,
        delete_one,
    ),
    components(schemas(Student, StudentCreate, NameEmailView, NameGradeView, BulkInsertRequest)),
    tags((name = "students", description = "Student records with soft delete"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Student routes, relative to [`RESOURCE_PATH`].
pub fn student_routes(service: StudentService) -> Router {
    Router::new()
        .route("/", get(get_all).post(create_one))
        .route("/name-email", get(get_name_email))
        .route("/name-grade", get(get_name_grade))
        .route("/by-grade", post(create_by_grade))
        .route("/{id}", get(get_one).put(update_one).delete(delete_one))
        .route("/{id}/name-email", put(update_name_email))
        .route("/{id}/name-grade", put(update_name_grade))
        .with_state(service)
}

/// The full application router: student routes plus the OpenAPI document.
pub fn app(service: StudentService) -> Router {
    Router::new()
        .nest(RESOURCE_PATH, student_routes(service))
        .route("/api-docs/openapi.json", get(openapi_json))
}
