use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{
    AuditEvent, AuditOutcome, IdPath, JsonBody,
    errors::responses::{
        BadRequestIdResponse, BadRequestJsonResponse, ConflictResponse,
        InternalServerErrorResponse,
    },
};
use observability::{EmployeeMetrics, EmployeeOperation, OperationOutcome};
use serde_json::json;
use std::sync::Arc;
use std::time::Instant;
use utoipa::OpenApi;

use crate::entity;
use crate::error::{EmployeeError, EmployeeResult};
use crate::models::{Employee, NewEmployee, UpdateEmployee};
use crate::repository::EmployeeRepository;
use crate::service::EmployeeService;

/// Body of every `DELETE` response
pub const DELETE_MESSAGE: &str = "Employee was deleted";

/// OpenAPI documentation for the Employees API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_employees,
        create_employee,
        get_employee,
        update_employee,
        patch_employee,
        delete_employee,
    ),
    components(
        schemas(Employee, NewEmployee, UpdateEmployee),
        responses(
            BadRequestIdResponse,
            BadRequestJsonResponse,
            ConflictResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = entity::Model::TAG, description = "Employee management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the employee router with all HTTP endpoints
pub fn router<R: EmployeeRepository + 'static>(service: EmployeeService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route(
            "/{id}",
            get(get_employee)
                .put(update_employee)
                .patch(patch_employee)
                .delete(delete_employee),
        )
        .with_state(shared_service)
}

fn outcome_of<T>(result: &EmployeeResult<T>) -> OperationOutcome {
    match result {
        Ok(_) => OperationOutcome::Success,
        Err(err) => error_outcome(err),
    }
}

fn error_outcome(err: &EmployeeError) -> OperationOutcome {
    match err {
        EmployeeError::DuplicateEmail(_) => OperationOutcome::Duplicate,
        EmployeeError::NotFound(_) => OperationOutcome::NotFound,
        EmployeeError::Internal(_) => OperationOutcome::Error,
    }
}

fn audit_outcome(outcome: OperationOutcome) -> AuditOutcome {
    match outcome {
        OperationOutcome::Success => AuditOutcome::Success,
        OperationOutcome::Duplicate => AuditOutcome::Denied,
        OperationOutcome::NotFound | OperationOutcome::Error => AuditOutcome::Failure,
    }
}

fn record(operation: EmployeeOperation, outcome: OperationOutcome, started: Instant) {
    EmployeeMetrics::record(operation, outcome);
    EmployeeMetrics::record_duration(operation, started.elapsed());
}

/// List all employees, ordered by id
#[utoipa::path(
    get,
    path = "",
    tag = entity::Model::TAG,
    responses(
        (status = 200, description = "All employees", body = Vec<Employee>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_employees<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let started = Instant::now();
    let result = service.list_employees().await;
    record(EmployeeOperation::List, outcome_of(&result), started);

    Ok(Json(result?))
}

/// Create an employee
#[utoipa::path(
    post,
    path = "",
    tag = entity::Model::TAG,
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, response = BadRequestJsonResponse),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<NewEmployee>,
) -> EmployeeResult<impl IntoResponse> {
    let started = Instant::now();
    let email = input.email.clone();
    let result = service.create_employee(input).await;
    let outcome = outcome_of(&result);
    record(EmployeeOperation::Create, outcome, started);

    let resource = result.as_ref().ok().map(|e| format!("employee:{}", e.id));
    AuditEvent::new("employee.create", resource, audit_outcome(outcome))
        .with_request_headers(&headers)
        .with_details(json!({ "email": email }))
        .log();

    Ok((StatusCode::CREATED, Json(result?)))
}

/// Get an employee by id
#[utoipa::path(
    get,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "Employee not found (empty body)"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    IdPath(id): IdPath,
) -> EmployeeResult<Response> {
    let started = Instant::now();
    let result = service.get_employee(id).await;
    let outcome = match &result {
        Ok(None) => OperationOutcome::NotFound,
        other => outcome_of(other),
    };
    record(EmployeeOperation::Get, outcome, started);

    Ok(match result? {
        Some(employee) => Json(employee).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    })
}

/// Replace name, lastname and email of an existing employee
#[utoipa::path(
    put,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "Employee not found (empty body)"),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    JsonBody(input): JsonBody<NewEmployee>,
) -> EmployeeResult<Response> {
    let started = Instant::now();

    let mut employee = match service.get_employee(id).await {
        Ok(Some(employee)) => employee,
        Ok(None) => {
            record(EmployeeOperation::Update, OperationOutcome::NotFound, started);
            return Ok(StatusCode::NOT_FOUND.into_response());
        }
        Err(err) => {
            record(EmployeeOperation::Update, error_outcome(&err), started);
            return Err(err);
        }
    };

    employee.replace_fields(input);
    let result = service.update_employee(employee).await;
    let outcome = outcome_of(&result);
    record(EmployeeOperation::Update, outcome, started);

    AuditEvent::new(
        "employee.update",
        Some(format!("employee:{}", id)),
        audit_outcome(outcome),
    )
    .with_request_headers(&headers)
    .log();

    // The row can vanish between the lookup and the write
    match result {
        Ok(employee) => Ok(Json(employee).into_response()),
        Err(EmployeeError::NotFound(_)) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(err) => Err(err),
    }
}

/// Update only the fields present in the body
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    request_body = UpdateEmployee,
    responses(
        (status = 200, description = "Employee updated", body = Employee),
        (status = 400, response = BadRequestIdResponse),
        (status = 404, description = "Employee not found (empty body)"),
        (status = 409, response = ConflictResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn patch_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
    JsonBody(patch): JsonBody<UpdateEmployee>,
) -> EmployeeResult<Response> {
    let started = Instant::now();
    let fields: Vec<&str> = [
        patch.name.as_ref().map(|_| "name"),
        patch.lastname.as_ref().map(|_| "lastname"),
        patch.email.as_ref().map(|_| "email"),
    ]
    .into_iter()
    .flatten()
    .collect();

    let result = service.patch_employee(id, patch).await;
    let outcome = match &result {
        Ok(None) => OperationOutcome::NotFound,
        other => outcome_of(other),
    };
    record(EmployeeOperation::Patch, outcome, started);

    if outcome != OperationOutcome::NotFound {
        AuditEvent::new(
            "employee.patch",
            Some(format!("employee:{}", id)),
            audit_outcome(outcome),
        )
        .with_request_headers(&headers)
        .with_details(json!({ "fields": fields }))
        .log();
    }

    match result {
        Ok(Some(employee)) => Ok(Json(employee).into_response()),
        Ok(None) | Err(EmployeeError::NotFound(_)) => Ok(StatusCode::NOT_FOUND.into_response()),
        Err(err) => Err(err),
    }
}

/// Delete an employee.
///
/// Always answers 404 with a plain-text confirmation, whether or not the
/// employee existed. Existing clients depend on this status.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = entity::Model::TAG,
    params(
        ("id" = i64, Path, description = "Employee ID")
    ),
    responses(
        (status = 404, description = "Delete processed", body = String, content_type = "text/plain",
            example = json!("Employee was deleted")),
        (status = 400, response = BadRequestIdResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_employee<R: EmployeeRepository>(
    State(service): State<Arc<EmployeeService<R>>>,
    headers: HeaderMap,
    IdPath(id): IdPath,
) -> EmployeeResult<impl IntoResponse> {
    let started = Instant::now();
    let result = service.delete_employee(id).await;
    let outcome = outcome_of(&result);
    record(EmployeeOperation::Delete, outcome, started);

    AuditEvent::new(
        "employee.delete",
        Some(format!("employee:{}", id)),
        audit_outcome(outcome),
    )
    .with_request_headers(&headers)
    .log();

    result?;
    Ok((StatusCode::NOT_FOUND, DELETE_MESSAGE))
}
