use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Employees API",
        version = "0.1.0",
        description = "CRUD API for employee records with unique email addresses"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_employees::entity::Model::URL, api = domain_employees::ApiDoc)
    )
)]
pub struct ApiDoc;
