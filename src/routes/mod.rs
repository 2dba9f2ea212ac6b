mod aggregate;
mod files;
mod home;
mod records;
mod upload;

use axum::{
    routing::{delete, get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        home::root,
        upload::upload_file,
        files::list_files,
        files::delete_file,
        records::list_records,
        records::unique_filter_values,
        aggregate::aggregate_file,
    ),
    components(
        schemas(
            upload::UploadResponse,
            files::FileResponse,
            records::FilterGroup,
            aggregate::MonthlyRollup,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Upload", description = "Spreadsheet upload and ingestion"),
        (name = "Files", description = "Uploaded file identities"),
        (name = "Records", description = "Campaign record filtering"),
        (name = "Aggregation", description = "Monthly rollups per uploaded file")
    ),
    info(
        title = "CampaignHub API",
        version = "0.1.0",
        description = "Ingests direct-mail campaign spreadsheets and serves filter and rollup queries for dashboards",
    )
)]
struct ApiDoc;

pub fn create_routes(db: DatabaseConnection) -> Router {
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let app_routes = Router::new()
        .route("/", get(home::root))
        .route("/upload", post(upload::upload_file))
        .route("/files", get(files::list_files))
        .route("/files/{id}", delete(files::delete_file))
        .route("/files/{id}/filters", get(records::unique_filter_values))
        .route("/files/{id}/aggregate", get(aggregate::aggregate_file))
        .route("/records", get(records::list_records))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(db);

    Router::new().merge(swagger_router).merge(app_routes)
}
