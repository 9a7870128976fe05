use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;
use utoipauto::utoipauto;

#[utoipauto(paths = "./gigboard-server/src")]
#[derive(OpenApi)]
#[openapi(info(
    description = "gigboard-server exposes endpoints to browse and manage venues, artists, and shows"
))]
pub struct ApiDoc;

pub async fn docs() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
