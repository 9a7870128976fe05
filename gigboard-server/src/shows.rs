use axum::{extract::State, http::StatusCode, routing::{get, post}, Json};
use gigboard_core::ShowSubmission;
use log::error;

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{NewShowSchema, ValidatedForm},
    serialized::{Notification, ShowListing, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/shows",
    tag = "shows",
    responses(
        (status = 200, body = Vec<ShowListing>)
    )
)]
async fn list_shows(State(context): State<ServerContext>) -> ServerResult<Json<Vec<ShowListing>>> {
    let shows = context.app.listings.upcoming_shows().await?;

    Ok(Json(shows.to_serialized()))
}

/// The empty creation form is rendered by the presentation adapter
async fn new_show_form() -> StatusCode {
    StatusCode::OK
}

// A malformed start time and an unknown artist or venue id fail the same
// way. The caller is never told which it was.
#[utoipa::path(
    post,
    path = "/shows/create",
    tag = "shows",
    request_body = NewShowSchema,
    responses(
        (status = 200, body = Notification)
    )
)]
async fn create_show(
    State(context): State<ServerContext>,
    ValidatedForm(body): ValidatedForm<NewShowSchema>,
) -> Json<Notification> {
    let result = context
        .app
        .mutations
        .create_show(ShowSubmission {
            artist_id: body.artist_id,
            venue_id: body.venue_id,
            start_time: body.start_time,
        })
        .await;

    match result {
        Ok(_) => Json(Notification::new("Show was successfully listed!")),
        Err(e) => {
            error!("Could not create show: {e}");
            Json(Notification::new(
                "An error occurred. Show could not be listed.",
            ))
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_shows))
        .route("/create", get(new_show_form))
        .route("/create", post(create_show))
}
