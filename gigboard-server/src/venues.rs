use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json,
};
use gigboard_core::{DatabaseError, MutationError, NewVenue, UpdatedVenue};
use log::error;

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{EditVenueSchema, NewVenueSchema, SearchSchema, ValidatedForm},
    serialized::{Notification, SearchResults, ToSerialized, VenueArea, VenuePage},
    Router,
};

#[utoipa::path(
    get,
    path = "/venues",
    tag = "venues",
    responses(
        (status = 200, body = Vec<VenueArea>)
    )
)]
async fn list_venues(State(context): State<ServerContext>) -> ServerResult<Json<Vec<VenueArea>>> {
    let areas = context.app.listings.venue_areas().await?;

    Ok(Json(areas.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/venues/search",
    tag = "venues",
    request_body = SearchSchema,
    responses(
        (status = 200, body = SearchResults)
    )
)]
async fn search_venues(
    State(context): State<ServerContext>,
    ValidatedForm(body): ValidatedForm<SearchSchema>,
) -> ServerResult<Json<SearchResults>> {
    let results = context.app.search.venues(&body.search_term).await?;

    Ok(Json(results.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/venues/{id}",
    tag = "venues",
    responses(
        (status = 200, body = VenuePage),
        (status = 404, description = "No venue with this id")
    )
)]
async fn venue(
    State(context): State<ServerContext>,
    Path(venue_id): Path<i64>,
) -> ServerResult<Json<VenuePage>> {
    let page = context.app.listings.venue_page(venue_id).await?;

    Ok(Json(page.to_serialized()))
}

/// The empty creation form is rendered by the presentation adapter
async fn new_venue_form() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    post,
    path = "/venues/create",
    tag = "venues",
    request_body = NewVenueSchema,
    responses(
        (status = 200, body = Notification)
    )
)]
async fn create_venue(
    State(context): State<ServerContext>,
    ValidatedForm(body): ValidatedForm<NewVenueSchema>,
) -> Json<Notification> {
    let result = context
        .app
        .mutations
        .create_venue(NewVenue {
            name: body.name,
            city: body.city,
            state: body.state,
            address: body.address,
            phone: body.phone,
            facebook_link: body.facebook_link,
        })
        .await;

    match result {
        Ok(venue) => Json(Notification::new(format!(
            "Venue {} was successfully listed!",
            venue.name
        ))),
        Err(e) => {
            error!("Could not create venue: {e}");
            Json(Notification::new(
                "An error occurred. Venue could not be listed.",
            ))
        }
    }
}

#[utoipa::path(
    delete,
    path = "/venues/{id}",
    tag = "venues",
    responses(
        (status = 200, body = Notification)
    )
)]
async fn delete_venue(
    State(context): State<ServerContext>,
    Path(venue_id): Path<i64>,
) -> Json<Notification> {
    match context.app.mutations.delete_venue(venue_id).await {
        Ok(()) => Json(Notification::new("Venue successfully deleted.")),
        Err(MutationError::Db(DatabaseError::NotFound { .. })) => {
            Json(Notification::new("Venue not found."))
        }
        Err(e) => {
            error!("Could not delete venue {venue_id}: {e}");
            Json(Notification::new(
                "An error occurred. Venue could not be deleted.",
            ))
        }
    }
}

#[utoipa::path(
    get,
    path = "/venues/{id}/edit",
    tag = "venues",
    responses(
        (status = 200, description = "The venue row for pre-population, or a not-found notification")
    )
)]
async fn edit_venue_form(
    State(context): State<ServerContext>,
    Path(venue_id): Path<i64>,
) -> ServerResult<Response> {
    match context.app.listings.venue(venue_id).await {
        Ok(venue) => Ok(Json(venue.to_serialized()).into_response()),
        Err(DatabaseError::NotFound { .. }) => {
            Ok(Json(Notification::new("Venue not found!")).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    post,
    path = "/venues/{id}/edit",
    tag = "venues",
    request_body = EditVenueSchema,
    responses(
        (status = 200, body = Notification)
    )
)]
async fn update_venue(
    State(context): State<ServerContext>,
    Path(venue_id): Path<i64>,
    ValidatedForm(body): ValidatedForm<EditVenueSchema>,
) -> Json<Notification> {
    let updated_venue = UpdatedVenue {
        id: venue_id,
        name: body.name,
        city: body.city,
        state: body.state,
        address: body.address,
        phone: body.phone,
        image_link: body.image_link,
        facebook_link: body.facebook_link,
        website_link: body.website_link,
        seeking_talent: body.seeking_talent.is_some(),
        seeking_description: body.seeking_description,
    };

    match context.app.mutations.update_venue(updated_venue).await {
        Ok(venue) => Json(Notification::new(format!(
            "Venue {} was successfully updated!",
            venue.name
        ))),
        Err(MutationError::Db(DatabaseError::NotFound { .. })) => {
            Json(Notification::new("Venue not found!"))
        }
        Err(e) => {
            error!("Could not update venue {venue_id}: {e}");
            Json(Notification::new(
                "An Error occurred: Venue could not be updated",
            ))
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_venues))
        .route("/search", post(search_venues))
        .route("/create", get(new_venue_form))
        .route("/create", post(create_venue))
        .route("/:id", get(venue))
        .route("/:id", delete(delete_venue))
        .route("/:id/edit", get(edit_venue_form))
        .route("/:id/edit", post(update_venue))
}
