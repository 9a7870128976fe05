use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json,
};
use gigboard_core::{DatabaseError, MutationError, NewArtist, UpdatedArtist};
use log::error;

use crate::{
    context::ServerContext,
    errors::ServerResult,
    schemas::{split_genres, EditArtistSchema, NewArtistSchema, SearchSchema, ValidatedForm},
    serialized::{Artist, ArtistPage, Notification, SearchResults, ToSerialized},
    Router,
};

#[utoipa::path(
    get,
    path = "/artists",
    tag = "artists",
    responses(
        (status = 200, body = Vec<Artist>)
    )
)]
async fn list_artists(State(context): State<ServerContext>) -> ServerResult<Json<Vec<Artist>>> {
    let artists = context.app.listings.all_artists().await?;

    Ok(Json(artists.to_serialized()))
}

#[utoipa::path(
    post,
    path = "/artists/search",
    tag = "artists",
    request_body = SearchSchema,
    responses(
        (status = 200, body = SearchResults)
    )
)]
async fn search_artists(
    State(context): State<ServerContext>,
    ValidatedForm(body): ValidatedForm<SearchSchema>,
) -> ServerResult<Json<SearchResults>> {
    let results = context.app.search.artists(&body.search_term).await?;

    Ok(Json(results.to_serialized()))
}

#[utoipa::path(
    get,
    path = "/artists/{id}",
    tag = "artists",
    responses(
        (status = 200, body = ArtistPage),
        (status = 404, description = "No artist with this id")
    )
)]
async fn artist(
    State(context): State<ServerContext>,
    Path(artist_id): Path<i64>,
) -> ServerResult<Json<ArtistPage>> {
    let page = context.app.listings.artist_page(artist_id).await?;

    Ok(Json(page.to_serialized()))
}

/// The empty creation form is rendered by the presentation adapter
async fn new_artist_form() -> StatusCode {
    StatusCode::OK
}

#[utoipa::path(
    post,
    path = "/artists/create",
    tag = "artists",
    request_body = NewArtistSchema,
    responses(
        (status = 200, body = Notification)
    )
)]
async fn create_artist(
    State(context): State<ServerContext>,
    ValidatedForm(body): ValidatedForm<NewArtistSchema>,
) -> Json<Notification> {
    let name = body.name.clone();

    let result = context
        .app
        .mutations
        .create_artist(NewArtist {
            name: body.name,
            city: body.city,
            state: body.state,
            phone: body.phone,
            genres: split_genres(&body.genres),
            image_link: body.image_link,
            facebook_link: body.facebook_link,
            website_link: body.website_link,
            seeking_venue: body.seeking_venue.is_some(),
            seeking_description: body.seeking_description,
        })
        .await;

    match result {
        Ok(artist) => Json(Notification::new(format!(
            "Artist {} was successfully listed!",
            artist.name
        ))),
        Err(e) => {
            error!("Could not create artist: {e}");
            Json(Notification::new(format!(
                "Error: Artist {name} could not be listed."
            )))
        }
    }
}

#[utoipa::path(
    get,
    path = "/artists/{id}/edit",
    tag = "artists",
    responses(
        (status = 200, body = Artist),
        (status = 404, description = "No artist with this id")
    )
)]
async fn edit_artist_form(
    State(context): State<ServerContext>,
    Path(artist_id): Path<i64>,
) -> ServerResult<Json<Artist>> {
    let artist = context.app.listings.artist(artist_id).await?;

    Ok(Json(artist.to_serialized()))
}

// The submission responds the same way whether the update committed or
// rolled back. Only the notification text differs.
#[utoipa::path(
    post,
    path = "/artists/{id}/edit",
    tag = "artists",
    request_body = EditArtistSchema,
    responses(
        (status = 200, body = Notification)
    )
)]
async fn update_artist(
    State(context): State<ServerContext>,
    Path(artist_id): Path<i64>,
    ValidatedForm(body): ValidatedForm<EditArtistSchema>,
) -> Json<Notification> {
    let updated_artist = UpdatedArtist {
        id: artist_id,
        name: body.name,
        city: body.city,
        state: body.state,
        phone: body.phone,
        genres: split_genres(&body.genres),
        image_link: body.image_link,
        facebook_link: body.facebook_link,
        website_link: body.website_link,
        seeking_venue: body.seeking_venue.is_some(),
        seeking_description: body.seeking_description,
    };

    match context.app.mutations.update_artist(updated_artist).await {
        Ok(artist) => Json(Notification::new(format!(
            "Artist {} was successfully updated!",
            artist.name
        ))),
        Err(MutationError::Db(DatabaseError::NotFound { .. })) => {
            Json(Notification::new("Artist not found!"))
        }
        Err(e) => {
            error!("Could not update artist {artist_id}: {e}");
            Json(Notification::new(
                "An Error occurred: Artist could not be updated",
            ))
        }
    }
}

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_artists))
        .route("/search", post(search_artists))
        .route("/create", get(new_artist_form))
        .route("/create", post(create_artist))
        .route("/:id", get(artist))
        .route("/:id/edit", get(edit_artist_form))
        .route("/:id/edit", post(update_artist))
}
