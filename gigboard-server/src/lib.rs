use std::{
    env,
    net::{Ipv6Addr, SocketAddr},
    sync::Arc,
};

use axum::{http::StatusCode, routing::get};
use gigboard_core::{Gigboard, SqliteDatabase};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

mod artists;
mod context;
mod docs;
mod errors;
mod schemas;
mod serialized;
mod shows;
mod venues;

pub use context::*;
use errors::ServerError;

/// The default port the server will listen on.
pub const DEFAULT_PORT: u16 = 9046;

/// Where venue, artist, and show rows live unless overridden.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://gigboard.db";

pub type Router = axum::Router<ServerContext>;

/// Starts the gigboard server
pub async fn run_server() {
    let port = env::var("GIGBOARD_SERVER_PORT")
        .map(|x| x.parse::<u16>().expect("Port must be a number"))
        .unwrap_or(DEFAULT_PORT);

    let database_url =
        env::var("GIGBOARD_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string());

    let addr: SocketAddr = (Ipv6Addr::UNSPECIFIED, port).into();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let database = SqliteDatabase::new(&database_url)
        .await
        .expect("database initializes");

    let context = ServerContext {
        app: Arc::new(Gigboard::new(database)),
    };

    let root_router = Router::new()
        .route("/", get(home))
        .route("/api.json", get(docs::docs))
        .nest("/venues", venues::router())
        .nest("/artists", artists::router())
        .nest("/shows", shows::router())
        .fallback(not_found)
        .layer(cors)
        .with_state(context);

    let listener = TcpListener::bind(&addr).await.expect("listens on address");

    axum::serve(listener, root_router.into_make_service())
        .await
        .unwrap();
}

/// The home page is all template, so there is no view-model to serve
async fn home() -> StatusCode {
    StatusCode::OK
}

async fn not_found() -> ServerError {
    ServerError::NotFound {
        resource: "page",
        identifier: "path",
    }
}
