use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

mod data;
pub use data::*;

mod sqlite;
pub use sqlite::*;

pub type Result<T> = std::result::Result<T, DatabaseError>;

#[derive(Debug, Error)]
pub enum DatabaseError {
    /// An unknown or internal error happened with the database
    #[error(transparent)]
    Internal(Box<dyn std::error::Error + Send + Sync>),
    /// A resource in the database doesn't exist
    #[error("{resource}:{identifier} doesn't exist")]
    NotFound {
        resource: &'static str,
        identifier: &'static str,
    },
    /// A referenced row doesn't exist, so the write was refused
    #[error("{resource} references a missing {field}")]
    InvalidReference {
        resource: &'static str,
        field: &'static str,
    },
    /// Rows still reference this one, so deletion was refused
    #[error("{resource} still has associated {dependents}")]
    DependentRows {
        resource: &'static str,
        dependents: &'static str,
    },
}

/// Helper trait to reduce boilerplate
pub trait IntoDatabaseError {
    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError;
    fn invalid_reference_or(self, resource: &'static str, field: &'static str) -> DatabaseError;
    fn any(self) -> DatabaseError;
}

/// Represents a type that can fetch and mutate gigboard data in a relational store
#[async_trait]
pub trait Database {
    async fn venue_by_id(&self, venue_id: PrimaryKey) -> Result<VenueData>;
    /// Every venue with its upcoming show count, ordered by (state, city)
    async fn venue_summaries(&self, now: NaiveDateTime) -> Result<Vec<VenueSummaryData>>;
    async fn shows_for_venue(&self, venue_id: PrimaryKey) -> Result<Vec<VenueShowData>>;
    async fn search_venues(&self, term: &str, now: NaiveDateTime)
        -> Result<Vec<VenueSummaryData>>;
    async fn create_venue(&self, new_venue: NewVenue) -> Result<VenueData>;
    async fn update_venue(&self, updated_venue: UpdatedVenue) -> Result<VenueData>;
    async fn delete_venue(&self, venue_id: PrimaryKey) -> Result<()>;

    async fn artist_by_id(&self, artist_id: PrimaryKey) -> Result<ArtistData>;
    async fn list_artists(&self) -> Result<Vec<ArtistData>>;
    async fn shows_for_artist(&self, artist_id: PrimaryKey) -> Result<Vec<ArtistShowData>>;
    async fn search_artists(&self, term: &str) -> Result<Vec<ArtistData>>;
    async fn upcoming_show_count_for_artist(
        &self,
        artist_id: PrimaryKey,
        now: NaiveDateTime,
    ) -> Result<i64>;
    async fn create_artist(&self, new_artist: NewArtist) -> Result<ArtistData>;
    async fn update_artist(&self, updated_artist: UpdatedArtist) -> Result<ArtistData>;

    async fn upcoming_shows(&self, now: NaiveDateTime) -> Result<Vec<ShowListingData>>;
    async fn create_show(&self, new_show: NewShow) -> Result<ShowData>;
}

#[derive(Debug)]
pub struct NewVenue {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub facebook_link: String,
}

/// Every submitted field is applied as-is. Last writer wins.
#[derive(Debug)]
pub struct UpdatedVenue {
    pub id: PrimaryKey,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug)]
pub struct NewArtist {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Every submitted field is applied as-is. Last writer wins.
#[derive(Debug)]
pub struct UpdatedArtist {
    pub id: PrimaryKey,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug)]
pub struct NewShow {
    pub artist_id: PrimaryKey,
    pub venue_id: PrimaryKey,
    pub start_time: NaiveDateTime,
}
