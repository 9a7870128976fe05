use chrono::NaiveDateTime;

/// The type used for primary keys in the database.
pub type PrimaryKey = i64;

/// A place that hosts shows
#[derive(Debug, Clone)]
pub struct VenueData {
    pub id: PrimaryKey,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    /// If this is true, the venue is looking for artists to book
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// A performer who plays shows
#[derive(Debug, Clone)]
pub struct ArtistData {
    pub id: PrimaryKey,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    /// Decoded from the stored text encoding at the storage boundary
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A scheduled event linking one artist to one venue at a start time
#[derive(Debug, Clone)]
pub struct ShowData {
    pub id: PrimaryKey,
    pub artist_id: PrimaryKey,
    pub venue_id: PrimaryKey,
    pub start_time: NaiveDateTime,
}

/// A venue row together with its upcoming show count, as produced by the
/// listing and search scans
#[derive(Debug, Clone)]
pub struct VenueSummaryData {
    pub id: PrimaryKey,
    pub name: String,
    pub city: String,
    pub state: String,
    pub num_upcoming_shows: i64,
}

/// A show on a venue's page, joined with its artist
#[derive(Debug, Clone)]
pub struct VenueShowData {
    pub artist_id: PrimaryKey,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A show on an artist's page, joined with its venue
#[derive(Debug, Clone)]
pub struct ArtistShowData {
    pub venue_id: PrimaryKey,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: NaiveDateTime,
}

/// A row of the upcoming shows listing, joined with both sides
#[derive(Debug, Clone)]
pub struct ShowListingData {
    pub venue_id: PrimaryKey,
    pub venue_name: String,
    pub artist_id: PrimaryKey,
    pub artist_name: String,
    pub start_time: NaiveDateTime,
}
