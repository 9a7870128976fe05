//! All schemas that are exposed from endpoints are defined here
//! along with the conversions from the core view-models

use gigboard_core::{
    ArtistData, ArtistPage as CoreArtistPage, ArtistShowEntry as CoreArtistShowEntry,
    SearchMatch as CoreSearchMatch, SearchResults as CoreSearchResults,
    ShowListing as CoreShowListing, VenueArea as CoreVenueArea, VenueData,
    VenuePage as CoreVenuePage, VenueShowEntry as CoreVenueShowEntry,
    VenueSummary as CoreVenueSummary,
};
use serde::Serialize;
use utoipa::ToSchema;

/// A flash-style notification, the only body mutating endpoints produce
#[derive(Debug, Serialize, ToSchema)]
pub struct Notification {
    message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueArea {
    city: String,
    state: String,
    venues: Vec<VenueSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueSummary {
    id: i64,
    name: String,
    num_upcoming_shows: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenuePage {
    id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    phone: String,
    website: Option<String>,
    facebook_link: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
    image_link: Option<String>,
    past_shows: Vec<VenueShow>,
    upcoming_shows: Vec<VenueShow>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VenueShow {
    artist_id: i64,
    artist_name: String,
    artist_image_link: Option<String>,
    start_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistPage {
    id: i64,
    name: String,
    genres: Vec<String>,
    city: String,
    state: String,
    phone: String,
    website: Option<String>,
    facebook_link: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
    image_link: Option<String>,
    past_shows: Vec<ArtistShow>,
    upcoming_shows: Vec<ArtistShow>,
    past_shows_count: usize,
    upcoming_shows_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ArtistShow {
    venue_id: i64,
    venue_name: String,
    venue_image_link: Option<String>,
    start_time: String,
}

/// A raw venue row, as served to the edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct Venue {
    id: i64,
    name: String,
    city: String,
    state: String,
    address: String,
    phone: String,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website_link: Option<String>,
    seeking_talent: bool,
    seeking_description: Option<String>,
}

/// A raw artist row, as served by the listing and the edit form
#[derive(Debug, Serialize, ToSchema)]
pub struct Artist {
    id: i64,
    name: String,
    city: String,
    state: String,
    phone: String,
    genres: Vec<String>,
    image_link: Option<String>,
    facebook_link: Option<String>,
    website_link: Option<String>,
    seeking_venue: bool,
    seeking_description: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchResults {
    count: usize,
    data: Vec<SearchMatch>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SearchMatch {
    id: i64,
    name: String,
    num_upcoming_shows: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShowListing {
    venue_id: i64,
    venue_name: String,
    artist_id: i64,
    artist_name: String,
    start_time: String,
}

/// Helper trait to convert any type into a serialized version
pub trait ToSerialized<T>
where
    T: Serialize,
{
    fn to_serialized(&self) -> T;
}

impl<I, O> ToSerialized<Vec<O>> for Vec<I>
where
    I: ToSerialized<O>,
    O: Serialize,
{
    fn to_serialized(&self) -> Vec<O> {
        self.iter().map(|x| x.to_serialized()).collect()
    }
}

impl ToSerialized<VenueArea> for CoreVenueArea {
    fn to_serialized(&self) -> VenueArea {
        VenueArea {
            city: self.city.clone(),
            state: self.state.clone(),
            venues: self.venues.to_serialized(),
        }
    }
}

impl ToSerialized<VenueSummary> for CoreVenueSummary {
    fn to_serialized(&self) -> VenueSummary {
        VenueSummary {
            id: self.id,
            name: self.name.clone(),
            num_upcoming_shows: self.num_upcoming_shows,
        }
    }
}

impl ToSerialized<VenuePage> for CoreVenuePage {
    fn to_serialized(&self) -> VenuePage {
        VenuePage {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
            image_link: self.image_link.clone(),
            past_shows: self.past_shows.to_serialized(),
            upcoming_shows: self.upcoming_shows.to_serialized(),
            past_shows_count: self.past_shows_count,
            upcoming_shows_count: self.upcoming_shows_count,
        }
    }
}

impl ToSerialized<VenueShow> for CoreVenueShowEntry {
    fn to_serialized(&self) -> VenueShow {
        VenueShow {
            artist_id: self.artist_id,
            artist_name: self.artist_name.clone(),
            artist_image_link: self.artist_image_link.clone(),
            start_time: self.start_time.clone(),
        }
    }
}

impl ToSerialized<ArtistPage> for CoreArtistPage {
    fn to_serialized(&self) -> ArtistPage {
        ArtistPage {
            id: self.id,
            name: self.name.clone(),
            genres: self.genres.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            facebook_link: self.facebook_link.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
            image_link: self.image_link.clone(),
            past_shows: self.past_shows.to_serialized(),
            upcoming_shows: self.upcoming_shows.to_serialized(),
            past_shows_count: self.past_shows_count,
            upcoming_shows_count: self.upcoming_shows_count,
        }
    }
}

impl ToSerialized<ArtistShow> for CoreArtistShowEntry {
    fn to_serialized(&self) -> ArtistShow {
        ArtistShow {
            venue_id: self.venue_id,
            venue_name: self.venue_name.clone(),
            venue_image_link: self.venue_image_link.clone(),
            start_time: self.start_time.clone(),
        }
    }
}

impl ToSerialized<Venue> for VenueData {
    fn to_serialized(&self) -> Venue {
        Venue {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            address: self.address.clone(),
            phone: self.phone.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website_link: self.website_link.clone(),
            seeking_talent: self.seeking_talent,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

impl ToSerialized<Artist> for ArtistData {
    fn to_serialized(&self) -> Artist {
        Artist {
            id: self.id,
            name: self.name.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            phone: self.phone.clone(),
            genres: self.genres.clone(),
            image_link: self.image_link.clone(),
            facebook_link: self.facebook_link.clone(),
            website_link: self.website_link.clone(),
            seeking_venue: self.seeking_venue,
            seeking_description: self.seeking_description.clone(),
        }
    }
}

impl ToSerialized<SearchResults> for CoreSearchResults {
    fn to_serialized(&self) -> SearchResults {
        SearchResults {
            count: self.count,
            data: self.data.to_serialized(),
        }
    }
}

impl ToSerialized<SearchMatch> for CoreSearchMatch {
    fn to_serialized(&self) -> SearchMatch {
        SearchMatch {
            id: self.id,
            name: self.name.clone(),
            num_upcoming_shows: self.num_upcoming_shows,
        }
    }
}

impl ToSerialized<ShowListing> for CoreShowListing {
    fn to_serialized(&self) -> ShowListing {
        ShowListing {
            venue_id: self.venue_id,
            venue_name: self.venue_name.clone(),
            artist_id: self.artist_id,
            artist_name: self.artist_name.clone(),
            start_time: self.start_time.clone(),
        }
    }
}
