use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::{
    format_start_time, now, ArtistData, ArtistShowData, Database, DatabaseError, PrimaryKey,
    VenueData, VenueShowData, VenueSummaryData,
};

/// The aggregation layer, reshaping raw rows into page view-models.
pub struct Listings<Db> {
    db: Arc<Db>,
}

/// Venues sharing a (state, city) location
#[derive(Debug, PartialEq)]
pub struct VenueArea {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, PartialEq)]
pub struct VenueSummary {
    pub id: PrimaryKey,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// The venue detail page
#[derive(Debug)]
pub struct VenuePage {
    pub id: PrimaryKey,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug)]
pub struct VenueShowEntry {
    pub artist_id: PrimaryKey,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// The artist detail page
#[derive(Debug)]
pub struct ArtistPage {
    pub id: PrimaryKey,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug)]
pub struct ArtistShowEntry {
    pub venue_id: PrimaryKey,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// A row of the upcoming shows listing
#[derive(Debug)]
pub struct ShowListing {
    pub venue_id: PrimaryKey,
    pub venue_name: String,
    pub artist_id: PrimaryKey,
    pub artist_name: String,
    pub start_time: String,
}

impl<Db> Listings<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    /// Every venue, grouped by (state, city), each with its upcoming show count
    pub async fn venue_areas(&self) -> Result<Vec<VenueArea>, DatabaseError> {
        let summaries = self.db.venue_summaries(now()).await?;

        Ok(group_by_location(summaries))
    }

    /// The venue detail page, with its shows split into past and upcoming
    pub async fn venue_page(&self, venue_id: PrimaryKey) -> Result<VenuePage, DatabaseError> {
        let evaluated_at = now();

        let venue = self.db.venue_by_id(venue_id).await?;
        let shows = self.db.shows_for_venue(venue_id).await?;

        let (past, upcoming) = partition_by_start(shows, evaluated_at, |show| show.start_time);

        let to_entry = |show: VenueShowData| VenueShowEntry {
            artist_id: show.artist_id,
            artist_name: show.artist_name,
            artist_image_link: show.artist_image_link,
            start_time: format_start_time(show.start_time),
        };

        let past_shows: Vec<_> = past.into_iter().map(to_entry).collect();
        let upcoming_shows: Vec<_> = upcoming.into_iter().map(to_entry).collect();

        Ok(VenuePage {
            id: venue.id,
            name: venue.name,
            address: venue.address,
            city: venue.city,
            state: venue.state,
            phone: venue.phone,
            website: venue.website_link,
            facebook_link: venue.facebook_link,
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description,
            image_link: venue.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// The artist detail page, symmetric to the venue page
    pub async fn artist_page(&self, artist_id: PrimaryKey) -> Result<ArtistPage, DatabaseError> {
        let evaluated_at = now();

        let artist = self.db.artist_by_id(artist_id).await?;
        let shows = self.db.shows_for_artist(artist_id).await?;

        let (past, upcoming) = partition_by_start(shows, evaluated_at, |show| show.start_time);

        let to_entry = |show: ArtistShowData| ArtistShowEntry {
            venue_id: show.venue_id,
            venue_name: show.venue_name,
            venue_image_link: show.venue_image_link,
            start_time: format_start_time(show.start_time),
        };

        let past_shows: Vec<_> = past.into_iter().map(to_entry).collect();
        let upcoming_shows: Vec<_> = upcoming.into_iter().map(to_entry).collect();

        Ok(ArtistPage {
            id: artist.id,
            name: artist.name,
            genres: artist.genres,
            city: artist.city,
            state: artist.state,
            phone: artist.phone,
            website: artist.website_link,
            facebook_link: artist.facebook_link,
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description,
            image_link: artist.image_link,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    /// The full unfiltered artist listing
    pub async fn all_artists(&self) -> Result<Vec<ArtistData>, DatabaseError> {
        self.db.list_artists().await
    }

    /// All shows that haven't started yet, soonest first
    pub async fn upcoming_shows(&self) -> Result<Vec<ShowListing>, DatabaseError> {
        let shows = self.db.upcoming_shows(now()).await?;

        let listings = shows
            .into_iter()
            .map(|show| ShowListing {
                venue_id: show.venue_id,
                venue_name: show.venue_name,
                artist_id: show.artist_id,
                artist_name: show.artist_name,
                start_time: format_start_time(show.start_time),
            })
            .collect();

        Ok(listings)
    }

    /// A single venue row, used to pre-populate the edit form
    pub async fn venue(&self, venue_id: PrimaryKey) -> Result<VenueData, DatabaseError> {
        self.db.venue_by_id(venue_id).await
    }

    /// A single artist row, used to pre-populate the edit form
    pub async fn artist(&self, artist_id: PrimaryKey) -> Result<ArtistData, DatabaseError> {
        self.db.artist_by_id(artist_id).await
    }
}

/// Groups venue summaries into areas. Rows arrive ordered by (state, city),
/// so a change of key starts a new area.
fn group_by_location(summaries: Vec<VenueSummaryData>) -> Vec<VenueArea> {
    let mut areas: Vec<VenueArea> = Vec::new();

    for summary in summaries {
        let VenueSummaryData {
            id,
            name,
            city,
            state,
            num_upcoming_shows,
        } = summary;

        let venue = VenueSummary {
            id,
            name,
            num_upcoming_shows,
        };

        match areas.last_mut() {
            Some(area) if area.state == state && area.city == city => area.venues.push(venue),
            _ => areas.push(VenueArea {
                city,
                state,
                venues: vec![venue],
            }),
        }
    }

    areas
}

/// Splits entries into (past, upcoming). A show is upcoming only if it starts
/// strictly after `evaluated_at`, so one starting exactly then is past.
fn partition_by_start<T>(
    entries: Vec<T>,
    evaluated_at: NaiveDateTime,
    start_time: impl Fn(&T) -> NaiveDateTime,
) -> (Vec<T>, Vec<T>) {
    entries
        .into_iter()
        .partition(|entry| start_time(entry) <= evaluated_at)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{parse_start_time, NewArtist, NewShow, NewVenue, SqliteDatabase};

    fn summary(id: i64, name: &str, city: &str, state: &str) -> VenueSummaryData {
        VenueSummaryData {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            num_upcoming_shows: 0,
        }
    }

    #[test]
    fn test_each_venue_lands_in_exactly_one_area() {
        let areas = group_by_location(vec![
            summary(1, "Red Room", "Brooklyn", "NY"),
            summary(2, "Blue Note", "New York", "NY"),
            summary(3, "The Dive", "Austin", "TX"),
            summary(4, "Mohawk", "Austin", "TX"),
        ]);

        assert_eq!(areas.len(), 3);

        let total: usize = areas.iter().map(|area| area.venues.len()).sum();
        assert_eq!(total, 4);

        let austin = areas
            .iter()
            .find(|area| area.city == "Austin" && area.state == "TX")
            .unwrap();
        assert_eq!(austin.venues.len(), 2);
    }

    #[test]
    fn test_same_city_name_in_different_states_stays_separate() {
        let areas = group_by_location(vec![
            summary(1, "Springfield Hall", "Springfield", "IL"),
            summary(2, "Springfield Arms", "Springfield", "MO"),
        ]);

        assert_eq!(areas.len(), 2);
    }

    #[test]
    fn test_partition_boundary_is_strict() {
        let evaluated_at = parse_start_time("2050-06-01 20:00:00").unwrap();

        let times = vec![
            parse_start_time("2050-06-01 19:59:59").unwrap(),
            parse_start_time("2050-06-01 20:00:00").unwrap(),
            parse_start_time("2050-06-01 20:00:01").unwrap(),
        ];

        let (past, upcoming) = partition_by_start(times, evaluated_at, |t| *t);

        // A show starting exactly now is past
        assert_eq!(past.len(), 2);
        assert_eq!(upcoming.len(), 1);
    }

    async fn seeded_db() -> (Arc<SqliteDatabase>, i64, i64) {
        let db = Arc::new(
            SqliteDatabase::new("sqlite::memory:")
                .await
                .expect("database initializes"),
        );

        let venue = db
            .create_venue(NewVenue {
                name: "The Dive".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                address: "123 Main St".to_string(),
                phone: "555-0100".to_string(),
                facebook_link: "https://facebook.com/thedive".to_string(),
            })
            .await
            .unwrap();

        let artist = db
            .create_artist(NewArtist {
                name: "Alice".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                phone: "555-0100".to_string(),
                genres: vec!["Jazz".to_string()],
                image_link: "https://example.com/alice.png".to_string(),
                facebook_link: "https://facebook.com/alice".to_string(),
                website_link: "https://example.com".to_string(),
                seeking_venue: true,
                seeking_description: None,
            })
            .await
            .unwrap();

        (db, venue.id, artist.id)
    }

    #[tokio::test]
    async fn test_future_show_is_upcoming_on_both_pages() {
        let (db, venue_id, artist_id) = seeded_db().await;
        let listings = Listings::new(&db);

        db.create_show(NewShow {
            artist_id,
            venue_id,
            start_time: parse_start_time("2099-01-01 20:00:00").unwrap(),
        })
        .await
        .unwrap();

        let venue_page = listings.venue_page(venue_id).await.unwrap();
        assert_eq!(venue_page.upcoming_shows_count, 1);
        assert_eq!(venue_page.past_shows_count, 0);
        assert_eq!(venue_page.upcoming_shows[0].artist_id, artist_id);
        assert_eq!(venue_page.upcoming_shows[0].start_time, "2099-01-01 20:00:00");

        let artist_page = listings.artist_page(artist_id).await.unwrap();
        assert_eq!(artist_page.upcoming_shows_count, 1);
        assert_eq!(artist_page.upcoming_shows[0].venue_id, venue_id);
        assert_eq!(artist_page.upcoming_shows[0].venue_name, "The Dive");
    }

    #[tokio::test]
    async fn test_partition_counts_sum_to_total() {
        let (db, venue_id, artist_id) = seeded_db().await;
        let listings = Listings::new(&db);

        for start_time in ["1999-01-01 20:00:00", "2000-06-15 21:00:00", "2099-01-01 20:00:00"] {
            db.create_show(NewShow {
                artist_id,
                venue_id,
                start_time: parse_start_time(start_time).unwrap(),
            })
            .await
            .unwrap();
        }

        let page = listings.venue_page(venue_id).await.unwrap();

        assert_eq!(page.past_shows_count + page.upcoming_shows_count, 3);
        assert_eq!(page.past_shows_count, 2);
        assert_eq!(page.upcoming_shows_count, 1);
    }

    #[tokio::test]
    async fn test_artist_page_decodes_genres() {
        let (db, _, artist_id) = seeded_db().await;
        let listings = Listings::new(&db);

        let page = listings.artist_page(artist_id).await.unwrap();

        assert_eq!(page.genres, vec!["Jazz".to_string()]);
        assert!(page.seeking_venue);
        assert_eq!(page.city, "Austin");
        assert_eq!(page.state, "TX");
        assert_eq!(page.phone, "555-0100");
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (db, _, _) = seeded_db().await;
        let listings = Listings::new(&db);

        assert!(matches!(
            listings.venue_page(999).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            listings.artist_page(999).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_venue_areas_cover_every_venue() {
        let (db, _, _) = seeded_db().await;
        let listings = Listings::new(&db);

        db.create_venue(NewVenue {
            name: "Blue Note".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "131 W 3rd St".to_string(),
            phone: "555-0199".to_string(),
            facebook_link: "https://facebook.com/bluenote".to_string(),
        })
        .await
        .unwrap();

        let areas = listings.venue_areas().await.unwrap();

        let total: usize = areas.iter().map(|area| area.venues.len()).sum();
        assert_eq!(total, 2);

        // Ordered by (state, city) ascending
        assert_eq!(areas[0].state, "NY");
        assert_eq!(areas[1].state, "TX");
    }
}
