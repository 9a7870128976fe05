use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use log::info;
use sqlx::{
    error::{DatabaseError as SqlxDatabaseError, ErrorKind},
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Error as SqlxError, Row, SqlitePool,
};

use crate::{
    decode_genres, encode_genres, format_start_time, parse_start_time, ArtistData,
    ArtistShowData, Database, DatabaseError, IntoDatabaseError, NewArtist, NewShow, NewVenue,
    PrimaryKey, Result, ShowData, ShowListingData, UpdatedArtist, UpdatedVenue, VenueData,
    VenueShowData, VenueSummaryData,
};

const SCHEMA: [&str; 3] = [
    "CREATE TABLE IF NOT EXISTS venues (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        address TEXT NOT NULL,
        phone TEXT NOT NULL,
        image_link TEXT,
        facebook_link TEXT,
        website_link TEXT,
        seeking_talent INTEGER NOT NULL DEFAULT 0,
        seeking_description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS artists (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        city TEXT NOT NULL,
        state TEXT NOT NULL,
        phone TEXT NOT NULL,
        genres TEXT NOT NULL,
        image_link TEXT,
        facebook_link TEXT,
        website_link TEXT,
        seeking_venue INTEGER NOT NULL DEFAULT 0,
        seeking_description TEXT
    )",
    "CREATE TABLE IF NOT EXISTS shows (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        artist_id INTEGER NOT NULL REFERENCES artists (id),
        venue_id INTEGER NOT NULL REFERENCES venues (id),
        start_time TEXT NOT NULL
    )",
];

/// A SQLite database implementation for gigboard
pub struct SqliteDatabase {
    pool: SqlitePool,
}

impl SqliteDatabase {
    pub async fn new(url: &str) -> Result<Self> {
        info!("Connecting to database...");

        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| e.any())?
            .create_if_missing(true)
            .foreign_keys(true);

        // A single connection serializes writes and keeps in-memory
        // databases coherent across the pool
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| e.any())?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| e.any())?;
        }

        Ok(Self { pool })
    }
}

fn venue_from_row(row: &SqliteRow) -> VenueData {
    VenueData {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        address: row.get("address"),
        phone: row.get("phone"),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        seeking_talent: row.get("seeking_talent"),
        seeking_description: row.get("seeking_description"),
    }
}

fn artist_from_row(row: &SqliteRow) -> ArtistData {
    let raw_genres: String = row.get("genres");

    ArtistData {
        id: row.get("id"),
        name: row.get("name"),
        city: row.get("city"),
        state: row.get("state"),
        phone: row.get("phone"),
        genres: decode_genres(&raw_genres),
        image_link: row.get("image_link"),
        facebook_link: row.get("facebook_link"),
        website_link: row.get("website_link"),
        seeking_venue: row.get("seeking_venue"),
        seeking_description: row.get("seeking_description"),
    }
}

fn start_time_from_row(row: &SqliteRow) -> Result<NaiveDateTime> {
    let raw: String = row.get("start_time");

    parse_start_time(&raw).map_err(|e| DatabaseError::Internal(Box::new(e)))
}

#[async_trait]
impl Database for SqliteDatabase {
    async fn venue_by_id(&self, venue_id: PrimaryKey) -> Result<VenueData> {
        let row = sqlx::query("SELECT * FROM venues WHERE id = ?1")
            .bind(venue_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("venue", "id"))?;

        Ok(venue_from_row(&row))
    }

    async fn venue_summaries(&self, now: NaiveDateTime) -> Result<Vec<VenueSummaryData>> {
        let rows = sqlx::query(
            "SELECT
                venues.id, venues.name, venues.city, venues.state,
                (SELECT COUNT(*) FROM shows
                    WHERE shows.venue_id = venues.id AND shows.start_time > ?1
                ) AS num_upcoming_shows
            FROM venues
            ORDER BY venues.state, venues.city",
        )
        .bind(format_start_time(now))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())?;

        let summaries = rows
            .into_iter()
            .map(|row| VenueSummaryData {
                id: row.get("id"),
                name: row.get("name"),
                city: row.get("city"),
                state: row.get("state"),
                num_upcoming_shows: row.get("num_upcoming_shows"),
            })
            .collect();

        Ok(summaries)
    }

    async fn shows_for_venue(&self, venue_id: PrimaryKey) -> Result<Vec<VenueShowData>> {
        let rows = sqlx::query(
            "SELECT
                shows.artist_id,
                shows.start_time,
                artists.name AS artist_name,
                artists.image_link AS artist_image_link
            FROM shows
                INNER JOIN artists ON shows.artist_id = artists.id
            WHERE shows.venue_id = ?1",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())?;

        rows.iter()
            .map(|row| {
                Ok(VenueShowData {
                    artist_id: row.get("artist_id"),
                    artist_name: row.get("artist_name"),
                    artist_image_link: row.get("artist_image_link"),
                    start_time: start_time_from_row(row)?,
                })
            })
            .collect()
    }

    async fn search_venues(
        &self,
        term: &str,
        now: NaiveDateTime,
    ) -> Result<Vec<VenueSummaryData>> {
        let rows = sqlx::query(
            "SELECT
                venues.id, venues.name, venues.city, venues.state,
                (SELECT COUNT(*) FROM shows
                    WHERE shows.venue_id = venues.id AND shows.start_time > ?1
                ) AS num_upcoming_shows
            FROM venues
            WHERE LOWER(venues.name) LIKE '%' || ?2 || '%'",
        )
        .bind(format_start_time(now))
        .bind(term.to_lowercase())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())?;

        let summaries = rows
            .into_iter()
            .map(|row| VenueSummaryData {
                id: row.get("id"),
                name: row.get("name"),
                city: row.get("city"),
                state: row.get("state"),
                num_upcoming_shows: row.get("num_upcoming_shows"),
            })
            .collect();

        Ok(summaries)
    }

    async fn create_venue(&self, new_venue: NewVenue) -> Result<VenueData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let result = sqlx::query(
            "INSERT INTO venues (name, city, state, address, phone, facebook_link)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(&new_venue.name)
        .bind(&new_venue.city)
        .bind(&new_venue.state)
        .bind(&new_venue.address)
        .bind(&new_venue.phone)
        .bind(&new_venue.facebook_link)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        let venue_id = result.last_insert_rowid();
        tx.commit().await.map_err(|e| e.any())?;

        self.venue_by_id(venue_id).await
    }

    async fn update_venue(&self, updated_venue: UpdatedVenue) -> Result<VenueData> {
        // Ensure venue exists
        let _ = self.venue_by_id(updated_venue.id).await?;

        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        sqlx::query(
            "UPDATE venues SET
                name = ?1,
                city = ?2,
                state = ?3,
                address = ?4,
                phone = ?5,
                image_link = ?6,
                facebook_link = ?7,
                website_link = ?8,
                seeking_talent = ?9,
                seeking_description = ?10
            WHERE id = ?11",
        )
        .bind(&updated_venue.name)
        .bind(&updated_venue.city)
        .bind(&updated_venue.state)
        .bind(&updated_venue.address)
        .bind(&updated_venue.phone)
        .bind(&updated_venue.image_link)
        .bind(&updated_venue.facebook_link)
        .bind(&updated_venue.website_link)
        .bind(updated_venue.seeking_talent)
        .bind(&updated_venue.seeking_description)
        .bind(updated_venue.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;

        self.venue_by_id(updated_venue.id).await
    }

    async fn delete_venue(&self, venue_id: PrimaryKey) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        sqlx::query("SELECT id FROM venues WHERE id = ?1")
            .bind(venue_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.not_found_or("venue", "id"))?;

        let dependents = sqlx::query("SELECT COUNT(*) AS count FROM shows WHERE venue_id = ?1")
            .bind(venue_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        let count: i64 = dependents.get("count");

        if count > 0 {
            return Err(DatabaseError::DependentRows {
                resource: "venue",
                dependents: "shows",
            });
        }

        sqlx::query("DELETE FROM venues WHERE id = ?1")
            .bind(venue_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())
    }

    async fn artist_by_id(&self, artist_id: PrimaryKey) -> Result<ArtistData> {
        let row = sqlx::query("SELECT * FROM artists WHERE id = ?1")
            .bind(artist_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.not_found_or("artist", "id"))?;

        Ok(artist_from_row(&row))
    }

    async fn list_artists(&self) -> Result<Vec<ArtistData>> {
        let rows = sqlx::query("SELECT * FROM artists ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())?;

        Ok(rows.iter().map(artist_from_row).collect())
    }

    async fn shows_for_artist(&self, artist_id: PrimaryKey) -> Result<Vec<ArtistShowData>> {
        let rows = sqlx::query(
            "SELECT
                shows.venue_id,
                shows.start_time,
                venues.name AS venue_name,
                venues.image_link AS venue_image_link
            FROM shows
                INNER JOIN venues ON shows.venue_id = venues.id
            WHERE shows.artist_id = ?1",
        )
        .bind(artist_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())?;

        rows.iter()
            .map(|row| {
                Ok(ArtistShowData {
                    venue_id: row.get("venue_id"),
                    venue_name: row.get("venue_name"),
                    venue_image_link: row.get("venue_image_link"),
                    start_time: start_time_from_row(row)?,
                })
            })
            .collect()
    }

    async fn search_artists(&self, term: &str) -> Result<Vec<ArtistData>> {
        let rows = sqlx::query("SELECT * FROM artists WHERE LOWER(name) LIKE '%' || ?1 || '%'")
            .bind(term.to_lowercase())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.any())?;

        Ok(rows.iter().map(artist_from_row).collect())
    }

    async fn upcoming_show_count_for_artist(
        &self,
        artist_id: PrimaryKey,
        now: NaiveDateTime,
    ) -> Result<i64> {
        let row = sqlx::query(
            "SELECT COUNT(*) AS count FROM shows WHERE artist_id = ?1 AND start_time > ?2",
        )
        .bind(artist_id)
        .bind(format_start_time(now))
        .fetch_one(&self.pool)
        .await
        .map_err(|e| e.any())?;

        Ok(row.get("count"))
    }

    async fn create_artist(&self, new_artist: NewArtist) -> Result<ArtistData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let result = sqlx::query(
            "INSERT INTO artists (
                name, city, state, phone, genres,
                image_link, facebook_link, website_link,
                seeking_venue, seeking_description
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )
        .bind(&new_artist.name)
        .bind(&new_artist.city)
        .bind(&new_artist.state)
        .bind(&new_artist.phone)
        .bind(encode_genres(&new_artist.genres))
        .bind(&new_artist.image_link)
        .bind(&new_artist.facebook_link)
        .bind(&new_artist.website_link)
        .bind(new_artist.seeking_venue)
        .bind(&new_artist.seeking_description)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        let artist_id = result.last_insert_rowid();
        tx.commit().await.map_err(|e| e.any())?;

        self.artist_by_id(artist_id).await
    }

    async fn update_artist(&self, updated_artist: UpdatedArtist) -> Result<ArtistData> {
        // Ensure artist exists
        let _ = self.artist_by_id(updated_artist.id).await?;

        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        sqlx::query(
            "UPDATE artists SET
                name = ?1,
                city = ?2,
                state = ?3,
                phone = ?4,
                genres = ?5,
                image_link = ?6,
                facebook_link = ?7,
                website_link = ?8,
                seeking_venue = ?9,
                seeking_description = ?10
            WHERE id = ?11",
        )
        .bind(&updated_artist.name)
        .bind(&updated_artist.city)
        .bind(&updated_artist.state)
        .bind(&updated_artist.phone)
        .bind(encode_genres(&updated_artist.genres))
        .bind(&updated_artist.image_link)
        .bind(&updated_artist.facebook_link)
        .bind(&updated_artist.website_link)
        .bind(updated_artist.seeking_venue)
        .bind(&updated_artist.seeking_description)
        .bind(updated_artist.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| e.any())?;

        tx.commit().await.map_err(|e| e.any())?;

        self.artist_by_id(updated_artist.id).await
    }

    async fn upcoming_shows(&self, now: NaiveDateTime) -> Result<Vec<ShowListingData>> {
        let rows = sqlx::query(
            "SELECT
                shows.venue_id,
                shows.artist_id,
                shows.start_time,
                venues.name AS venue_name,
                artists.name AS artist_name
            FROM shows
                INNER JOIN venues ON shows.venue_id = venues.id
                INNER JOIN artists ON shows.artist_id = artists.id
            WHERE shows.start_time > ?1
            ORDER BY shows.start_time",
        )
        .bind(format_start_time(now))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| e.any())?;

        rows.iter()
            .map(|row| {
                Ok(ShowListingData {
                    venue_id: row.get("venue_id"),
                    venue_name: row.get("venue_name"),
                    artist_id: row.get("artist_id"),
                    artist_name: row.get("artist_name"),
                    start_time: start_time_from_row(row)?,
                })
            })
            .collect()
    }

    async fn create_show(&self, new_show: NewShow) -> Result<ShowData> {
        let mut tx = self.pool.begin().await.map_err(|e| e.any())?;

        let result = sqlx::query(
            "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?1, ?2, ?3)",
        )
        .bind(new_show.artist_id)
        .bind(new_show.venue_id)
        .bind(format_start_time(new_show.start_time))
        .execute(&mut *tx)
        .await
        .map_err(|e| e.invalid_reference_or("show", "artist_id or venue_id"))?;

        let show_id = result.last_insert_rowid();
        tx.commit().await.map_err(|e| e.any())?;

        Ok(ShowData {
            id: show_id,
            artist_id: new_show.artist_id,
            venue_id: new_show.venue_id,
            start_time: new_show.start_time,
        })
    }
}

impl IntoDatabaseError for SqlxError {
    fn any(self) -> DatabaseError {
        DatabaseError::Internal(Box::new(self))
    }

    fn not_found_or(self, resource: &'static str, identifier: &'static str) -> DatabaseError {
        match self {
            SqlxError::RowNotFound => DatabaseError::NotFound {
                resource,
                identifier,
            },
            e => Self::any(e),
        }
    }

    fn invalid_reference_or(self, resource: &'static str, field: &'static str) -> DatabaseError {
        let is_foreign_key = self
            .as_database_error()
            .is_some_and(|e| matches!(e.kind(), ErrorKind::ForeignKeyViolation));

        if is_foreign_key {
            DatabaseError::InvalidReference { resource, field }
        } else {
            Self::any(self)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    async fn memory_db() -> SqliteDatabase {
        SqliteDatabase::new("sqlite::memory:")
            .await
            .expect("database initializes")
    }

    fn new_venue(name: &str, city: &str, state: &str) -> NewVenue {
        NewVenue {
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "123 Main St".to_string(),
            phone: "555-0100".to_string(),
            facebook_link: "https://facebook.com/venue".to_string(),
        }
    }

    fn new_artist(name: &str) -> NewArtist {
        NewArtist {
            name: name.to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            phone: "555-0100".to_string(),
            genres: vec!["Jazz".to_string()],
            image_link: "https://example.com/artist.png".to_string(),
            facebook_link: "https://facebook.com/artist".to_string(),
            website_link: "https://example.com".to_string(),
            seeking_venue: false,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn test_venue_round_trip() {
        let db = memory_db().await;

        let venue = db
            .create_venue(new_venue("The Dive", "Austin", "TX"))
            .await
            .unwrap();

        let fetched = db.venue_by_id(venue.id).await.unwrap();

        assert_eq!(fetched.name, "The Dive");
        assert_eq!(fetched.city, "Austin");
        assert_eq!(fetched.state, "TX");
        assert_eq!(fetched.address, "123 Main St");
        assert_eq!(fetched.phone, "555-0100");
        assert_eq!(
            fetched.facebook_link.as_deref(),
            Some("https://facebook.com/venue")
        );
        assert!(!fetched.seeking_talent);
        assert!(fetched.image_link.is_none());
    }

    #[tokio::test]
    async fn test_missing_rows_are_not_found() {
        let db = memory_db().await;

        assert!(matches!(
            db.venue_by_id(999).await,
            Err(DatabaseError::NotFound { .. })
        ));
        assert!(matches!(
            db.artist_by_id(999).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_show_with_unknown_references_is_refused() {
        let db = memory_db().await;

        let result = db
            .create_show(NewShow {
                artist_id: 1,
                venue_id: 2,
                start_time: parse_start_time("2099-01-01 20:00:00").unwrap(),
            })
            .await;

        assert!(matches!(
            result,
            Err(DatabaseError::InvalidReference { .. })
        ));
    }

    #[tokio::test]
    async fn test_venue_with_shows_cannot_be_deleted() {
        let db = memory_db().await;

        let venue = db
            .create_venue(new_venue("The Dive", "Austin", "TX"))
            .await
            .unwrap();
        let artist = db.create_artist(new_artist("Alice")).await.unwrap();

        db.create_show(NewShow {
            artist_id: artist.id,
            venue_id: venue.id,
            start_time: parse_start_time("2099-01-01 20:00:00").unwrap(),
        })
        .await
        .unwrap();

        assert!(matches!(
            db.delete_venue(venue.id).await,
            Err(DatabaseError::DependentRows { .. })
        ));

        // The venue is still there
        assert!(db.venue_by_id(venue.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_venue() {
        let db = memory_db().await;

        let venue = db
            .create_venue(new_venue("The Dive", "Austin", "TX"))
            .await
            .unwrap();

        db.delete_venue(venue.id).await.unwrap();

        assert!(matches!(
            db.venue_by_id(venue.id).await,
            Err(DatabaseError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_upcoming_counts_use_a_strict_boundary() {
        let db = memory_db().await;

        let venue = db
            .create_venue(new_venue("The Dive", "Austin", "TX"))
            .await
            .unwrap();
        let artist = db.create_artist(new_artist("Alice")).await.unwrap();

        let boundary = parse_start_time("2050-06-01 20:00:00").unwrap();

        for start_time in ["2050-06-01 19:59:59", "2050-06-01 20:00:00", "2050-06-01 20:00:01"] {
            db.create_show(NewShow {
                artist_id: artist.id,
                venue_id: venue.id,
                start_time: parse_start_time(start_time).unwrap(),
            })
            .await
            .unwrap();
        }

        // Only the show strictly after the boundary counts as upcoming
        let summaries = db.venue_summaries(boundary).await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_upcoming_shows, 1);

        let count = db
            .upcoming_show_count_for_artist(artist.id, boundary)
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_venues_without_shows_still_appear() {
        let db = memory_db().await;

        db.create_venue(new_venue("The Dive", "Austin", "TX"))
            .await
            .unwrap();

        let summaries = db.venue_summaries(crate::now()).await.unwrap();

        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].num_upcoming_shows, 0);
    }
}
