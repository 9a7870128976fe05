use std::sync::Arc;

use thiserror::Error;

use crate::{
    parse_start_time, ArtistData, Database, DatabaseError, NewArtist, NewShow, NewVenue,
    PrimaryKey, ShowData, UpdatedArtist, UpdatedVenue, VenueData,
};

/// The mutation layer. Every operation is a single-shot transaction that
/// commits on success and rolls back on any failure.
pub struct Mutations<Db> {
    db: Arc<Db>,
}

#[derive(Debug, Error)]
pub enum MutationError {
    /// The submitted start time doesn't parse as `YYYY-MM-DD HH:MM:SS`
    #[error("\"{value}\" is not a valid start time")]
    InvalidTimestamp { value: String },
    /// Something else went wrong with the database
    #[error(transparent)]
    Db(DatabaseError),
}

/// A show submission as it comes off the form, before the start time is parsed
#[derive(Debug)]
pub struct ShowSubmission {
    pub artist_id: PrimaryKey,
    pub venue_id: PrimaryKey,
    pub start_time: String,
}

impl<Db> Mutations<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    pub async fn create_venue(&self, new_venue: NewVenue) -> Result<VenueData, MutationError> {
        self.db.create_venue(new_venue).await.map_err(MutationError::Db)
    }

    /// Updates a venue. Every submitted field is applied, last writer wins.
    pub async fn update_venue(
        &self,
        updated_venue: UpdatedVenue,
    ) -> Result<VenueData, MutationError> {
        self.db
            .update_venue(updated_venue)
            .await
            .map_err(MutationError::Db)
    }

    /// Deletes a venue, refusing if shows still reference it
    pub async fn delete_venue(&self, venue_id: PrimaryKey) -> Result<(), MutationError> {
        self.db.delete_venue(venue_id).await.map_err(MutationError::Db)
    }

    pub async fn create_artist(&self, new_artist: NewArtist) -> Result<ArtistData, MutationError> {
        self.db
            .create_artist(new_artist)
            .await
            .map_err(MutationError::Db)
    }

    /// Updates an artist. Every submitted field is applied, last writer wins.
    pub async fn update_artist(
        &self,
        updated_artist: UpdatedArtist,
    ) -> Result<ArtistData, MutationError> {
        self.db
            .update_artist(updated_artist)
            .await
            .map_err(MutationError::Db)
    }

    /// Parses the submitted start time and creates the show. A parse failure
    /// and an invalid reference both fail the submission the same way.
    pub async fn create_show(&self, submission: ShowSubmission) -> Result<ShowData, MutationError> {
        let start_time = parse_start_time(&submission.start_time).map_err(|_| {
            MutationError::InvalidTimestamp {
                value: submission.start_time.clone(),
            }
        })?;

        self.db
            .create_show(NewShow {
                artist_id: submission.artist_id,
                venue_id: submission.venue_id,
                start_time,
            })
            .await
            .map_err(MutationError::Db)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::SqliteDatabase;

    async fn memory_db() -> Arc<SqliteDatabase> {
        Arc::new(
            SqliteDatabase::new("sqlite::memory:")
                .await
                .expect("database initializes"),
        )
    }

    fn new_venue(name: &str) -> NewVenue {
        NewVenue {
            name: name.to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
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
            seeking_venue: true,
            seeking_description: None,
        }
    }

    #[tokio::test]
    async fn test_create_artist_scenario() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        let artist = mutations.create_artist(new_artist("Alice")).await.unwrap();

        assert_eq!(artist.name, "Alice");
        assert_eq!(artist.city, "Austin");
        assert_eq!(artist.state, "TX");
        assert_eq!(artist.phone, "555-0100");
        assert_eq!(artist.genres, vec!["Jazz".to_string()]);
        assert!(artist.seeking_venue);
    }

    #[tokio::test]
    async fn test_create_show_rejects_malformed_start_time() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        let result = mutations
            .create_show(ShowSubmission {
                artist_id: 1,
                venue_id: 1,
                start_time: "next friday".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(MutationError::InvalidTimestamp { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_show_rejects_unknown_references() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        let result = mutations
            .create_show(ShowSubmission {
                artist_id: 42,
                venue_id: 42,
                start_time: "2099-01-01 20:00:00".to_string(),
            })
            .await;

        assert!(matches!(
            result,
            Err(MutationError::Db(DatabaseError::InvalidReference { .. }))
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_venue_is_not_found() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        mutations.create_venue(new_venue("The Dive")).await.unwrap();

        let result = mutations.delete_venue(999).await;
        assert!(matches!(
            result,
            Err(MutationError::Db(DatabaseError::NotFound { .. }))
        ));

        // Row count is unchanged
        let remaining = db.venue_summaries(crate::now()).await.unwrap();
        assert_eq!(remaining.len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_edits_last_writer_wins() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        let artist = mutations.create_artist(new_artist("Alice")).await.unwrap();

        let update = |name: &str, phone: &str| UpdatedArtist {
            id: artist.id,
            name: name.to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            phone: phone.to_string(),
            genres: vec!["Jazz".to_string()],
            image_link: None,
            facebook_link: None,
            website_link: None,
            seeking_venue: false,
            seeking_description: None,
        };

        mutations.update_artist(update("Alice A.", "555-0101")).await.unwrap();
        mutations.update_artist(update("Alice B.", "555-0102")).await.unwrap();

        let fetched = db.artist_by_id(artist.id).await.unwrap();
        assert_eq!(fetched.name, "Alice B.");
        assert_eq!(fetched.phone, "555-0102");
        // Fields the update left out are cleared, not preserved
        assert!(fetched.image_link.is_none());
        assert!(!fetched.seeking_venue);
    }

    #[tokio::test]
    async fn test_update_unknown_venue_is_not_found() {
        let db = memory_db().await;
        let mutations = Mutations::new(&db);

        let result = mutations
            .update_venue(UpdatedVenue {
                id: 999,
                name: "Ghost".to_string(),
                city: "Austin".to_string(),
                state: "TX".to_string(),
                address: "Nowhere".to_string(),
                phone: "555-0100".to_string(),
                image_link: None,
                facebook_link: None,
                website_link: None,
                seeking_talent: false,
                seeking_description: None,
            })
            .await;

        assert!(matches!(
            result,
            Err(MutationError::Db(DatabaseError::NotFound { .. }))
        ));
    }
}
