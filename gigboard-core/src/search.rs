use std::sync::Arc;

use crate::{now, Database, DatabaseError, PrimaryKey};

/// The search layer. Matching is case-insensitive substring containment on
/// the name field, so an empty term matches every row.
pub struct Search<Db> {
    db: Arc<Db>,
}

#[derive(Debug)]
pub struct SearchResults {
    pub count: usize,
    pub data: Vec<SearchMatch>,
}

#[derive(Debug)]
pub struct SearchMatch {
    pub id: PrimaryKey,
    pub name: String,
    pub num_upcoming_shows: i64,
}

impl<Db> Search<Db>
where
    Db: Database,
{
    pub fn new(db: &Arc<Db>) -> Self {
        Self { db: db.clone() }
    }

    pub async fn venues(&self, term: &str) -> Result<SearchResults, DatabaseError> {
        let matches = self.db.search_venues(term, now()).await?;

        let data: Vec<_> = matches
            .into_iter()
            .map(|venue| SearchMatch {
                id: venue.id,
                name: venue.name,
                num_upcoming_shows: venue.num_upcoming_shows,
            })
            .collect();

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }

    pub async fn artists(&self, term: &str) -> Result<SearchResults, DatabaseError> {
        let evaluated_at = now();
        let matches = self.db.search_artists(term).await?;

        let mut data = Vec::with_capacity(matches.len());

        for artist in matches {
            let num_upcoming_shows = self
                .db
                .upcoming_show_count_for_artist(artist.id, evaluated_at)
                .await?;

            data.push(SearchMatch {
                id: artist.id,
                name: artist.name,
                num_upcoming_shows,
            });
        }

        Ok(SearchResults {
            count: data.len(),
            data,
        })
    }
}
