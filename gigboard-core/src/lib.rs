mod db;
mod genres;
mod listings;
mod mutations;
mod search;
mod time;

use std::sync::Arc;

pub use db::*;
pub use genres::*;
pub use listings::*;
pub use mutations::*;
pub use search::*;
pub use time::*;

/// The gigboard system, turning persisted venue, artist, and show rows into
/// page view-models and applying the transactional mutation flows.
pub struct Gigboard<Db> {
    pub listings: Listings<Db>,
    pub search: Search<Db>,
    pub mutations: Mutations<Db>,
}

impl<Db> Gigboard<Db>
where
    Db: Database,
{
    pub fn new(database: Db) -> Self {
        let database = Arc::new(database);

        Self {
            listings: Listings::new(&database),
            search: Search::new(&database),
            mutations: Mutations::new(&database),
        }
    }
}
