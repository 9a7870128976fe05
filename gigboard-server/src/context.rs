use std::sync::Arc;

use gigboard_core::{Gigboard, SqliteDatabase};

/// The running gigboard instance, as shared with every handler
pub type App = Gigboard<SqliteDatabase>;

#[derive(Clone)]
pub struct ServerContext {
    pub app: Arc<App>,
}
