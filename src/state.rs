use std::sync::Arc;

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    gateway::Gateway,
    storage::ObjectStore,
};

/// Shared handler state. The ORM connection sits behind an `Arc` because
/// `DatabaseConnection` is not `Clone` when sea-orm's `mock` feature is on.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: Arc<OrmConn>,
    pub gateway: Gateway,
    pub storage: ObjectStore,
    pub config: Arc<AppConfig>,
}
