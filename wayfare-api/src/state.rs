use std::sync::Arc;

use wayfare_core::repository::{CatalogRepository, UserRepository};
use wayfare_store::app_config::AdminConfig;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub admin: AdminConfig,
}
