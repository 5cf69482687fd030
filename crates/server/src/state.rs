use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmPrincipalRepository;
use service::auth::AuthService;
use service::storage::ObjectStore;
use service::suggest::SuggestionCache;

/// Shared application state; everything here is cheap to clone.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmPrincipalRepository>>,
    pub suggestions: Arc<SuggestionCache>,
    pub store: Arc<dyn ObjectStore>,
}
