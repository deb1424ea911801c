use std::sync::Arc;

use crate::feed::FeedClient;
use crate::settings::Settings;

// Application state shared by all handlers; read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: FeedClient,
}
