use std::sync::Arc;

use pluckier_config::Config;
use pluckier_service::RacesService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<RacesService>,
}
impl AppState {
	pub fn new(config: Config) -> Self {
		Self { service: Arc::new(RacesService::new(config)) }
	}
}
