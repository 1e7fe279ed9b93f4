use serde::{Deserialize, Serialize};

use crate::RacesService;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RefreshReport {
	pub status: String,
}

impl RacesService {
	/// Drops the cached snapshot. The next query fetches fresh documents.
	pub async fn refresh(&self) -> RefreshReport {
		self.cache.invalidate().await;

		tracing::info!("Snapshot cache invalidated.");

		RefreshReport { status: "refreshing".to_string() }
	}
}
