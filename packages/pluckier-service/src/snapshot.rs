use std::sync::Arc;

use serde_json::{Value, json};
use tokio::sync::{Mutex, RwLock};

use crate::RacesService;
use pluckier_config::Gcs;
use pluckier_domain::{OddsDocument, RaceDocument, merge_odds};
use pluckier_providers::Error as StorageError;

/// One day's fetched-and-merged view of the bucket.
pub struct Snapshot {
	pub races: RaceDocument,
	pub odds: OddsDocument,
	pub raw: Value,
}
impl Snapshot {
	/// Folds the prices into the races payload, then decodes both documents.
	pub fn from_documents(mut races: Value, odds: Value) -> Self {
		merge_odds(&mut races, &odds);

		Self { races: RaceDocument::decode(&races), odds: OddsDocument::decode(&odds), raw: races }
	}
}

/// Holds the current snapshot. `fill` serializes rebuilds so concurrent cold
/// callers trigger one fetch pair, not one each.
#[derive(Default)]
pub(crate) struct SnapshotCache {
	slot: RwLock<Option<Arc<Snapshot>>>,
	fill: Mutex<()>,
}
impl SnapshotCache {
	async fn current(&self) -> Option<Arc<Snapshot>> {
		self.slot.read().await.clone()
	}

	async fn install(&self, snapshot: Arc<Snapshot>) {
		*self.slot.write().await = Some(snapshot);
	}

	pub(crate) async fn invalidate(&self) {
		*self.slot.write().await = None;
	}
}

impl RacesService {
	/// Returns the day's snapshot, fetching it on first use. The queries all
	/// read through here, so one download serves every question until the
	/// cache is refreshed.
	pub async fn snapshot(&self) -> Arc<Snapshot> {
		if let Some(snapshot) = self.cache.current().await {
			return snapshot;
		}

		let _fill = self.cache.fill.lock().await;

		if let Some(snapshot) = self.cache.current().await {
			return snapshot;
		}

		let snapshot = Arc::new(self.build_snapshot().await);

		self.cache.install(snapshot.clone()).await;

		snapshot
	}

	/// The merged race data as pretty-printed JSON, exactly as the queries
	/// see it.
	pub async fn raw_race_data(&self) -> String {
		let snapshot = self.snapshot().await;

		serde_json::to_string_pretty(&snapshot.raw).unwrap_or_else(|_| snapshot.raw.to_string())
	}

	async fn build_snapshot(&self) -> Snapshot {
		let gcs = &self.cfg.storage.gcs;

		tracing::info!(bucket = %gcs.bucket, "Building race data snapshot.");

		let races = self.fetch_document(gcs, &gcs.races_object).await;
		let odds = self.fetch_document(gcs, &gcs.odds_object).await;

		Snapshot::from_documents(races, odds)
	}

	/// Fetch or parse failures produce the sentinel object the decoders
	/// already treat as an unavailable document.
	async fn fetch_document(&self, gcs: &Gcs, key: &str) -> Value {
		let payload = match self.store.fetch(gcs, key).await {
			Ok(payload) => payload,
			Err(err) => {
				tracing::warn!(bucket = %gcs.bucket, key = %key, error = %err, "Storage fetch failed.");

				return sentinel_document(&gcs.bucket, &err);
			},
		};

		match serde_json::from_slice(&payload) {
			Ok(value) => value,
			Err(err) => {
				tracing::warn!(key = %key, error = %err, "Object is not valid JSON.");

				json!({ "error": format!("Invalid JSON in object '{key}'") })
			},
		}
	}
}

fn sentinel_document(bucket: &str, err: &StorageError) -> Value {
	let message = match err {
		StorageError::NotFound { .. } => format!("File not found in bucket '{bucket}'"),
		err => format!("Error reading from storage: {err}"),
	};

	json!({ "error": message })
}
