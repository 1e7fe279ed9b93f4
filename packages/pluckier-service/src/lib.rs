pub mod admin;
pub mod form;
pub mod lookup;
pub mod nap;
pub mod odds;
pub mod percentages;
pub mod rated;
pub mod snapshot;

use std::{future::Future, pin::Pin, sync::Arc};

pub use admin::RefreshReport;
use pluckier_config::{Config, Gcs};
pub use pluckier_domain::{NapFilter, WinStrategy};
use pluckier_providers::gcs;
pub use snapshot::Snapshot;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Raw object reads, kept behind a trait so tests can serve canned payloads
/// instead of touching the bucket.
pub trait BlobStore
where
	Self: Send + Sync,
{
	fn fetch<'a>(
		&'a self,
		cfg: &'a Gcs,
		key: &'a str,
	) -> BoxFuture<'a, pluckier_providers::Result<Vec<u8>>>;
}

struct DefaultStore;

impl BlobStore for DefaultStore {
	fn fetch<'a>(
		&'a self,
		cfg: &'a Gcs,
		key: &'a str,
	) -> BoxFuture<'a, pluckier_providers::Result<Vec<u8>>> {
		Box::pin(gcs::fetch(cfg, key))
	}
}

pub struct RacesService {
	pub cfg: Config,
	pub store: Arc<dyn BlobStore>,
	cache: snapshot::SnapshotCache,
}
impl RacesService {
	pub fn new(cfg: Config) -> Self {
		Self::with_store(cfg, Arc::new(DefaultStore))
	}

	pub fn with_store(cfg: Config, store: Arc<dyn BlobStore>) -> Self {
		Self { cfg, store, cache: snapshot::SnapshotCache::default() }
	}
}

pub(crate) fn race_not_found(time: &str, place: &str) -> String {
	format!("Could not find the race at {place} at {time}")
}
