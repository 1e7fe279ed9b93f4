pub mod gcs;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Object {key:?} was not found in bucket {bucket:?}.")]
	NotFound { bucket: String, key: String },
	#[error("Storage responded with status {status} for object {key:?}.")]
	Status { status: reqwest::StatusCode, key: String },
	#[error("Storage request failed: {0}")]
	Transport(#[from] reqwest::Error),
}
