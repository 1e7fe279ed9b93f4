use std::time::Duration;

use reqwest::{Client, StatusCode};

use pluckier_config::Gcs;

use crate::{Error, Result};

/// Fetches one object through the bucket's public media endpoint.
pub async fn fetch(cfg: &Gcs, key: &str) -> Result<Vec<u8>> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let res = client.get(object_url(cfg, key)).send().await?;

	match res.status() {
		StatusCode::NOT_FOUND =>
			Err(Error::NotFound { bucket: cfg.bucket.clone(), key: key.to_string() }),
		status if !status.is_success() => Err(Error::Status { status, key: key.to_string() }),
		_ => Ok(res.bytes().await?.to_vec()),
	}
}

pub fn object_url(cfg: &Gcs, key: &str) -> String {
	format!("{}/{}/{}", cfg.api_base, cfg.bucket, key)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_gcs() -> Gcs {
		Gcs {
			api_base: "https://storage.googleapis.com".to_string(),
			bucket: "pluckier.appspot.com".to_string(),
			races_object: "sample_races.json".to_string(),
			odds_object: "sample_odds.json".to_string(),
			timeout_ms: 10_000,
		}
	}

	#[test]
	fn object_urls_join_base_bucket_and_key() {
		let url = object_url(&sample_gcs(), "sample_races.json");

		assert_eq!(url, "https://storage.googleapis.com/pluckier.appspot.com/sample_races.json");
	}

	#[test]
	fn not_found_errors_name_the_bucket() {
		let err = Error::NotFound {
			bucket: "pluckier.appspot.com".to_string(),
			key: "sample_races.json".to_string(),
		};

		assert_eq!(
			err.to_string(),
			"Object \"sample_races.json\" was not found in bucket \"pluckier.appspot.com\"."
		);
	}
}
