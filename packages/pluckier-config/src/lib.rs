mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, Gcs, Security, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	for (label, bind) in [
		("service.http_bind", &cfg.service.http_bind),
		("service.mcp_bind", &cfg.service.mcp_bind),
		("service.admin_bind", &cfg.service.admin_bind),
	] {
		if bind.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	for (label, value) in [
		("storage.gcs.api_base", &cfg.storage.gcs.api_base),
		("storage.gcs.bucket", &cfg.storage.gcs.bucket),
		("storage.gcs.races_object", &cfg.storage.gcs.races_object),
		("storage.gcs.odds_object", &cfg.storage.gcs.odds_object),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.storage.gcs.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "storage.gcs.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !matches!(cfg.security.auth_mode.as_str(), "off" | "static_keys") {
		return Err(Error::Validation {
			message: "security.auth_mode must be one of off or static_keys.".to_string(),
		});
	}
	if cfg.security.auth_mode == "static_keys" && cfg.security.auth_token.is_none() {
		return Err(Error::Validation {
			message: "security.auth_token must be non-empty when security.auth_mode is static_keys."
				.to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	while cfg.storage.gcs.api_base.ends_with('/') {
		cfg.storage.gcs.api_base.pop();
	}

	if cfg.security.auth_token.as_deref().map(|token| token.trim().is_empty()).unwrap_or(false) {
		cfg.security.auth_token = None;
	}
}
