use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub security: Security,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub mcp_bind: String,
	pub admin_bind: String,
	pub log_level: String,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub gcs: Gcs,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Gcs {
	pub api_base: String,
	pub bucket: String,
	pub races_object: String,
	pub odds_object: String,
	pub timeout_ms: u64,
}

#[derive(Debug, Deserialize)]
pub struct Security {
	pub bind_localhost_only: bool,
	#[serde(default = "default_auth_mode")]
	pub auth_mode: String,
	pub auth_token: Option<String>,
}

fn default_auth_mode() -> String {
	"off".to_string()
}
