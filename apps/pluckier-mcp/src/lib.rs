pub mod server;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use pluckier_config::Security;

#[derive(Debug, Parser)]
#[command(
	version = pluckier_cli::VERSION,
	rename_all = "kebab",
	styles = pluckier_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum McpAuthState {
	Off,
	StaticKeys { bearer_token: String },
}

pub async fn run(args: Args) -> Result<()> {
	let config = pluckier_config::load(&args.config)?;
	init_tracing(&config)?;
	let auth_state = build_auth_state(&config.security, &config.service.mcp_bind)?;

	server::serve_mcp(&config.service.mcp_bind, &config.service.http_bind, auth_state).await
}

fn build_auth_state(security: &Security, mcp_bind: &str) -> Result<McpAuthState> {
	match security.auth_mode.trim() {
		"off" => {
			enforce_loopback_for_off_mode(mcp_bind)?;

			Ok(McpAuthState::Off)
		},
		"static_keys" => select_static_key(security),
		other => Err(eyre::eyre!(
			"security.auth_mode must be one of off or static_keys for pluckier-mcp, got {other}."
		)),
	}
}

fn enforce_loopback_for_off_mode(mcp_bind: &str) -> Result<()> {
	let bind_addr: SocketAddr = mcp_bind.parse().map_err(|err| {
		eyre::eyre!(
			"service.mcp_bind must be a valid socket address when security.auth_mode=off: {err}"
		)
	})?;

	if !bind_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"service.mcp_bind must be a loopback address when security.auth_mode=off."
		));
	}

	Ok(())
}

fn select_static_key(security: &Security) -> Result<McpAuthState> {
	match security.auth_token.as_deref().map(str::trim) {
		Some(token) if !token.is_empty() =>
			Ok(McpAuthState::StaticKeys { bearer_token: token.to_string() }),
		_ => Err(eyre::eyre!(
			"security.auth_token must be non-empty when security.auth_mode=static_keys for pluckier-mcp."
		)),
	}
}

fn init_tracing(config: &pluckier_config::Config) -> Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_env_filter(filter).init();
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::{McpAuthState, build_auth_state};
	use pluckier_config::Security;

	fn sample_security(auth_mode: &str, auth_token: Option<&str>) -> Security {
		Security {
			bind_localhost_only: true,
			auth_mode: auth_mode.to_string(),
			auth_token: auth_token.map(str::to_string),
		}
	}

	#[test]
	fn off_mode_requires_loopback_mcp_bind() {
		let security = sample_security("off", None);
		let err = build_auth_state(&security, "0.0.0.0:8082").expect_err("expected error");

		assert!(err.to_string().contains("security.auth_mode=off"), "unexpected error: {err}");
	}

	#[test]
	fn off_mode_accepts_a_loopback_mcp_bind() {
		let security = sample_security("off", None);
		let auth_state = build_auth_state(&security, "127.0.0.1:8082").expect("auth state");

		assert_eq!(auth_state, McpAuthState::Off);
	}

	#[test]
	fn static_keys_mode_uses_the_configured_token() {
		let security = sample_security("static_keys", Some("token-1"));
		let auth_state = build_auth_state(&security, "127.0.0.1:8082").expect("auth state");

		assert_eq!(auth_state, McpAuthState::StaticKeys { bearer_token: "token-1".to_string() });
	}

	#[test]
	fn static_keys_mode_requires_a_token() {
		let security = sample_security("static_keys", None);
		let err = build_auth_state(&security, "127.0.0.1:8082").expect_err("expected error");

		assert!(err.to_string().contains("security.auth_token"), "unexpected error: {err}");
	}

	#[test]
	fn unknown_auth_modes_are_rejected() {
		let security = sample_security("bearer", None);
		let err = build_auth_state(&security, "127.0.0.1:8082").expect_err("expected error");

		assert!(err.to_string().contains("off or static_keys"), "unexpected error: {err}");
	}
}
