use std::{net::SocketAddr, sync::Arc};

use axum::{
	Router,
	body::Body,
	extract::State,
	http::{HeaderMap, Request},
	middleware::{self, Next},
	response::IntoResponse,
};
use color_eyre::Result;
use reqwest::{Client, RequestBuilder};
use rmcp::{
	ErrorData, ServerHandler,
	handler::server::router::tool::ToolRouter,
	model::{CallToolResult, Content, JsonObject, ServerCapabilities, ServerInfo},
	transport::streamable_http_server::{
		StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
	},
};
use serde_json::Value;
use tokio::net::TcpListener;

use crate::McpAuthState;

const HEADER_AUTHORIZATION: &str = "Authorization";

#[derive(Clone)]
struct PluckierMcp {
	api_base: String,
	client: Client,
	auth_state: McpAuthState,
	tool_router: ToolRouter<Self>,
}
impl PluckierMcp {
	fn new(api_base: String, auth_state: McpAuthState) -> Self {
		Self { api_base, client: Client::new(), auth_state, tool_router: Self::tool_router() }
	}

	fn apply_auth_header(&self, builder: RequestBuilder) -> RequestBuilder {
		match &self.auth_state {
			McpAuthState::Off => builder,
			McpAuthState::StaticKeys { bearer_token } =>
				builder.header(HEADER_AUTHORIZATION, format!("Bearer {bearer_token}")),
		}
	}

	async fn forward_get(
		&self,
		path: &str,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		let url = format!("{}{}", self.api_base, path);
		let query = params_to_query(params);

		tracing::info!(%path, ?query, "Forwarding tool call to the races API.");

		let response = self
			.apply_auth_header(self.client.get(url).query(&query))
			.send()
			.await
			.map_err(|err| {
				ErrorData::internal_error(format!("Pluckier API request failed: {err}"), None)
			})?;

		handle_response(response).await
	}
}

#[rmcp::tool_router]
impl PluckierMcp {
	#[rmcp::tool(
		name = "get_meetings",
		description = "Retrieve all unique meeting place names from the race data.",
		input_schema = no_arguments_schema()
	)]
	async fn get_meetings(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/meetings", params).await
	}

	#[rmcp::tool(
		name = "get_odds",
		description = "Get the current odds for all the runners in a particular race, identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_odds(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/get-odds", params).await
	}

	#[rmcp::tool(
		name = "get_top_rated",
		description = "Get the horse with the best average rating over last 3 runs for a particular race, identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_top_rated(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/top-rated", params).await
	}

	#[rmcp::tool(
		name = "get_bottom_rated",
		description = "Get the horse with the worst average rating over last 3 runs (the fiddle) for a particular race, identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_bottom_rated(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/bottom-rated", params).await
	}

	#[rmcp::tool(
		name = "get_best_ever_rated",
		description = "Get the best rated horse for a particular race, identified by its time and place. This is the highest single rating from any past race.",
		input_schema = race_query_schema()
	)]
	async fn get_best_ever_rated(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/best-ever-rated", params).await
	}

	#[rmcp::tool(
		name = "get_best_average_rated",
		description = "Get the horse with the best average rating for a particular race, identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_best_average_rated(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/best-average-rated", params).await
	}

	#[rmcp::tool(
		name = "get_best_most_recent_rated",
		description = "Get the horse with the highest rating from its most recent race, for a particular race identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_best_most_recent_rated(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/best-most-recent-rated", params).await
	}

	#[rmcp::tool(
		name = "get_race_win_percentages_from_best_ever",
		description = "Calculates the win percentage for each horse in a race based on their best-ever rating.",
		input_schema = race_query_schema()
	)]
	async fn get_race_win_percentages_from_best_ever(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/race-win-percentages-from-best-ever", params).await
	}

	#[rmcp::tool(
		name = "get_race_win_percentages_from_last_three",
		description = "Calculates the win percentage for each horse in a race based on their average rating over the last 3 runs.",
		input_schema = race_query_schema()
	)]
	async fn get_race_win_percentages_from_last_three(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/race-win-percentages-from-last-three", params).await
	}

	#[rmcp::tool(
		name = "get_race_win_percentages_from_last_one",
		description = "Calculates the win percentage for each horse in a race based on their latest run rating.",
		input_schema = race_query_schema()
	)]
	async fn get_race_win_percentages_from_last_one(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/race-win-percentages-from-last-one", params).await
	}

	#[rmcp::tool(
		name = "get_race_win_percentages_from_all",
		description = "Calculates the win percentage for each horse in a race based on their average rating over all past runs.",
		input_schema = race_query_schema()
	)]
	async fn get_race_win_percentages_from_all(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/race-win-percentages-from-all", params).await
	}

	#[rmcp::tool(
		name = "get_all_runners",
		description = "Get all the runners for a particular race, identified by its time and place.",
		input_schema = race_query_schema()
	)]
	async fn get_all_runners(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/all-runners", params).await
	}

	#[rmcp::tool(
		name = "get_all_times",
		description = "Get all the race times for a given meeting place.",
		input_schema = meeting_query_schema()
	)]
	async fn get_all_times(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/all-times", params).await
	}

	#[rmcp::tool(
		name = "find_horse_race",
		description = "Finds the race time and meeting for a given horse name.",
		input_schema = horse_query_schema()
	)]
	async fn find_horse_race(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/find-horse-race", params).await
	}

	#[rmcp::tool(
		name = "get_past_run_dates",
		description = "Get all the past race dates for a given horse name.",
		input_schema = horse_query_schema()
	)]
	async fn get_past_run_dates(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/past-run-dates", params).await
	}

	#[rmcp::tool(
		name = "get_next_race",
		description = "Reports the next race time and meeting based on the current system time.",
		input_schema = no_arguments_schema()
	)]
	async fn get_next_race(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/next-race", params).await
	}

	#[rmcp::tool(
		name = "get_horse_form",
		description = "Get the recent form (past race dates and ratings) for a specific horse in a particular race.",
		input_schema = horse_form_schema()
	)]
	async fn get_horse_form(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/horse-form", params).await
	}

	#[rmcp::tool(
		name = "get_nap_of_the_day",
		description = "Find the best bet of the day across all races, based on the highest average rating over the last 3 runs.",
		input_schema = no_arguments_schema()
	)]
	async fn get_nap_of_the_day(&self, params: JsonObject) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/nap-of-the-day", params).await
	}

	#[rmcp::tool(
		name = "get_handicap_nap_of_the_day",
		description = "Find the best bet of the day from handicap races only, based on the highest average rating over the last 3 runs.",
		input_schema = no_arguments_schema()
	)]
	async fn get_handicap_nap_of_the_day(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/nap-of-the-day-handicap", params).await
	}

	#[rmcp::tool(
		name = "get_uk_handicap_nap_of_the_day",
		description = "Find the best bet of the day from UK handicap races only, based on the highest average rating over the last 3 runs.",
		input_schema = no_arguments_schema()
	)]
	async fn get_uk_handicap_nap_of_the_day(
		&self,
		params: JsonObject,
	) -> Result<CallToolResult, ErrorData> {
		self.forward_get("/nap-of-the-day-uk-handicap", params).await
	}
}

#[rmcp::tool_handler]
impl ServerHandler for PluckierMcp {
	fn get_info(&self) -> ServerInfo {
		ServerInfo {
			instructions: Some(
				"Pluckier MCP adapter that forwards tool calls to the Pluckier HTTP API."
					.to_string(),
			),
			capabilities: ServerCapabilities::builder().enable_tools().build(),
			..Default::default()
		}
	}
}

pub async fn serve_mcp(bind_addr: &str, api_base: &str, auth_state: McpAuthState) -> Result<()> {
	let bind_addr: SocketAddr = bind_addr.parse()?;
	let api_base = normalize_api_base(api_base);
	let middleware_auth_state = auth_state.clone();
	let client_auth_state = auth_state.clone();
	let session_manager: Arc<LocalSessionManager> = Default::default();
	let service = StreamableHttpService::new(
		move || Ok(PluckierMcp::new(api_base.clone(), client_auth_state.clone())),
		session_manager,
		StreamableHttpServerConfig::default(),
	);
	let router = Router::new()
		.fallback_service(service)
		.layer(middleware::from_fn_with_state(middleware_auth_state, mcp_auth_middleware));
	let listener = TcpListener::bind(bind_addr).await?;

	tracing::info!(%bind_addr, "MCP server listening.");

	axum::serve(listener, router).await?;

	Ok(())
}

fn is_authorized(headers: &HeaderMap, auth_state: &McpAuthState) -> bool {
	match auth_state {
		McpAuthState::Off => true,
		McpAuthState::StaticKeys { bearer_token } =>
			read_bearer_token(headers).is_some_and(|token| token == bearer_token),
	}
}

fn read_bearer_token(headers: &HeaderMap) -> Option<&str> {
	let raw = headers.get(HEADER_AUTHORIZATION)?;
	let value = raw.to_str().ok()?.trim();
	let token = value.strip_prefix("Bearer ")?.trim();

	if token.is_empty() { None } else { Some(token) }
}

fn normalize_api_base(raw: &str) -> String {
	let trimmed = raw.trim().trim_end_matches('/');
	let (scheme, rest) = if let Some(value) = trimmed.strip_prefix("http://") {
		("http://", value)
	} else if let Some(value) = trimmed.strip_prefix("https://") {
		("https://", value)
	} else {
		("http://", trimmed)
	};
	// pluckier-mcp runs on the same host as pluckier-api. If pluckier-api binds to a wildcard
	// address, use loopback for forwarding.
	let rest = if let Some(value) = rest.strip_prefix("0.0.0.0:") {
		format!("127.0.0.1:{value}")
	} else if let Some(value) = rest.strip_prefix("[::]:") {
		format!("127.0.0.1:{value}")
	} else {
		rest.to_string()
	};

	format!("{scheme}{rest}")
}

fn params_to_query(params: JsonObject) -> Vec<(String, String)> {
	params
		.into_iter()
		.filter_map(|(key, value)| match value {
			Value::Null => None,
			Value::String(text) => Some((key, text)),
			other => Some((key, other.to_string())),
		})
		.collect()
}

fn no_arguments_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"properties": {}
	}))
}

fn race_query_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["time", "place"],
		"properties": {
			"time": { "type": "string" },
			"place": { "type": "string" }
		}
	}))
}

fn meeting_query_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["place"],
		"properties": {
			"place": { "type": "string" }
		}
	}))
}

fn horse_query_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["horseName"],
		"properties": {
			"horseName": { "type": "string" }
		}
	}))
}

fn horse_form_schema() -> Arc<JsonObject> {
	Arc::new(rmcp::object!({
		"type": "object",
		"additionalProperties": true,
		"required": ["time", "place", "horseName"],
		"properties": {
			"time": { "type": "string" },
			"place": { "type": "string" },
			"horseName": { "type": "string" }
		}
	}))
}

async fn handle_response(response: reqwest::Response) -> Result<CallToolResult, ErrorData> {
	let status = response.status();
	let body = response
		.text()
		.await
		.map_err(|err| ErrorData::internal_error(format!("Pluckier API response error: {err}"), None))?;

	if status.is_success() {
		Ok(CallToolResult::success(vec![Content::text(body)]))
	} else {
		Ok(CallToolResult::error(vec![Content::text(body)]))
	}
}

async fn mcp_auth_middleware(
	State(auth_state): State<McpAuthState>,
	req: Request<Body>,
	next: Next,
) -> axum::response::Response {
	if !is_authorized(req.headers(), &auth_state) {
		return (
			axum::http::StatusCode::UNAUTHORIZED,
			"Authentication required for security.auth_mode=static_keys with a Bearer token.",
		)
			.into_response();
	}

	next.run(req).await
}
