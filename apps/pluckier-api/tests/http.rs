use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};

use axum::{
	body::{self, Body},
	http::{Request, StatusCode},
	response::Response,
};
use serde_json::{Value, json};
use tower::util::ServiceExt;

use pluckier_api::{routes, state::AppState};
use pluckier_config::{Config, Gcs, Security, Service, Storage};
use pluckier_service::{BlobStore, BoxFuture, RacesService};
use pluckier_testkit::{sample_odds, sample_races};

struct MemoryStore {
	races: Vec<u8>,
	odds: Vec<u8>,
	fetches: AtomicUsize,
}
impl MemoryStore {
	fn new() -> Arc<Self> {
		Arc::new(Self {
			races: serde_json::to_vec(&sample_races()).expect("fixture must serialize"),
			odds: serde_json::to_vec(&sample_odds()).expect("fixture must serialize"),
			fetches: AtomicUsize::new(0),
		})
	}
}
impl BlobStore for MemoryStore {
	fn fetch<'a>(
		&'a self,
		cfg: &'a Gcs,
		key: &'a str,
	) -> BoxFuture<'a, pluckier_providers::Result<Vec<u8>>> {
		self.fetches.fetch_add(1, Ordering::SeqCst);

		let payload =
			if key == cfg.races_object { self.races.clone() } else { self.odds.clone() };

		Box::pin(async move { Ok(payload) })
	}
}

fn test_config() -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			mcp_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
		},
		storage: Storage {
			gcs: Gcs {
				api_base: "https://storage.googleapis.com".to_string(),
				bucket: "pluckier.appspot.com".to_string(),
				races_object: "sample_races.json".to_string(),
				odds_object: "sample_odds.json".to_string(),
				timeout_ms: 10_000,
			},
		},
		security: Security {
			bind_localhost_only: true,
			auth_mode: "off".to_string(),
			auth_token: None,
		},
	}
}

fn sample_state() -> (AppState, Arc<MemoryStore>) {
	let store = MemoryStore::new();
	let service = RacesService::with_store(test_config(), store.clone());

	(AppState { service: Arc::new(service) }, store)
}

async fn get(app: axum::Router, uri: &str) -> Response {
	app.oneshot(Request::builder().uri(uri).body(Body::empty()).expect("Failed to build request."))
		.await
		.expect("Failed to call route.")
}

async fn body_text(response: Response) -> String {
	let bytes = body::to_bytes(response.into_body(), usize::MAX)
		.await
		.expect("Failed to read response body.");

	String::from_utf8(bytes.to_vec()).expect("Body must be UTF-8.")
}

#[tokio::test]
async fn health_is_ok_on_both_routers() {
	let (state, _) = sample_state();
	let response = get(routes::router(state.clone()), "/health").await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_text(response).await, "ok");

	let response = get(routes::admin_router(state), "/health").await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn meetings_route_reports_the_card() {
	let (state, _) = sample_state();
	let response = get(routes::router(state), "/meetings").await;

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(body_text(response).await, "List of available meetings: Ascot, Deauville, Killarney");
}

#[tokio::test]
async fn race_query_params_reach_the_service() {
	let (state, _) = sample_state();
	let app = routes::router(state);
	let response = get(app.clone(), "/top-rated?time=14:30&place=Ascot").await;

	assert_eq!(
		body_text(response).await,
		"Horse with best last 3 run average rating for the 14:30 at Ascot is: Trigger with an average rating of 91.00"
	);

	let response = get(app.clone(), "/get-odds?time=14:30&place=Ascot").await;

	assert_eq!(
		body_text(response).await,
		"Odds for the 14:30 at Ascot: Dobbin 5/2, Trigger NR, OBriens Pride 11/4"
	);

	let response = get(app, "/race-win-percentages-from-last-one?time=14:30&place=Ascot").await;

	assert_eq!(
		body_text(response).await,
		"Win percentages (latest run) for the 14:30 at Ascot: Dobbin: 100.00%, Trigger: 0.00%, O'Brien's Pride: 0.00%"
	);
}

#[tokio::test]
async fn horse_name_param_is_camel_cased() {
	let (state, _) = sample_state();
	let app = routes::router(state);
	let response = get(app.clone(), "/find-horse-race?horseName=dobbin").await;

	assert_eq!(body_text(response).await, "dobbin is running in: 14:30 at Ascot");

	let response = get(app.clone(), "/past-run-dates?horseName=Trigger").await;

	assert_eq!(
		body_text(response).await,
		"Past race dates for Trigger: 18/08/2026, 10/08/2026, 02/08/2026"
	);

	let response = get(app, "/horse-form?time=14:30&place=Ascot&horseName=trigger").await;

	assert_eq!(
		body_text(response).await,
		"Form for trigger: Date: 10/08/2026, Rating: 95; Date: 02/08/2026, Rating: 87"
	);
}

#[tokio::test]
async fn missing_query_params_are_rejected() {
	let (state, _) = sample_state();
	let app = routes::router(state);
	let response = get(app.clone(), "/top-rated?time=14:30").await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let response = get(app, "/find-horse-race?horse_name=dobbin").await;

	assert_eq!(response.status(), StatusCode::BAD_REQUEST, "snake_case param must not match");
}

#[tokio::test]
async fn info_serves_the_merged_document() {
	let (state, _) = sample_state();
	let response = get(routes::router(state), "/info").await;
	let raw = body_text(response).await;
	let value: Value = serde_json::from_str(&raw).expect("Failed to parse response.");

	assert!(raw.contains('\n'), "info body must be pretty-printed");
	assert_eq!(value[0]["horses"][0]["odds"], json!("5/2"));
}

#[tokio::test]
async fn admin_refresh_drops_the_shared_snapshot() {
	let (state, store) = sample_state();
	let app = routes::router(state.clone());
	let admin_app = routes::admin_router(state);

	get(app.clone(), "/meetings").await;

	assert_eq!(store.fetches.load(Ordering::SeqCst), 2);

	let response = admin_app
		.oneshot(
			Request::builder()
				.method("POST")
				.uri("/v1/admin/refresh")
				.body(Body::empty())
				.expect("Failed to build request."),
		)
		.await
		.expect("Failed to call refresh.");

	assert_eq!(response.status(), StatusCode::OK);

	let report: Value =
		serde_json::from_str(&body_text(response).await).expect("Failed to parse response.");

	assert_eq!(report, json!({ "status": "refreshing" }));

	get(app, "/meetings").await;

	assert_eq!(store.fetches.load(Ordering::SeqCst), 4, "refresh must force a refetch");
}
