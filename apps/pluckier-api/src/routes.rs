use axum::{
	Json, Router,
	extract::{Query, State},
	routing::{get, post},
};
use serde::Deserialize;

use crate::state::AppState;
use pluckier_service::{NapFilter, RefreshReport, WinStrategy};

#[derive(Debug, Deserialize)]
struct RaceQuery {
	time: String,
	place: String,
}

#[derive(Debug, Deserialize)]
struct PlaceQuery {
	place: String,
}

#[derive(Debug, Deserialize)]
struct HorseQuery {
	#[serde(rename = "horseName")]
	horse_name: String,
}

#[derive(Debug, Deserialize)]
struct HorseFormQuery {
	time: String,
	place: String,
	#[serde(rename = "horseName")]
	horse_name: String,
}

pub fn router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/info", get(info))
		.route("/meetings", get(meetings))
		.route("/get-odds", get(get_odds))
		.route("/top-rated", get(top_rated))
		.route("/bottom-rated", get(bottom_rated))
		.route("/best-ever-rated", get(best_ever_rated))
		.route("/best-average-rated", get(best_average_rated))
		.route("/best-most-recent-rated", get(best_most_recent_rated))
		.route("/race-win-percentages-from-best-ever", get(win_percentages_from_best_ever))
		.route("/race-win-percentages-from-last-three", get(win_percentages_from_last_three))
		.route("/race-win-percentages-from-last-one", get(win_percentages_from_last_one))
		.route("/race-win-percentages-from-all", get(win_percentages_from_all))
		.route("/all-runners", get(all_runners))
		.route("/all-times", get(all_times))
		.route("/find-horse-race", get(find_horse_race))
		.route("/past-run-dates", get(past_run_dates))
		.route("/next-race", get(next_race))
		.route("/horse-form", get(horse_form))
		.route("/nap-of-the-day", get(nap_of_the_day))
		.route("/nap-of-the-day-handicap", get(handicap_nap_of_the_day))
		.route("/nap-of-the-day-uk-handicap", get(uk_handicap_nap_of_the_day))
		.with_state(state)
}

pub fn admin_router(state: AppState) -> Router {
	Router::new()
		.route("/health", get(health))
		.route("/v1/admin/refresh", post(refresh))
		.with_state(state)
}

async fn health() -> &'static str {
	"ok"
}

async fn info(State(state): State<AppState>) -> String {
	tracing::info!("REST request for the raw race data.");

	state.service.raw_race_data().await
}

async fn meetings(State(state): State<AppState>) -> String {
	tracing::info!("REST request for all the meetings.");

	state.service.meetings().await
}

async fn get_odds(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for all the odds.");

	state.service.odds_for_race(&time, &place).await
}

async fn top_rated(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for top rated horse.");

	state.service.top_rated(&time, &place).await
}

async fn bottom_rated(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for bottom rated horse.");

	state.service.bottom_rated(&time, &place).await
}

async fn best_ever_rated(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for best ever rated horse.");

	state.service.best_ever_rated(&time, &place).await
}

async fn best_average_rated(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for best average rated horse.");

	state.service.best_average_rated(&time, &place).await
}

async fn best_most_recent_rated(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for best most recent rated horse.");

	state.service.best_most_recent_rated(&time, &place).await
}

async fn win_percentages_from_best_ever(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for win percentages from best ever.");

	state.service.win_percentages(WinStrategy::BestEver, &time, &place).await
}

async fn win_percentages_from_last_three(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for win percentages from last three.");

	state.service.win_percentages(WinStrategy::LastThree, &time, &place).await
}

async fn win_percentages_from_last_one(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for win percentages from last one.");

	state.service.win_percentages(WinStrategy::LastOne, &time, &place).await
}

async fn win_percentages_from_all(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for win percentages from all runs.");

	state.service.win_percentages(WinStrategy::AllRuns, &time, &place).await
}

async fn all_runners(
	State(state): State<AppState>,
	Query(RaceQuery { time, place }): Query<RaceQuery>,
) -> String {
	tracing::info!(%time, %place, "REST request for all runners.");

	state.service.all_runners(&time, &place).await
}

async fn all_times(
	State(state): State<AppState>,
	Query(PlaceQuery { place }): Query<PlaceQuery>,
) -> String {
	tracing::info!(%place, "REST request for all times.");

	state.service.all_times(&place).await
}

async fn find_horse_race(
	State(state): State<AppState>,
	Query(HorseQuery { horse_name }): Query<HorseQuery>,
) -> String {
	tracing::info!(%horse_name, "REST request to find race for horse.");

	state.service.find_horse_race(&horse_name).await
}

async fn past_run_dates(
	State(state): State<AppState>,
	Query(HorseQuery { horse_name }): Query<HorseQuery>,
) -> String {
	tracing::info!(%horse_name, "REST request for past run dates.");

	state.service.past_run_dates(&horse_name).await
}

async fn next_race(State(state): State<AppState>) -> String {
	tracing::info!("REST request for the next race.");

	state.service.next_race().await
}

async fn horse_form(
	State(state): State<AppState>,
	Query(HorseFormQuery { time, place, horse_name }): Query<HorseFormQuery>,
) -> String {
	tracing::info!(%horse_name, %time, %place, "REST request for horse form.");

	state.service.horse_form(&time, &place, &horse_name).await
}

async fn nap_of_the_day(State(state): State<AppState>) -> String {
	tracing::info!("REST request for the nap of the day.");

	state.service.nap_of_the_day(NapFilter::AllRaces).await
}

async fn handicap_nap_of_the_day(State(state): State<AppState>) -> String {
	tracing::info!("REST request for the handicap nap of the day.");

	state.service.nap_of_the_day(NapFilter::Handicap).await
}

async fn uk_handicap_nap_of_the_day(State(state): State<AppState>) -> String {
	tracing::info!("REST request for the UK handicap nap of the day.");

	state.service.nap_of_the_day(NapFilter::UkHandicap).await
}

async fn refresh(State(state): State<AppState>) -> Json<RefreshReport> {
	tracing::info!("Admin request to refresh the snapshot.");

	Json(state.service.refresh().await)
}
