use crate::{RacesService, race_not_found};
use pluckier_domain::{average_rating, find_race, most_recent_rating};

impl RacesService {
	/// Highest single past rating from any horse in the race.
	pub async fn best_ever_rated(&self, time: &str, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};

		let mut top: Option<(&str, i64)> = None;

		for horse in &race.horses {
			for rating in horse.past.iter().filter_map(|entry| entry.rating) {
				if top.map(|(_, best)| rating > best).unwrap_or(true) {
					top = Some((&horse.name, rating));
				}
			}
		}

		match top {
			Some((name, rating)) =>
				format!("Top Rated for the {time} at {place} is: {name} with a rating of {rating}"),
			None => format!("No rated horses found for the race at {place} at {time}"),
		}
	}

	pub async fn top_rated(&self, time: &str, place: &str) -> String {
		self.rated_by_average(
			time,
			place,
			Some(3),
			true,
			"Horse with best last 3 run average rating",
			"No horses with a recent average rating found",
		)
		.await
	}

	/// The fiddle: the horse with the worst recent average.
	pub async fn bottom_rated(&self, time: &str, place: &str) -> String {
		self.rated_by_average(
			time,
			place,
			Some(3),
			false,
			"Horse with worst last 3 run average rating",
			"No horses with a recent average rating found",
		)
		.await
	}

	pub async fn best_average_rated(&self, time: &str, place: &str) -> String {
		self.rated_by_average(
			time,
			place,
			None,
			true,
			"Horse with best average rating",
			"No horses with an average rating found",
		)
		.await
	}

	/// Best rating taken from each horse's most recent run. A horse whose
	/// latest run went unrated is out, even if older runs were rated.
	pub async fn best_most_recent_rated(&self, time: &str, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};

		let mut top: Option<(&str, i64)> = None;

		for horse in &race.horses {
			let Some(rating) = most_recent_rating(horse) else {
				continue;
			};

			if top.map(|(_, best)| rating > best).unwrap_or(true) {
				top = Some((&horse.name, rating));
			}
		}

		match top {
			Some((name, rating)) => format!(
				"Horse with best most recent rating for the {time} at {place} is: {name} with a rating of {rating}"
			),
			None =>
				format!("No horses with a recent rating found for the race at {place} at {time}"),
		}
	}

	/// Ties go to the earlier card entry, for the best and the worst alike.
	async fn rated_by_average(
		&self,
		time: &str,
		place: &str,
		limit: Option<usize>,
		find_max: bool,
		description: &str,
		failure: &str,
	) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};

		let mut result: Option<(&str, f64)> = None;

		for horse in &race.horses {
			let Some(average) =
				average_rating(&horse.past, limit).filter(|average| *average >= 0.0)
			else {
				continue;
			};
			let better = match result {
				Some((_, current)) =>
					if find_max { average > current } else { average < current },
				None => true,
			};

			if better {
				result = Some((&horse.name, average));
			}
		}

		match result {
			Some((name, average)) => format!(
				"{description} for the {time} at {place} is: {name} with an average rating of {average:.2}"
			),
			None => format!("{failure} for the race at {place} at {time}"),
		}
	}
}
