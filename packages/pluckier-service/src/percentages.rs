use crate::{RacesService, race_not_found};
use pluckier_domain::{WinStrategy, find_race};

impl RacesService {
	/// Splits a notional win chance across the field from each horse's score
	/// under `strategy`. Horses with no rated runs stay in at 0.00%.
	pub async fn win_percentages(&self, strategy: WinStrategy, time: &str, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(race) = snapshot.races.races().and_then(|races| find_race(races, time, place))
		else {
			return race_not_found(time, place);
		};

		let mut ratings = race
			.horses
			.iter()
			.map(|horse| (horse.name.as_str(), strategy.score(horse)))
			.collect::<Vec<_>>();
		let pool = ratings.iter().map(|(_, rating)| rating).sum::<i64>();

		if pool == 0 {
			return format!(
				"No rating data available to calculate win percentages for the race at {place} at {time}"
			);
		}

		// Stable sort, so equal scores keep their card order.
		ratings.sort_by(|a, b| b.1.cmp(&a.1));

		let shares = ratings
			.iter()
			.map(|(name, rating)| {
				format!("{name}: {:.2}%", *rating as f64 / pool as f64 * 100.0)
			})
			.collect::<Vec<_>>()
			.join(", ");

		format!("Win percentages ({}) for the {time} at {place}: {shares}", strategy.label())
	}
}
