use crate::RacesService;
use pluckier_domain::{NapFilter, Race, average_rating};

impl RacesService {
	/// Best bet across the card: the horse with the highest average rating
	/// over its last three runs, among races passing `filter`.
	pub async fn nap_of_the_day(&self, filter: NapFilter) -> String {
		let snapshot = self.snapshot().await;
		let Some(races) = snapshot.races.races() else {
			return "Error: Race data is not available or in the expected format.".to_string();
		};

		let mut best: Option<(&Race, &str, f64)> = None;

		for race in races.iter().filter(|race| filter.matches(race)) {
			for horse in &race.horses {
				let Some(average) =
					average_rating(&horse.past, Some(3)).filter(|average| *average >= 0.0)
				else {
					continue;
				};

				if best.map(|(_, _, current)| average > current).unwrap_or(true) {
					best = Some((race, &horse.name, average));
				}
			}
		}

		match best {
			Some((race, name, average)) => format!(
				"{} is {name} in the {} at {}, with a recent average rating of {average:.2}.",
				success_label(filter),
				race.time,
				race.place
			),
			None => failure_message(filter).to_string(),
		}
	}
}

fn success_label(filter: NapFilter) -> &'static str {
	match filter {
		NapFilter::AllRaces => "The nap of the day",
		NapFilter::Handicap => "The handicap nap of the day",
		NapFilter::UkHandicap => "The UK handicap nap of the day",
	}
}

fn failure_message(filter: NapFilter) -> &'static str {
	match filter {
		NapFilter::AllRaces => "Could not determine a nap of the day from the available data.",
		NapFilter::Handicap => "Could not determine a nap of the day from today's handicap races.",
		NapFilter::UkHandicap =>
			"Could not determine a nap of the day from today's UK handicap races.",
	}
}
