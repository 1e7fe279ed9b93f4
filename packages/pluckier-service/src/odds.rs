use crate::RacesService;

impl RacesService {
	/// Prices for one race, straight from the odds feed. A record belongs to
	/// the race when its event mentions the time and, case-insensitively,
	/// the place. Duplicate entries collapse to the first, in feed order.
	pub async fn odds_for_race(&self, time: &str, place: &str) -> String {
		let snapshot = self.snapshot().await;
		let Some(records) = snapshot.odds.records() else {
			return "Error: Odds data is not available or in the expected format.".to_string();
		};

		let mut entries: Vec<String> = Vec::new();

		for record in records {
			let Some(event) = record.event.as_deref() else {
				continue;
			};
			if !event.contains(time) || !event.to_lowercase().contains(&place.to_lowercase()) {
				continue;
			}

			let entry = format!("{} {}", record.name, record.odds.as_deref().unwrap_or("NR"));

			if !entries.contains(&entry) {
				entries.push(entry);
			}
		}

		if entries.is_empty() {
			return format!("No odds found for the race at {place} at {time}");
		}

		format!("Odds for the {time} at {place}: {}", entries.join(", "))
	}
}
