use serde_json::{Value, json};

/// A small racecard exercising the awkward cases: an unrated latest run
/// (Trigger), a horse with no past at all (O'Brien's Pride), and handicap
/// and country variation across meetings for the nap filters.
pub fn sample_races() -> Value {
	json!([
		{
			"time": "14:30",
			"place": "Ascot",
			"detail": "Class 4 Handicap (1m)",
			"country": "UK",
			"horses": [
				{
					"name": "Dobbin",
					"past": [
						{ "date": "15/08/2026", "name": 80 },
						{ "date": "08/08/2026", "name": 90 },
						{ "date": "01/08/2026", "name": 100 },
						{ "date": "25/07/2026", "name": 60 },
					],
				},
				{
					"name": "Trigger",
					"past": [
						{ "date": "18/08/2026" },
						{ "date": "10/08/2026", "name": 95 },
						{ "date": "02/08/2026", "name": 87 },
					],
				},
				{ "name": "O'Brien's Pride" },
			],
		},
		{
			"time": "15:05",
			"place": "Ascot",
			"detail": "Novice Stakes (6f)",
			"country": "UK",
			"horses": [
				{ "name": "Silver Birch", "past": [{ "date": "12/08/2026", "name": 70 }] },
			],
		},
		{
			"time": "16:10",
			"place": "Killarney",
			"detail": "Maiden Chase",
			"country": "IRE",
			"horses": [
				{ "name": "Kerry Dancer", "past": [{ "date": "14/08/2026", "name": 99 }] },
			],
		},
		{
			"time": "17:00",
			"place": "Deauville",
			"detail": "Handicap (1600m)",
			"country": "FR",
			"horses": [
				{ "name": "Beau Geste", "past": [{ "date": "13/08/2026", "name": 97 }] },
			],
		},
	])
}

/// Odds records matching [`sample_races`]: Trigger has no price (a
/// non-runner), and O'Brien's Pride is listed under its apostrophe-stripped
/// name as the feed writes it.
pub fn sample_odds() -> Value {
	json!([
		{ "name": "Dobbin", "odds": "5/2", "event": "14:30 Ascot" },
		{ "name": "Trigger", "event": "14:30 Ascot" },
		{ "name": "OBriens Pride", "odds": "11/4", "event": "14:30 Ascot" },
		{ "name": "Silver Birch", "odds": "7/2", "event": "15:05 Ascot" },
		{ "name": "Kerry Dancer", "odds": "2/1", "event": "16:10 Killarney" },
		{ "name": "Beau Geste", "odds": "6/4", "event": "17:00 Deauville" },
	])
}
