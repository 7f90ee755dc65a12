use super::{SketchRecord, SketchStore, StoreError};
use chrono::NaiveDate;

const SAMPLES: [(&str, &str); 30] = [
	("2025-02-11", "Drift"),
	("2025-02-12", "Echo"),
	("2025-02-13", "Fragment"),
	("2025-02-14", "Illuminate"),
	("2025-02-15", "Whisper"),
	("2025-02-16", "Shatter"),
	("2025-02-17", "Horizon"),
	("2025-02-18", "Glimpse"),
	("2025-02-19", "Surge"),
	("2025-02-20", "Misty"),
	("2025-02-21", "Veil"),
	("2025-02-22", "Obscure"),
	("2025-02-23", "Crimson"),
	("2025-02-24", "Twilight"),
	("2025-02-25", "Ephemeral"),
	("2025-02-26", "Stillness"),
	("2025-02-27", "Ripple"),
	("2025-02-28", "Flicker"),
	("2025-03-01", "Awaken"),
	("2025-03-02", "Linger"),
	("2025-03-03", "Breeze"),
	("2025-03-04", "Solitude"),
	("2025-03-05", "Echoes"),
	("2025-03-06", "Wander"),
	("2025-03-07", "Stargaze"),
	("2025-03-08", "Frost"),
	("2025-03-09", "Ember"),
	("2025-03-10", "Flow"),
	("2025-03-11", "Lantern"),
	("2025-03-12", "Cascade"),
];

/// Demonstration sketches, numbered from "1", one per day.
pub fn sample_records() -> Vec<SketchRecord> {
	SAMPLES
		.iter()
		.zip(1..)
		.filter_map(|(&(date, prompt), n)| {
			let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
			Some(SketchRecord::new(
				n.to_string(),
				date,
				prompt,
				format!("sampleSketches/s{n}.jpg"),
			))
		})
		.collect()
}

/// Appends the sample sketches that are not in `store` yet. Returns how many were added.
#[tracing::instrument(skip(store), err)]
pub fn load_sample_data(store: &mut impl SketchStore) -> Result<usize, StoreError> {
	let mut records = store.list()?;
	let missing = sample_records()
		.into_iter()
		.filter(|sample| !records.iter().any(|r| r.id == sample.id))
		.collect::<Vec<_>>();
	let added = missing.len();
	if added == 0 {
		tracing::info!("sample data already loaded");
		return Ok(0);
	}
	records.extend(missing);
	store.replace_all(records)?;
	tracing::info!(added, "loaded sample data");
	Ok(added)
}
