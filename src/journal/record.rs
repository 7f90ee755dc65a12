use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A saved sketch. Serialized as `{"id", "date", "prompt", "imageUri"}` with the date as
/// `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SketchRecord {
	pub id: String,
	#[serde(default = "today", deserialize_with = "deserialize_date")]
	pub date: NaiveDate,
	#[serde(default)]
	pub prompt: String,
	pub image_uri: String,
}

impl SketchRecord {
	pub fn new(
		id: impl Into<String>,
		date: NaiveDate,
		prompt: impl Into<String>,
		image_uri: impl Into<String>,
	) -> Self {
		Self {
			id: id.into(),
			date,
			prompt: prompt.into(),
			image_uri: image_uri.into(),
		}
	}
}

pub fn today() -> NaiveDate {
	Local::now().date_naive()
}

/// Reads a calendar date out of the forms records have been stored with: a plain `YYYY-MM-DD`,
/// an RFC 3339 timestamp (taken in UTC), or a local date-time without an offset.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
	let text = text.trim();
	NaiveDate::parse_from_str(text, "%Y-%m-%d")
		.ok()
		.or_else(|| {
			DateTime::parse_from_rfc3339(text)
				.ok()
				.map(|date| date.with_timezone(&Utc).date_naive())
		})
		.or_else(|| {
			NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f")
				.ok()
				.map(|date| date.date())
		})
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredDate {
	Text(String),
	/// Milliseconds since the epoch.
	Timestamp(i64),
	Other(serde::de::IgnoredAny),
}

/// Dates that cannot be read become today rather than failing the whole record.
fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
	let date = match StoredDate::deserialize(deserializer)? {
		StoredDate::Text(text) => parse_date(&text),
		StoredDate::Timestamp(millis) => {
			DateTime::<Utc>::from_timestamp_millis(millis).map(|date| date.date_naive())
		}
		StoredDate::Other(_) => None,
	};
	Ok(date.unwrap_or_else(|| {
		tracing::debug!("replacing unreadable sketch date with today");
		today()
	}))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	#[test]
	fn wire_format() -> anyhow::Result<()> {
		let record = SketchRecord::new("1", date(2025, 2, 11), "Drift", "sampleSketches/s1.jpg");
		let json = serde_json::to_value(&record)?;
		assert_eq!(
			json,
			serde_json::json!({
				"id": "1",
				"date": "2025-02-11",
				"prompt": "Drift",
				"imageUri": "sampleSketches/s1.jpg",
			})
		);
		assert_eq!(serde_json::from_value::<SketchRecord>(json)?, record);
		Ok(())
	}

	#[test]
	fn parses_stored_date_forms() {
		assert_eq!(parse_date("2025-03-01"), Some(date(2025, 3, 1)));
		assert_eq!(parse_date("2025-03-01T23:30:00.000Z"), Some(date(2025, 3, 1)));
		assert_eq!(parse_date("2025-03-01T23:30:00-05:00"), Some(date(2025, 3, 2)));
		assert_eq!(parse_date("2025-03-01T08:15:00"), Some(date(2025, 3, 1)));
		assert_eq!(parse_date("yesterday"), None);
		assert_eq!(parse_date("2025-02-30"), None);
	}

	#[test]
	fn dates_are_normalized_on_load() -> anyhow::Result<()> {
		let record: SketchRecord = serde_json::from_str(
			r#"{"id": "a", "date": "2025-03-01T12:00:00.000Z", "prompt": "Frost", "imageUri": "a.png"}"#,
		)?;
		assert_eq!(record.date, date(2025, 3, 1));

		let record: SketchRecord =
			serde_json::from_str(r#"{"id": "b", "date": 1740830400000, "imageUri": "b.png"}"#)?;
		assert_eq!(record.date, date(2025, 3, 1));
		assert_eq!(record.prompt, "");
		Ok(())
	}

	#[test]
	fn unreadable_dates_become_today() -> anyhow::Result<()> {
		for json in [
			r#"{"id": "a", "date": "not a date", "imageUri": "a.png"}"#,
			r#"{"id": "a", "date": null, "imageUri": "a.png"}"#,
			r#"{"id": "a", "imageUri": "a.png"}"#,
		] {
			let before = today();
			let record: SketchRecord = serde_json::from_str(json)?;
			assert!(record.date >= before && record.date <= today());
		}
		Ok(())
	}
}
