use super::SketchRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
	#[error("failed to access sketch journal: {0}")]
	Io(#[from] std::io::Error),

	#[error("malformed sketch journal: {0}")]
	Json(#[from] serde_json::Error),
}

static_assertions::assert_impl_all!(StoreError: std::error::Error, Send, Sync);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upserted {
	Created,
	Replaced,
}

/// A flat list of saved sketches.
///
/// Implementations provide whole-list reads and writes; the editing operations are built on those.
pub trait SketchStore {
	fn list(&self) -> Result<Vec<SketchRecord>, StoreError>;

	fn replace_all(&mut self, records: Vec<SketchRecord>) -> Result<(), StoreError>;

	fn clear(&mut self) -> Result<(), StoreError> {
		self.replace_all(Vec::new())
	}

	/// Replaces the record with the same id in place, or appends it.
	fn upsert(&mut self, record: SketchRecord) -> Result<Upserted, StoreError> {
		let mut records = self.list()?;
		let upserted = match records.iter_mut().find(|r| r.id == record.id) {
			Some(existing) => {
				*existing = record;
				Upserted::Replaced
			}
			None => {
				records.push(record);
				Upserted::Created
			}
		};
		self.replace_all(records)?;
		Ok(upserted)
	}

	/// Returns whether a record was removed.
	fn delete(&mut self, id: &str) -> Result<bool, StoreError> {
		let mut records = self.list()?;
		let before = records.len();
		records.retain(|r| r.id != id);
		if records.len() == before {
			return Ok(false);
		}
		self.replace_all(records)?;
		Ok(true)
	}
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
	records: Vec<SketchRecord>,
}

impl MemoryStore {
	pub fn new(records: Vec<SketchRecord>) -> Self {
		Self { records }
	}
}

impl SketchStore for MemoryStore {
	fn list(&self) -> Result<Vec<SketchRecord>, StoreError> {
		Ok(self.records.clone())
	}

	fn replace_all(&mut self, records: Vec<SketchRecord>) -> Result<(), StoreError> {
		self.records = records;
		Ok(())
	}
}

/// Keeps the journal as a pretty-printed JSON array. A missing or blank file is an empty journal.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
	path: PathBuf,
}

impl JsonFileStore {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn path(&self) -> &Path {
		&self.path
	}
}

impl SketchStore for JsonFileStore {
	#[tracing::instrument(skip(self), fields(path = %self.path.display()), err)]
	fn list(&self) -> Result<Vec<SketchRecord>, StoreError> {
		if !self.path.exists() {
			return Ok(Vec::new());
		}
		let content = std::fs::read_to_string(&self.path)?;
		if content.trim().is_empty() {
			return Ok(Vec::new());
		}
		Ok(serde_json::from_str(&content)?)
	}

	#[tracing::instrument(skip(self, records), fields(path = %self.path.display(), count = records.len()), err)]
	fn replace_all(&mut self, records: Vec<SketchRecord>) -> Result<(), StoreError> {
		if let Some(parent) = self.path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&self.path, serde_json::to_string_pretty(&records)?)?;
		Ok(())
	}

	fn clear(&mut self) -> Result<(), StoreError> {
		match std::fs::remove_file(&self.path) {
			Ok(()) => {
				tracing::info!(path = %self.path.display(), "cleared sketch journal");
				Ok(())
			}
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
			Err(error) => Err(error.into()),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::NaiveDate;

	fn record(id: &str, prompt: &str) -> SketchRecord {
		SketchRecord::new(
			id,
			NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
			prompt,
			format!("{id}.png"),
		)
	}

	fn exercise(store: &mut impl SketchStore) -> anyhow::Result<()> {
		assert!(store.list()?.is_empty());
		assert_eq!(store.upsert(record("a", "Frost"))?, Upserted::Created);
		assert_eq!(store.upsert(record("b", "Ember"))?, Upserted::Created);
		assert_eq!(store.upsert(record("a", "Flow"))?, Upserted::Replaced);
		assert_eq!(
			store.list()?,
			vec![record("a", "Flow"), record("b", "Ember")]
		);

		assert!(store.delete("a")?);
		assert!(!store.delete("a")?);
		assert_eq!(store.list()?, vec![record("b", "Ember")]);

		store.clear()?;
		assert!(store.list()?.is_empty());
		store.clear()?;
		Ok(())
	}

	#[test]
	fn memory_store() -> anyhow::Result<()> {
		exercise(&mut MemoryStore::default())
	}

	#[test]
	fn json_file_store() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		exercise(&mut JsonFileStore::new(dir.path().join("journal").join("sketch_data.json")))
	}

	#[test]
	fn json_file_store_persists() -> anyhow::Result<()> {
		let dir = tempfile::tempdir()?;
		let path = dir.path().join("sketch_data.json");
		JsonFileStore::new(&path).upsert(record("a", "Frost"))?;
		assert_eq!(JsonFileStore::new(&path).list()?, vec![record("a", "Frost")]);

		std::fs::write(&path, "  \n")?;
		assert!(JsonFileStore::new(&path).list()?.is_empty());

		std::fs::write(&path, "{")?;
		assert!(matches!(JsonFileStore::new(&path).list(), Err(StoreError::Json(_))));
		Ok(())
	}
}
