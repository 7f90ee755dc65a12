use super::{SketchRecord, SketchStore, StoreError};
use crate::components::SaveSink;
use crate::util::ResultExt;
use chrono::{DateTime, Local};
use std::cell::RefCell;
use std::rc::Rc;

/// Files every saved sketch in a journal under the prompt it was drawn for.
pub struct JournalSaver<S> {
	store: Rc<RefCell<S>>,
	prompt: String,
}

impl<S> Clone for JournalSaver<S> {
	fn clone(&self) -> Self {
		Self {
			store: self.store.clone(),
			prompt: self.prompt.clone(),
		}
	}
}

impl<S: SketchStore> JournalSaver<S> {
	pub fn new(store: S, prompt: impl Into<String>) -> Self {
		Self {
			store: Rc::new(RefCell::new(store)),
			prompt: prompt.into(),
		}
	}

	pub fn prompt(&self) -> &str {
		&self.prompt
	}

	pub fn records(&self) -> Result<Vec<SketchRecord>, StoreError> {
		self.store.borrow().list()
	}

	pub fn record_for(&self, image_uri: String, now: DateTime<Local>) -> SketchRecord {
		SketchRecord {
			id: format!("sketch-{}.png", now.timestamp_millis()),
			date: now.date_naive(),
			prompt: self.prompt.clone(),
			image_uri,
		}
	}

	#[tracing::instrument(skip(self, image_uri), err)]
	pub fn save_at(&self, image_uri: String, now: DateTime<Local>) -> Result<SketchRecord, StoreError> {
		let record = self.record_for(image_uri, now);
		let upserted = self.store.borrow_mut().upsert(record.clone())?;
		tracing::info!(id = %record.id, ?upserted, "saved sketch to journal");
		Ok(record)
	}
}

impl<S: SketchStore> SaveSink for JournalSaver<S> {
	fn on_save(&self, payload: String) {
		self.save_at(payload, Local::now()).ok_or_log();
	}
}
