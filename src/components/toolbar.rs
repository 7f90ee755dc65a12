use crate::engine::{DrawingSurfaceState, PaletteColor, StrokeWidth};
use crate::render::{Compositor, Scene, SnapshotError, SnapshotPayload};
use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

/// Receives the data URL of every successfully saved sketch.
pub trait SaveSink {
	fn on_save(&self, payload: String);
}

impl<F: Fn(String)> SaveSink for F {
	fn on_save(&self, payload: String) {
		self(payload)
	}
}

/// Tells the user that something went wrong.
pub trait AlertSink {
	fn alert(&self, title: &str, message: &str);
}

/// Reports alerts through the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAlerts;

impl AlertSink for LogAlerts {
	fn alert(&self, title: &str, message: &str) {
		tracing::error!(title, message, "alert");
	}
}

/// The color and width new strokes are drawn with.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ToolSelection {
	pub color: PaletteColor,
	pub width: StrokeWidth,
}

#[derive(Debug)]
pub enum SaveOutcome {
	/// The payload was handed to the save collaborator.
	Saved,
	/// Another save was still in progress.
	Ignored,
	/// Nothing was handed off; the user was alerted.
	Failed(SnapshotError),
}

impl SaveOutcome {
	pub fn is_saved(&self) -> bool {
		matches!(self, SaveOutcome::Saved)
	}

	pub fn is_ignored(&self) -> bool {
		matches!(self, SaveOutcome::Ignored)
	}
}

/// Admits one save at a time.
#[derive(Debug, Default, Clone)]
struct SaveGate(Rc<Cell<bool>>);

impl SaveGate {
	fn try_acquire(&self) -> Option<SaveGuard> {
		if self.0.replace(true) {
			None
		} else {
			Some(SaveGuard(self.0.clone()))
		}
	}

	fn is_held(&self) -> bool {
		self.0.get()
	}
}

/// Releases the gate when dropped, whichever way the save ends.
#[derive(Debug)]
struct SaveGuard(Rc<Cell<bool>>);

impl Drop for SaveGuard {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

/// Holds the current tool selection and runs the toolbar's actions against a surface.
pub struct Toolbar {
	selection: ToolSelection,
	gate: SaveGate,
	on_save: Rc<dyn SaveSink>,
	alerts: Rc<dyn AlertSink>,
}

impl std::fmt::Debug for Toolbar {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Toolbar")
			.field("selection", &self.selection)
			.field("saving", &self.gate.is_held())
			.finish_non_exhaustive()
	}
}

impl Toolbar {
	pub fn new(selection: ToolSelection, on_save: Rc<dyn SaveSink>, alerts: Rc<dyn AlertSink>) -> Self {
		Self {
			selection,
			gate: SaveGate::default(),
			on_save,
			alerts,
		}
	}

	pub fn with_alerts(self, alerts: Rc<dyn AlertSink>) -> Self {
		Self { alerts, ..self }
	}

	pub fn selection(&self) -> ToolSelection {
		self.selection
	}

	/// Applies to strokes started from now on. A stroke in progress keeps its color.
	pub fn set_color(&mut self, color: PaletteColor) {
		tracing::debug!(%color, "selected color");
		self.selection.color = color;
	}

	pub fn set_stroke_width(&mut self, width: StrokeWidth) {
		tracing::debug!(%width, "selected stroke width");
		self.selection.width = width;
	}

	/// Returns whether a stroke was removed.
	pub fn undo(&self, surface: &mut DrawingSurfaceState) -> bool {
		surface.undo().is_some()
	}

	pub fn clear(&self, surface: &mut DrawingSurfaceState) {
		surface.clear()
	}

	pub fn is_saving(&self) -> bool {
		self.gate.is_held()
	}

	/// Encodes the surface in place and hands the payload off.
	pub fn save(&self, compositor: &Compositor, surface: &DrawingSurfaceState) -> SaveOutcome {
		let Some(_guard) = self.gate.try_acquire() else {
			tracing::info!("save already in progress");
			return SaveOutcome::Ignored;
		};
		finish_save(compositor.snapshot(surface), &*self.on_save, &*self.alerts)
	}

	/// Encodes `scene` on a worker thread.
	///
	/// The save slot is taken when this is called rather than when the future is first polled, so
	/// a second call made before the first future completes resolves to
	/// [`SaveOutcome::Ignored`]. Dropping the future gives the slot back.
	pub fn save_in_background(&self, scene: Scene) -> impl Future<Output = SaveOutcome> + 'static {
		let guard = self.gate.try_acquire();
		let on_save = self.on_save.clone();
		let alerts = self.alerts.clone();
		async move {
			let Some(_guard) = guard else {
				tracing::info!("save already in progress");
				return SaveOutcome::Ignored;
			};
			finish_save(encode_on_worker(scene).await, &*on_save, &*alerts)
		}
	}
}

fn encode_on_worker(scene: Scene) -> impl Future<Output = Result<SnapshotPayload, SnapshotError>> {
	let (sender, receiver) = futures::channel::oneshot::channel();
	let spawned = std::thread::Builder::new()
		.name("snapshot".into())
		.spawn(move || {
			// The receiver may be gone if the save was abandoned.
			let _ = sender.send(scene.snapshot());
		});
	async move {
		spawned.map_err(|error| SnapshotError::Worker(error.to_string()))?;
		receiver
			.await
			.map_err(|_| SnapshotError::Worker("worker exited without a result".into()))?
	}
}

fn finish_save(
	result: Result<SnapshotPayload, SnapshotError>,
	on_save: &dyn SaveSink,
	alerts: &dyn AlertSink,
) -> SaveOutcome {
	match result {
		Ok(payload) => {
			tracing::info!(
				width = payload.width(),
				height = payload.height(),
				"saving sketch"
			);
			on_save.on_save(payload.into_data_url());
			SaveOutcome::Saved
		}
		Err(error) => {
			alerts.alert("Error", &format!("Failed to save sketch: {error}"));
			SaveOutcome::Failed(error)
		}
	}
}
