use super::{AlertSink, LogAlerts, SaveOutcome, SaveSink, ToolSelection, Toolbar};
use crate::config::{SurfaceConfig, SurfaceDimensions};
use crate::engine::{
	DrawingSurfaceState, GestureInputAdapter, GestureOutcome, PaletteColor, PointerEvent, StrokeWidth,
};
use crate::render::{Compositor, Raster, Scene, SnapshotError, SnapshotPayload};
use std::future::Future;
use std::rc::Rc;

/// A drawing surface wired to its input, its renderer and its toolbar.
#[derive(Debug)]
pub struct SketchCanvas {
	surface: DrawingSurfaceState,
	gestures: GestureInputAdapter,
	compositor: Compositor,
	toolbar: Toolbar,
}

impl SketchCanvas {
	pub fn new(config: &SurfaceConfig, on_save: impl SaveSink + 'static) -> Self {
		tracing::debug!(
			width = config.dimensions.width,
			height = config.dimensions.height,
			"creating sketch canvas"
		);
		Self {
			surface: DrawingSurfaceState::new()
				.with_duplicated_initial_point(config.duplicate_initial_point),
			gestures: GestureInputAdapter::new(config.min_move_distance),
			compositor: Compositor::new(config.theme, config.dimensions),
			toolbar: Toolbar::new(config.initial_selection, Rc::new(on_save), Rc::new(LogAlerts)),
		}
	}

	pub fn with_alerts(self, alerts: impl AlertSink + 'static) -> Self {
		Self {
			toolbar: self.toolbar.with_alerts(Rc::new(alerts)),
			..self
		}
	}

	pub fn dimensions(&self) -> SurfaceDimensions {
		self.compositor.dimensions()
	}

	pub fn surface(&self) -> &DrawingSurfaceState {
		&self.surface
	}

	pub fn selection(&self) -> ToolSelection {
		self.toolbar.selection()
	}

	pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
		let ToolSelection { color, width } = self.toolbar.selection();
		self.gestures.handle(event, &mut self.surface, color, width)
	}

	pub fn set_color(&mut self, color: PaletteColor) {
		self.toolbar.set_color(color)
	}

	pub fn set_stroke_width(&mut self, width: StrokeWidth) {
		self.toolbar.set_stroke_width(width)
	}

	pub fn undo(&mut self) -> bool {
		self.toolbar.undo(&mut self.surface)
	}

	/// Removes every stroke, including one still being drawn. The rest of that gesture is ignored.
	pub fn clear(&mut self) {
		self.toolbar.clear(&mut self.surface);
		self.gestures.reset();
	}

	/// The current frame, re-rendered only if the surface changed.
	pub fn frame(&mut self) -> &Raster {
		self.compositor.render(&self.surface)
	}

	pub fn scene(&self) -> Scene {
		self.compositor.scene(&self.surface)
	}

	pub fn snapshot(&self) -> Result<SnapshotPayload, SnapshotError> {
		self.compositor.snapshot(&self.surface)
	}

	pub fn save(&self) -> SaveOutcome {
		self.toolbar.save(&self.compositor, &self.surface)
	}

	/// Captures the surface as it is now and saves it off the calling thread. Drawing may continue
	/// while the returned future is pending; later strokes are not part of the saved sketch.
	pub fn save_in_background(&self) -> impl Future<Output = SaveOutcome> + 'static {
		self.toolbar.save_in_background(self.scene())
	}
}
