use super::encode::{decode_data_url, encode_data_url, encode_png, PNG_MEDIATYPE};
use super::raster::{Raster, StrokeCanvas};
use crate::config::{SurfaceDimensions, Theme};
use crate::engine::{DrawingSurfaceState, Point, Rgba8, StrokeWidth};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("drawing surface has no area ({width}x{height})")]
	EmptySurface { width: u32, height: u32 },

	#[error("failed to encode snapshot: {0}")]
	Encode(#[from] png::EncodingError),

	#[error("snapshot worker failed: {0}")]
	Worker(String),
}

static_assertions::assert_impl_all!(SnapshotError: std::error::Error, Send, Sync);

/// One stroke as it is drawn: a polyline with round joins and round caps.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneStroke {
	pub points: Arc<[Point]>,
	pub color: Rgba8,
	pub width: StrokeWidth,
}

/// Everything needed to draw a surface, detached from the surface itself.
///
/// Scenes share point storage with the strokes they were built from, so capturing one is cheap,
/// and they are `Send`, so they can be rasterized elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
	pub dimensions: SurfaceDimensions,
	pub background: Rgba8,
	/// In paint order.
	pub strokes: Vec<SceneStroke>,
}

static_assertions::assert_impl_all!(Scene: Send, Sync);

impl Scene {
	/// Paints the background and then every stroke, anti-aliased. A surface without area gives
	/// an empty raster.
	pub fn rasterize(&self) -> Raster {
		let SurfaceDimensions { width, height } = self.dimensions;
		let Some(mut canvas) = StrokeCanvas::new(width, height, self.background) else {
			tracing::debug!(width, height, "nothing to rasterize");
			return Raster::new(width, height, self.background);
		};
		for stroke in &self.strokes {
			canvas.stroke_polyline(&stroke.points, stroke.width.pixels() as f32, stroke.color);
		}
		canvas.finish()
	}

	#[tracing::instrument(skip(self), fields(strokes = self.strokes.len()), err)]
	pub fn snapshot(&self) -> Result<SnapshotPayload, SnapshotError> {
		if self.dimensions.is_empty() {
			return Err(SnapshotError::EmptySurface {
				width: self.dimensions.width,
				height: self.dimensions.height,
			});
		}
		SnapshotPayload::encode(&self.rasterize())
	}
}

/// A flattened, PNG-encoded image of a surface, as a `data:image/png;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotPayload {
	data_url: String,
	width: u32,
	height: u32,
}

impl SnapshotPayload {
	pub fn encode(raster: &Raster) -> Result<Self, SnapshotError> {
		let mut png_data = Vec::new();
		encode_png(raster.as_bytes(), raster.width(), raster.height(), &mut png_data)?;
		tracing::debug!(bytes = png_data.len(), "encoded snapshot");
		Ok(Self {
			data_url: encode_data_url(&png_data, PNG_MEDIATYPE),
			width: raster.width(),
			height: raster.height(),
		})
	}

	pub fn as_str(&self) -> &str {
		&self.data_url
	}

	pub fn into_data_url(self) -> String {
		self.data_url
	}

	pub fn width(&self) -> u32 {
		self.width
	}

	pub fn height(&self) -> u32 {
		self.height
	}

	pub fn png_bytes(&self) -> Vec<u8> {
		decode_data_url(&self.data_url)
			.map(|(_, data)| data)
			.unwrap_or_default()
	}
}

/// Draws a surface: the background, committed strokes in order, then the active stroke.
///
/// Frames are cached against the surface's revision, so asking for a frame after a change
/// re-renders and asking again without one does not. A compositor is meant to draw a single
/// surface.
#[derive(Debug)]
pub struct Compositor {
	theme: Theme,
	dimensions: SurfaceDimensions,
	frame: Option<(u64, Raster)>,
	frames_rendered: u64,
}

impl Compositor {
	pub fn new(theme: Theme, dimensions: SurfaceDimensions) -> Self {
		Self {
			theme,
			dimensions,
			frame: None,
			frames_rendered: 0,
		}
	}

	pub fn dimensions(&self) -> SurfaceDimensions {
		self.dimensions
	}

	pub fn scene(&self, surface: &DrawingSurfaceState) -> Scene {
		let palette = &self.theme.palette;
		Scene {
			dimensions: self.dimensions,
			background: self.theme.canvas,
			strokes: surface
				.strokes()
				.map(|stroke| SceneStroke {
					points: stroke.shared_points(),
					color: palette.resolve(stroke.color()),
					width: stroke.width(),
				})
				.collect(),
		}
	}

	pub fn is_stale(&self, surface: &DrawingSurfaceState) -> bool {
		!matches!(&self.frame, Some((revision, _)) if *revision == surface.revision())
	}

	/// The current frame, re-rendered if the surface changed since the last one.
	pub fn render(&mut self, surface: &DrawingSurfaceState) -> &Raster {
		let revision = surface.revision();
		let frame = match self.frame.take() {
			Some(frame) if frame.0 == revision => frame,
			_ => {
				let raster = self.scene(surface).rasterize();
				self.frames_rendered += 1;
				tracing::trace!(revision, "rendered frame");
				(revision, raster)
			}
		};
		&self.frame.insert(frame).1
	}

	pub fn frames_rendered(&self) -> u64 {
		self.frames_rendered
	}

	/// Encodes exactly what [`render`](Self::render) would show for `surface`.
	pub fn snapshot(&self, surface: &DrawingSurfaceState) -> Result<SnapshotPayload, SnapshotError> {
		self.scene(surface).snapshot()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::PaletteColor;
	use crate::test::decode_snapshot;
	use glam::vec2;

	fn compositor() -> Compositor {
		Compositor::new(Theme::default(), SurfaceDimensions { width: 40, height: 30 })
	}

	fn surface_with_line() -> DrawingSurfaceState {
		let mut surface = DrawingSurfaceState::new();
		surface
			.begin_stroke(vec2(5.0, 5.0), PaletteColor::Primary, StrokeWidth::Four)
			.unwrap();
		surface.extend_stroke(vec2(35.0, 5.0)).unwrap();
		surface.commit_stroke();
		surface
	}

	#[test]
	fn scene_is_in_paint_order() {
		let mut surface = surface_with_line();
		surface
			.begin_stroke(vec2(20.0, 20.0), PaletteColor::Accent, StrokeWidth::Eight)
			.unwrap();
		let scene = compositor().scene(&surface);
		let palette = Theme::default().palette;
		assert_eq!(scene.strokes.len(), 2);
		assert_eq!(scene.strokes[0].color, palette.primary);
		assert_eq!(scene.strokes[1].color, palette.accent);
		assert_eq!(scene.strokes[1].width, StrokeWidth::Eight);
		assert_eq!(scene.background, Rgba8::WHITE);
	}

	#[test]
	fn later_strokes_paint_over_earlier_ones() {
		let mut surface = surface_with_line();
		surface
			.begin_stroke(vec2(20.0, 5.0), PaletteColor::Accent, StrokeWidth::Eight)
			.unwrap();
		surface.commit_stroke();
		let mut compositor = compositor();
		let frame = compositor.render(&surface);
		assert_eq!(frame.pixel(20, 5), Some(Theme::default().palette.accent));
		assert_eq!(frame.pixel(33, 5), Some(Theme::default().palette.primary));
	}

	#[test]
	fn frames_follow_revisions() {
		let mut surface = surface_with_line();
		let mut compositor = compositor();
		compositor.render(&surface);
		compositor.render(&surface);
		assert_eq!(compositor.frames_rendered(), 1);
		assert!(!compositor.is_stale(&surface));

		surface
			.begin_stroke(vec2(1.0, 1.0), PaletteColor::Primary, StrokeWidth::Two)
			.unwrap();
		assert!(compositor.is_stale(&surface));
		surface.extend_stroke(vec2(2.0, 2.0)).unwrap();
		compositor.render(&surface);
		assert_eq!(compositor.frames_rendered(), 2);

		// Undo on an empty surface changes nothing, so no new frame either.
		let mut empty = DrawingSurfaceState::new();
		let mut compositor = self::compositor();
		compositor.render(&empty);
		empty.undo();
		compositor.render(&empty);
		assert_eq!(compositor.frames_rendered(), 1);
	}

	#[test]
	fn active_stroke_is_rendered() {
		let mut surface = DrawingSurfaceState::new();
		surface
			.begin_stroke(vec2(10.0, 10.0), PaletteColor::Accent, StrokeWidth::Six)
			.unwrap();
		let mut compositor = compositor();
		assert_eq!(
			compositor.render(&surface).pixel(10, 10),
			Some(Theme::default().palette.accent)
		);
	}

	#[test]
	fn empty_surface_snapshot_is_blank() -> anyhow::Result<()> {
		let payload = compositor().snapshot(&DrawingSurfaceState::new())?;
		assert!(payload.as_str().starts_with("data:image/png;base64,"));
		let image = decode_snapshot(payload.as_str())?;
		assert_eq!((image.width, image.height), (40, 30));
		assert!(image.pixels().all(|p| p == Rgba8::WHITE));
		Ok(())
	}

	#[test]
	fn snapshot_matches_the_rendered_frame() -> anyhow::Result<()> {
		let mut surface = surface_with_line();
		surface
			.begin_stroke(vec2(20.0, 20.0), PaletteColor::Accent, StrokeWidth::Two)
			.unwrap();
		surface.extend_stroke(vec2(25.0, 25.0)).unwrap();
		let mut compositor = compositor();
		let payload = compositor.snapshot(&surface)?;
		let image = decode_snapshot(payload.as_str())?;
		assert_eq!(image.pixels().collect::<Vec<_>>(), compositor.render(&surface).pixels());
		assert_eq!((payload.width(), payload.height()), (40, 30));
		Ok(())
	}

	#[test]
	fn zero_area_snapshot_fails() {
		let compositor = Compositor::new(Theme::default(), SurfaceDimensions { width: 0, height: 30 });
		assert!(matches!(
			compositor.snapshot(&surface_with_line()),
			Err(SnapshotError::EmptySurface { width: 0, height: 30 })
		));
	}

	#[test]
	fn zero_area_renders_an_empty_frame() {
		let mut compositor = Compositor::new(Theme::default(), SurfaceDimensions { width: 0, height: 30 });
		let frame = compositor.render(&surface_with_line());
		assert!(frame.pixels().is_empty());
		assert_eq!(frame.pixel(0, 0), None);
	}

	#[test]
	fn stroke_edges_are_anti_aliased() {
		let mut compositor = compositor();
		let frame = compositor.render(&surface_with_line());
		let palette = Theme::default().palette;
		// A 4px line along y = 5 fully covers rows 3 through 6; the cap at x = 35 fades out.
		let edge = (35..40)
			.filter_map(|x| frame.pixel(x, 5))
			.find(|p| *p != palette.primary && *p != Rgba8::WHITE);
		assert!(edge.is_some());
		assert_eq!(frame.pixel(20, 3), Some(palette.primary));
		assert_eq!(frame.pixel(20, 6), Some(palette.primary));
		assert_eq!(frame.pixel(20, 8), Some(Rgba8::WHITE));
	}

	#[test]
	fn payload_exposes_png_bytes() -> anyhow::Result<()> {
		let payload = compositor().snapshot(&surface_with_line())?;
		assert_eq!(&payload.png_bytes()[..4], b"\x89PNG");
		Ok(())
	}
}
