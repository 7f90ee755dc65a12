use crate::components::ToolSelection;
use crate::engine::{Palette, Rgba8};
use bon::bon;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Horizontal space the surrounding screen keeps free next to the drawing surface.
pub const HORIZONTAL_MARGIN: f32 = 40.0;

/// Share of the screen height given to the drawing surface.
pub const HEIGHT_FRACTION: f32 = 0.6;

#[derive(Debug, Error)]
pub enum ThemeError {
	#[error("invalid color {value:?} for {name}: {source}")]
	InvalidColor {
		name: &'static str,
		value: String,
		source: csscolorparser::ParseColorError,
	},

	#[error("failed to read theme: {0}")]
	Io(#[from] std::io::Error),

	#[error("failed to parse theme: {0}")]
	Json(#[from] serde_json::Error),
}

static_assertions::assert_impl_all!(ThemeError: std::error::Error, Send, Sync);

fn parse_color(name: &'static str, value: &str) -> Result<Rgba8, ThemeError> {
	csscolorparser::parse(value)
		.map(|color| Rgba8(color.to_rgba8()))
		.map_err(|source| ThemeError::InvalidColor {
			name,
			value: value.to_owned(),
			source,
		})
}

/// Colors the drawing surface needs from the application's style configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub palette: Palette,
	pub canvas: Rgba8,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			palette: Palette::default(),
			canvas: Rgba8::WHITE,
		}
	}
}

#[derive(Debug, Deserialize)]
struct ThemeFile {
	colors: ThemeFileColors,
}

#[derive(Debug, Deserialize)]
struct ThemeFileColors {
	border: String,
	accent: String,
	canvas: Option<String>,
}

impl Theme {
	/// Parses the palette from CSS color strings: the primary ink is the theme's border color.
	pub fn from_css(primary: &str, accent: &str, canvas: &str) -> Result<Self, ThemeError> {
		Ok(Self {
			palette: Palette {
				primary: parse_color("primary", primary)?,
				accent: parse_color("accent", accent)?,
			},
			canvas: parse_color("canvas", canvas)?,
		})
	}

	/// Parses a style file of the form `{"colors": {"border": .., "accent": .., "canvas": ..}}`.
	/// Other keys are ignored and `canvas` defaults to white.
	pub fn from_json(json: &str) -> Result<Self, ThemeError> {
		let file: ThemeFile = serde_json::from_str(json)?;
		let colors = file.colors;
		Self::from_css(
			&colors.border,
			&colors.accent,
			colors.canvas.as_deref().unwrap_or("#FFFFFF"),
		)
	}

	#[tracing::instrument(err)]
	pub fn load(path: &Path) -> Result<Self, ThemeError> {
		Self::from_json(&std::fs::read_to_string(path)?)
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SurfaceDimensions {
	pub width: u32,
	pub height: u32,
}

impl SurfaceDimensions {
	/// Sizes the surface from the screen: the full width less the margin, and a fixed share of the
	/// height. Nonsensical inputs produce an empty surface.
	pub fn from_screen(
		screen_width: f32,
		screen_height: f32,
		horizontal_margin: f32,
		height_fraction: f32,
	) -> Self {
		let to_pixels = |v: f32| {
			if v.is_finite() {
				v.max(0.0).floor() as u32
			} else {
				0
			}
		};
		Self {
			width: to_pixels(screen_width - horizontal_margin),
			height: to_pixels(screen_height * height_fraction),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0
	}
}

/// Everything a [`SketchCanvas`](crate::components::SketchCanvas) is configured with. Computed
/// once when the canvas is created.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
	pub theme: Theme,
	pub dimensions: SurfaceDimensions,
	pub min_move_distance: f32,
	pub duplicate_initial_point: bool,
	pub initial_selection: ToolSelection,
}

#[bon]
impl SurfaceConfig {
	#[builder]
	pub fn new(
		screen_width: f32,
		screen_height: f32,
		#[builder(default)] theme: Theme,
		#[builder(default = HORIZONTAL_MARGIN)] horizontal_margin: f32,
		#[builder(default = HEIGHT_FRACTION)] height_fraction: f32,
		#[builder(default)] min_move_distance: f32,
		#[builder(default)] duplicate_initial_point: bool,
		#[builder(default)] initial_selection: ToolSelection,
	) -> Self {
		Self {
			theme,
			dimensions: SurfaceDimensions::from_screen(
				screen_width,
				screen_height,
				horizontal_margin,
				height_fraction,
			),
			min_move_distance,
			duplicate_initial_point,
			initial_selection,
		}
	}

	/// A configuration with explicit surface dimensions, bypassing the screen-derived sizing.
	pub fn with_dimensions(width: u32, height: u32) -> Self {
		Self {
			theme: Theme::default(),
			dimensions: SurfaceDimensions { width, height },
			min_move_distance: 0.0,
			duplicate_initial_point: false,
			initial_selection: ToolSelection::default(),
		}
	}
}
