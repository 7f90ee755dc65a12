use inkr::config::SurfaceDimensions;
use inkr::engine::{PaletteColor, PointerEvent, StrokeWidth};
use inkr::journal::{self, DailyPrompts, GalleryFilter, JournalSaver, JsonFileStore};
use inkr::{SaveOutcome, SketchCanvas, SurfaceConfig, Theme};
use std::path::{Path, PathBuf};

const DEFAULT_JOURNAL: &str = "sketch_data.json";

fn configure_tracing() -> anyhow::Result<()> {
	let max_level = if cfg!(debug_assertions) {
		tracing::Level::TRACE
	} else {
		tracing::Level::INFO
	};
	tracing::subscriber::set_global_default(
		tracing_subscriber::FmtSubscriber::builder()
			.with_max_level(max_level)
			.finish(),
	)?;
	Ok(())
}

fn configure_logging() -> anyhow::Result<()> {
	configure_tracing()?;

	// Redirect `log` to `tracing`. If the subscriber above could not be installed, the "log" feature
	// of `tracing` sends everything the other way instead.
	#[cfg(feature = "log")]
	tracing_log::LogTracer::init()?;

	Ok(())
}

/// One side-to-side wave across the surface, as a single pointer gesture.
fn wave(dimensions: SurfaceDimensions, baseline: f32, amplitude: f32) -> Vec<PointerEvent> {
	let width = dimensions.width as f32;
	let y = |x: f32| baseline + amplitude * (x / width * std::f32::consts::TAU).sin();
	let steps = 48;
	let xs = (0..=steps).map(|i| width * (0.1 + 0.8 * i as f32 / steps as f32));

	let mut events = Vec::with_capacity(steps + 2);
	for (i, x) in xs.enumerate() {
		events.push(if i == 0 {
			PointerEvent::start(x, y(x))
		} else {
			PointerEvent::moved(x, y(x))
		});
	}
	events.push(PointerEvent::end());
	events
}

fn run() -> anyhow::Result<()> {
	let mut args = std::env::args().skip(1);
	let journal_path = args
		.next()
		.map(PathBuf::from)
		.unwrap_or_else(|| DEFAULT_JOURNAL.into());
	let theme = match args.next() {
		Some(path) => Theme::load(Path::new(&path))?,
		None => Theme::default(),
	};

	let today = journal::today();
	let prompts = DailyPrompts::default();
	let prompt = prompts.for_date(today);
	tracing::info!(date = %journal::long_date(today), prompt, "today's prompt");

	let saver = JournalSaver::new(JsonFileStore::new(&journal_path), prompt);
	let config = SurfaceConfig::builder()
		.screen_width(390.0)
		.screen_height(844.0)
		.theme(theme)
		.build();
	let mut canvas = SketchCanvas::new(&config, saver.clone());

	let height = config.dimensions.height as f32;
	for event in wave(config.dimensions, height * 0.4, height * 0.15) {
		canvas.handle_pointer(event);
	}
	canvas.set_color(PaletteColor::Accent);
	canvas.set_stroke_width(StrokeWidth::Six);
	for event in wave(config.dimensions, height * 0.6, -height * 0.1) {
		canvas.handle_pointer(event);
	}

	match futures::executor::block_on(canvas.save_in_background()) {
		SaveOutcome::Saved => {}
		SaveOutcome::Ignored => anyhow::bail!("a save was already in progress"),
		SaveOutcome::Failed(error) => return Err(error.into()),
	}

	let records = saver.records()?;
	let this_week = GalleryFilter::Week.apply(&records, today);
	tracing::info!(
		journal = %journal_path.display(),
		total = records.len(),
		this_week = this_week.len(),
		"journal updated"
	);
	Ok(())
}

fn main() -> anyhow::Result<()> {
	if let Err(error) = configure_logging() {
		// We can technically continue without logging.
		eprintln!("failed to configure logging: {error}");
	}

	run().inspect_err(|error| tracing::error!(%error, "sketch run failed"))
}
