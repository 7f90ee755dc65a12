use inkr::engine::{PaletteColor, PointerEvent, StrokeWidth};
use inkr::journal::{
	load_sample_data, today, GalleryFilter, JournalSaver, JsonFileStore, SketchStore,
};
use inkr::render::encode::decode_data_url;
use inkr::{SketchCanvas, SurfaceConfig};

fn sketch(canvas: &mut SketchCanvas) {
	canvas.handle_pointer(PointerEvent::start(10.0, 10.0));
	canvas.handle_pointer(PointerEvent::moved(120.0, 40.0));
	canvas.handle_pointer(PointerEvent::moved(200.0, 180.0));
	canvas.handle_pointer(PointerEvent::end());
	canvas.set_color(PaletteColor::Accent);
	canvas.set_stroke_width(StrokeWidth::Eight);
	canvas.handle_pointer(PointerEvent::start(50.0, 200.0));
	canvas.handle_pointer(PointerEvent::moved(300.0, 200.0));
	canvas.handle_pointer(PointerEvent::end());
}

#[test]
fn saved_sketches_land_in_the_journal() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let path = dir.path().join("sketch_data.json");
	let mut store = JsonFileStore::new(&path);
	assert_eq!(load_sample_data(&mut store)?, 30);

	let saver = JournalSaver::new(JsonFileStore::new(&path), "A curious cat");
	let config = SurfaceConfig::builder()
		.screen_width(390.0)
		.screen_height(844.0)
		.build();
	let mut canvas = SketchCanvas::new(&config, saver.clone());
	sketch(&mut canvas);
	assert_eq!(canvas.surface().committed_strokes().len(), 2);
	assert!(canvas.save().is_saved());

	let records = JsonFileStore::new(&path).list()?;
	assert_eq!(records.len(), 31);
	let saved = &records[30];
	assert!(saved.id.starts_with("sketch-") && saved.id.ends_with(".png"));
	assert_eq!(saved.prompt, "A curious cat");
	assert_eq!(saved.date, today());

	let (mediatype, png) = decode_data_url(&saved.image_uri).expect("data URL");
	assert_eq!(mediatype, "image/png");
	assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

	let this_week = GalleryFilter::Week.apply(&records, today());
	assert!(this_week.iter().any(|r| r.id == saved.id));
	Ok(())
}

#[test]
fn background_save_then_keep_drawing() -> anyhow::Result<()> {
	let dir = tempfile::tempdir()?;
	let saver = JournalSaver::new(JsonFileStore::new(dir.path().join("journal.json")), "In the clouds");
	let mut canvas = SketchCanvas::new(&SurfaceConfig::with_dimensions(320, 240), saver.clone());
	sketch(&mut canvas);

	let pending = canvas.save_in_background();
	assert!(pollster::block_on(canvas.save_in_background()).is_ignored());
	canvas.undo();
	canvas.clear();
	assert!(pollster::block_on(pending).is_saved());
	assert_eq!(saver.records()?.len(), 1);
	Ok(())
}
