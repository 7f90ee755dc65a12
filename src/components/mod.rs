mod toolbar;
pub use toolbar::*;

mod sketch_canvas;
pub use sketch_canvas::*;
