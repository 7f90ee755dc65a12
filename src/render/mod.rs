mod raster;
pub use raster::*;

mod compositor;
pub use compositor::*;

pub mod encode;
