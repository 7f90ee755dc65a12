mod style;
pub use style::*;

mod stroke;
pub use stroke::*;

mod surface;
pub use surface::*;

mod gesture;
pub use gesture::*;
