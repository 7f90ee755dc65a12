//! The sketch journal: saved sketches, where they are kept, and what to draw today.

mod record;
pub use record::*;

mod store;
pub use store::*;

mod filter;
pub use filter::*;

mod prompts;
pub use prompts::*;

mod saver;
pub use saver::*;

mod samples;
pub use samples::*;
