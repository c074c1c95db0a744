pub mod console;
pub mod notice;

pub use notice::{Notice, PipelineError};
