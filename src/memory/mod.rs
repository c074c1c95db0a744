pub mod cache;
pub mod history;

pub use cache::*;
pub use history::*;
