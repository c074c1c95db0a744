pub mod directory;

pub use directory::{list_apps, AppDirectory, APP_SUFFIX};
