pub mod apps;
pub mod automation;
pub mod classifier;
pub mod config;
pub mod dispatch;
pub mod driver;
pub mod intent;
pub mod kernel;
pub mod memory;
pub mod outputs;
pub mod services;

// Re-export specific items for convenient access
pub use driver::{Driver, InputHandle, SessionReport};
pub use kernel::reactor::Reactor;
