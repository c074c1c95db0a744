pub mod cancel;
pub mod event;
pub mod normalize;
pub mod reactor;
pub mod scheduler;
pub mod state;
pub mod telemetry;
