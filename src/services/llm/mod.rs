pub mod client;

pub use client::LlmClassifier;
