pub mod async_classifier;
pub mod parse;
pub mod types;

pub use async_classifier::AsyncClassifier;
pub use parse::parse_content;
pub use types::{Classifier, ClassifyError};
