//! Domain layer - floor extraction, history and alert rules

pub mod alert;
pub mod extractor;
pub mod history;

pub use extractor::extract_floor;
pub use history::History;
