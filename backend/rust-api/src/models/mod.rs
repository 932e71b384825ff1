pub mod content;
pub mod profile;
pub mod progress;
pub mod recommendation;
