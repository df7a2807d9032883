pub mod error;
pub mod hooks;
pub mod model;

pub use error::Error;
pub use model::{parse_words, Snapshot, State};
