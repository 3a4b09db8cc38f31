pub mod engine;
pub mod filter;
pub mod projection;

pub use engine::QueryEngine;
pub use filter::{SearchFilter, Predicates, DEFAULT_LIMIT};
pub use projection::RawEmojiRow;
