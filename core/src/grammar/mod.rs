// Grammar layer: nom parsers for the block and inline phases

pub mod blocks;
pub mod error;
pub mod inlines;
pub mod shared;
pub mod uri;

pub use error::{MResult, MmarkErr, MmarkError};
pub use shared::Span;
