// AST definitions: the typed document produced by the parser

pub mod nodes;

pub use nodes::*;

use serde::Serialize;

// Root of a parsed document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    /// Decoded YAML front matter, when the input started with a `---` fence.
    pub yaml: Option<serde_yml::Value>,
    pub blocks: Vec<Block<Vec<Inline>>>,
}

impl Document {
    pub fn new(yaml: Option<serde_yml::Value>, blocks: Vec<Block<Vec<Inline>>>) -> Self {
        Self { yaml, blocks }
    }
}
