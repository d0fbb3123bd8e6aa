//! Map document content.

pub mod generator;

pub use generator::{ContentGenerator, MapDocumentSettings};
