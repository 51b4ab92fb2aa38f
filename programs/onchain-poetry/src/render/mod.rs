pub mod metadata;
pub mod svg;

pub use metadata::{poem_document, verse_document, Attribute, Document, TokenMetadata};
