pub mod document;
pub mod retrieval;
