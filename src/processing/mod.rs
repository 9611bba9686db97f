pub mod aggregate;
pub mod annotator;
pub mod geometry;
pub mod table;
