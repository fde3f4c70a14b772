pub mod chunking;
pub mod correction;
pub mod edit_distance;
pub mod flatten;
pub mod interpolation;
pub mod report;
pub mod tokenization;
