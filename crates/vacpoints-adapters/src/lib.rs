pub mod dataset;
pub mod export;
pub mod persistence;
