pub mod analysis;
pub mod classifier;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod position;
pub mod reduction;
pub mod replacement;
