pub mod census;
pub mod config;
pub mod matrix;
