pub mod config;
pub mod file_source;
pub mod persistence;
