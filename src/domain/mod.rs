pub mod config;
pub mod criteria;
pub mod models;
pub mod search;
pub mod status;
pub mod summary;
