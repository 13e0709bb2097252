pub mod app;
pub mod cli;
pub mod filter_popover;
pub mod filter_store;
pub mod input;
pub mod multi_select;
