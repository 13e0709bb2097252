pub mod detail_modal;
pub mod filter_popover;
pub mod summary_cards;
pub mod timesheet_view;
