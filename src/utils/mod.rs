pub mod logging;
pub mod parsing;
