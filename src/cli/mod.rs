pub mod convert;
pub mod history;
pub mod quotes;
pub mod setup;
pub mod ui;
