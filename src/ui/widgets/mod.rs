pub mod header;
pub mod library;
pub mod log;
pub mod popups;
