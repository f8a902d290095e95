pub mod app;
pub mod error;
pub mod library;
pub mod player;
pub mod ui;
