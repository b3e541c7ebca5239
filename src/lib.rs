pub mod app;
pub mod core;
pub mod logging;
pub mod models;
