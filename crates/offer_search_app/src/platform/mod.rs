mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;
mod watcher;

pub use app::run_app;
