mod app;
mod cli;
mod logging;
mod notifier;
mod preferences;
mod render;

pub use app::run_app;
