mod handlers;
mod templates;
mod web_server;

pub use web_server::{serve, AppState};
