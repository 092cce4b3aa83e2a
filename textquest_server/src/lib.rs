#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod config;
pub mod http;
pub mod repl;
pub mod sendgrid;
pub mod style;
pub mod twilio;

pub use app::App;
pub use config::{ListenConfig, ServerConfig};
pub use repl::run_repl;
