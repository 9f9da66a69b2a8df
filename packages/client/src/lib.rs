//! Terminal dashboard for the device backup event stream.
//!
//! Connects to the WebSocket pushed by the backup service, renders a
//! scrolling log and keeps a live table of monitored device states.

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod formatter;
pub mod log_view;
pub mod model;
pub mod route;
pub mod runner;
pub mod screen;
pub mod session;

pub use config::DashboardConfig;
pub use dispatcher::{Dashboard, Update};
pub use error::ClientError;
pub use runner::run_dashboard;
