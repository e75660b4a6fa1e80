//! Employee and department management front-end for the HRM REST backend.
//!
//! `api` talks HTTP, `pages` holds per-page view state and orchestrates
//! fetch → mutate → re-fetch, `ui` renders it for a terminal.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod models;
pub mod pages;
pub mod ui;
pub mod utils;

pub use api::ApiClient;
pub use config::Config;
pub use error::{ClientError, ClientResult};
