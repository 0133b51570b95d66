//! VizAI frontend shell.
//!
//! Serves a single page that lists the frontend's environment configuration
//! and the result of one backend reachability check made when the status
//! panel is mounted. Also provides the static-file probe behind the
//! `healthcheck` binary.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod probe;
pub mod routes;
pub mod state;
pub mod status;
pub mod templates;

pub use error::AppError;
