//! HTTP server plumbing.
//!
//! - Plain HTTP listener (TLS is terminated in front of the container)
//! - Graceful shutdown on SIGTERM/SIGINT, after which the status panel is unmounted
//! - Public assets folder served from the site root

mod server;
mod shutdown;
pub mod static_files;

pub use server::{start_server, ServerError};
pub use shutdown::shutdown_signal;
