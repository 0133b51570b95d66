//! Public assets folder.
//!
//! Files under the configured public directory are served from the site root,
//! so `public/healthz.txt` answers `GET /healthz.txt` the same way a static
//! host would. Paths that match no file get ServeDir's plain 404.

use tower_http::services::ServeDir;

use crate::config::PathsConfig;

/// Create the service for the public directory.
pub fn create_public_service(paths: &PathsConfig) -> ServeDir {
    ServeDir::new(&paths.public_dir).append_index_html_on_directories(false)
}
