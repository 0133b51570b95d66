use tera::Tera;

use crate::config::PathsConfig;
use crate::error::AppError;

/// Initialize the Tera template engine from the configured templates directory
pub fn init_templates(paths: &PathsConfig) -> Result<Tera, AppError> {
    let tera = Tera::new(&paths.template_glob())?;
    tracing::debug!(
        templates = ?tera.get_template_names().collect::<Vec<_>>(),
        dir = %paths.templates_dir.display(),
        "Loaded templates"
    );
    Ok(tera)
}
