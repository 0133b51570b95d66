//! Static health probe for container orchestration.
//!
//! The `healthcheck` binary checks that `public/healthz.txt` exists one
//! directory above its own install directory:
//!
//! ```text
//! <root>/bin/healthcheck
//! <root>/public/healthz.txt
//! ```
//!
//! It prints `OK` and exits 0 when the file is there. Otherwise it prints a
//! diagnostic to stderr and exits 1. The layout is a fixed convention.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_PUBLIC_DIR, HEALTHZ_FILE};

/// Token printed on success.
pub const OK_TOKEN: &str = "OK";

/// Diagnostic printed when the marker file is absent.
pub const NOT_FOUND_MESSAGE: &str = "healthz.txt not found";

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("probe location {0} has no parent directory")]
    Layout(PathBuf),
}

/// Result of one probe run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Healthy,
    Missing,
    Failed,
}

impl ProbeOutcome {
    pub fn exit_code(self) -> u8 {
        match self {
            ProbeOutcome::Healthy => 0,
            ProbeOutcome::Missing | ProbeOutcome::Failed => 1,
        }
    }
}

/// Marker path for a probe installed at `probe_location` (the executable file).
pub fn healthz_path(probe_location: &Path) -> Result<PathBuf, ProbeError> {
    let install_root = probe_location
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| ProbeError::Layout(probe_location.to_path_buf()))?;

    Ok(install_root.join(DEFAULT_PUBLIC_DIR).join(HEALTHZ_FILE))
}

/// Marker path for the running executable.
pub fn current_healthz_path() -> Result<PathBuf, ProbeError> {
    let exe = std::env::current_exe()?;
    healthz_path(&exe)
}

/// Existence test used by the probe. Errors other than "not found" surface.
pub fn check(path: &Path) -> io::Result<bool> {
    path.try_exists()
}

/// Run the probe against `path`, writing the outcome to `out` / `err`.
pub fn run<O: Write, E: Write>(path: &Path, out: &mut O, err: &mut E) -> ProbeOutcome {
    run_with(path, check, out, err)
}

/// `run` with the existence test supplied by the caller.
pub fn run_with<F, O, E>(path: &Path, exists: F, out: &mut O, err: &mut E) -> ProbeOutcome
where
    F: FnOnce(&Path) -> io::Result<bool>,
    O: Write,
    E: Write,
{
    // Write failures are ignored: the exit code is the signal the supervisor reads
    match exists(path) {
        Ok(true) => {
            let _ = writeln!(out, "{}", OK_TOKEN);
            ProbeOutcome::Healthy
        }
        Ok(false) => {
            let _ = writeln!(err, "{}", NOT_FOUND_MESSAGE);
            ProbeOutcome::Missing
        }
        Err(e) => report_failure(&ProbeError::from(e), err),
    }
}

/// Print a probe failure that happened before or during the check.
pub fn report_failure<E: Write>(error: &ProbeError, err: &mut E) -> ProbeOutcome {
    // Best effort, as in `run_with`
    let _ = writeln!(err, "Healthcheck error: {}", error);
    ProbeOutcome::Failed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_captured(
        path: &Path,
        exists: impl FnOnce(&Path) -> io::Result<bool>,
    ) -> (ProbeOutcome, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run_with(path, exists, &mut out, &mut err);
        (
            outcome,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_healthz_path_is_one_level_above_probe_dir() {
        let path = healthz_path(Path::new("/app/scripts/healthcheck")).unwrap();
        assert_eq!(path, PathBuf::from("/app/public/healthz.txt"));
    }

    #[test]
    fn test_healthz_path_rejects_shallow_location() {
        assert!(matches!(
            healthz_path(Path::new("healthcheck")),
            Err(ProbeError::Layout(_))
        ));
    }

    #[test]
    fn test_existing_file_is_healthy() {
        let root = tempfile::tempdir().unwrap();
        let public = root.path().join("public");
        std::fs::create_dir(&public).unwrap();
        std::fs::write(public.join("healthz.txt"), "").unwrap();

        let probe = root.path().join("bin").join("healthcheck");
        let marker = healthz_path(&probe).unwrap();

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run(&marker, &mut out, &mut err);

        assert_eq!(outcome, ProbeOutcome::Healthy);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(String::from_utf8(out).unwrap(), "OK\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_missing_file_is_unhealthy() {
        let root = tempfile::tempdir().unwrap();
        let marker = root.path().join("public").join("healthz.txt");

        let mut out = Vec::new();
        let mut err = Vec::new();
        let outcome = run(&marker, &mut out, &mut err);

        assert_eq!(outcome, ProbeOutcome::Missing);
        assert_eq!(outcome.exit_code(), 1);
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap().trim(), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn test_check_error_reports_message() {
        let (outcome, out, err) = run_captured(Path::new("/app/public/healthz.txt"), |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"))
        });

        assert_eq!(outcome, ProbeOutcome::Failed);
        assert_eq!(outcome.exit_code(), 1);
        assert!(out.is_empty());
        assert!(err.starts_with("Healthcheck error:"));
        assert!(err.contains("permission denied"));
    }

    #[test]
    fn test_marker_content_is_irrelevant() {
        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("healthz.txt");
        std::fs::write(&marker, "anything at all").unwrap();

        let (outcome, out, _) = run_captured(&marker, check);
        assert_eq!(outcome, ProbeOutcome::Healthy);
        assert_eq!(out, "OK\n");
    }
}
