//! Container healthcheck: exits 0 when `public/healthz.txt` exists next to
//! the install root, 1 otherwise.
//!
//! Example Docker HEALTHCHECK:
//!   HEALTHCHECK CMD ["/app/bin/healthcheck"]

use std::io;
use std::process::ExitCode;

use vizai_frontend::probe;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();

    let outcome = match probe::current_healthz_path() {
        Ok(path) => probe::run(&path, &mut stdout, &mut stderr),
        Err(e) => probe::report_failure(&e, &mut stderr),
    };

    ExitCode::from(outcome.exit_code())
}
