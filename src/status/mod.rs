//! Backend status panel.
//!
//! A `StatusPanel` is mounted once with the resolved `FrontendEnv`. Mounting
//! spawns a single task that requests `<apiBase>/` and turns the outcome into a
//! `BackendStatus`. The task holds the only writer for the status; the panel
//! keeps a reader and a cancellation token. Unmounting (or dropping) the panel
//! cancels the token, and a cancelled task discards whatever it resolved to.
//!
//! There is no retry and no polling: one check per mount.

mod fetcher;

pub use fetcher::{FetchError, HealthFetcher, HttpReply, ReqwestFetcher};

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::config::FrontendEnv;

/// Status line shown on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendStatus {
    /// Mounted, check not resolved yet
    Checking,
    /// No API base configured; no request was made
    NotConfigured,
    /// 2xx response; carries the body's message or the numeric status code
    Ok(String),
    /// Non-2xx response status code
    Error(u16),
    /// The request itself failed
    Unreachable(String),
}

impl BackendStatus {
    pub fn is_settled(&self) -> bool {
        !matches!(self, BackendStatus::Checking)
    }

    /// Machine-readable name used by the JSON status endpoint.
    pub fn state(&self) -> &'static str {
        match self {
            BackendStatus::Checking => "checking",
            BackendStatus::NotConfigured => "not_configured",
            BackendStatus::Ok(_) => "ok",
            BackendStatus::Error(_) => "error",
            BackendStatus::Unreachable(_) => "unreachable",
        }
    }
}

impl fmt::Display for BackendStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendStatus::Checking => write!(f, "Checking backend..."),
            BackendStatus::NotConfigured => write!(f, "No backend configured"),
            BackendStatus::Ok(detail) => write!(f, "Backend OK: {}", detail),
            BackendStatus::Error(code) => write!(f, "Backend error: {}", code),
            BackendStatus::Unreachable(reason) => write!(f, "Backend unreachable: {}", reason),
        }
    }
}

/// Body contract of the backend root endpoint: `{ message?: string }`.
///
/// Anything that does not deserialize into this shape (not JSON, not an
/// object, a non-string `message`) is treated as the empty record.
#[derive(Debug, Default, Deserialize)]
pub struct RootMessage {
    #[serde(default)]
    pub message: Option<String>,
}

impl RootMessage {
    pub fn parse(body: Option<&[u8]>) -> Self {
        body.and_then(|b| serde_json::from_slice(b).ok())
            .unwrap_or_default()
    }
}

/// Map a completed request to the status it settles on.
pub fn status_from_reply(reply: &HttpReply) -> BackendStatus {
    let code = reply.status.as_u16();
    if !reply.status.is_success() {
        return BackendStatus::Error(code);
    }

    let data = RootMessage::parse(reply.body.as_deref());
    match data.message.filter(|m| !m.is_empty()) {
        Some(message) => BackendStatus::Ok(message),
        None => BackendStatus::Ok(code.to_string()),
    }
}

/// URL of the backend root endpoint for a given API base.
pub fn root_url(api_base: &str) -> String {
    format!("{}/", api_base)
}

/// Serializable view of the panel for the JSON endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub status: String,
    pub state: &'static str,
    pub settled: bool,
}

impl From<&BackendStatus> for StatusSnapshot {
    fn from(status: &BackendStatus) -> Self {
        Self {
            status: status.to_string(),
            state: status.state(),
            settled: status.is_settled(),
        }
    }
}

/// A mounted status panel.
pub struct StatusPanel {
    env: Arc<FrontendEnv>,
    status: watch::Receiver<BackendStatus>,
    cancel: CancellationToken,
}

impl StatusPanel {
    /// Mount the panel and start its one backend check.
    ///
    /// Must be called from within a tokio runtime.
    pub fn mount(env: Arc<FrontendEnv>, fetcher: Arc<dyn HealthFetcher>) -> Self {
        let (tx, rx) = watch::channel(BackendStatus::Checking);
        let cancel = CancellationToken::new();

        tokio::spawn(check_backend(
            env.api_base.clone(),
            fetcher,
            tx,
            cancel.clone(),
        ));

        Self {
            env,
            status: rx,
            cancel,
        }
    }

    pub fn env(&self) -> &FrontendEnv {
        &self.env
    }

    /// Status as of now.
    pub fn current(&self) -> BackendStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes the single status update, if it happens.
    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.status.clone()
    }

    /// Wait until the check has settled, or the task ended without settling
    /// (it was cancelled), and return the status at that point.
    pub async fn settled(&self) -> BackendStatus {
        let mut rx = self.status.clone();
        let settled = match rx.wait_for(BackendStatus::is_settled).await {
            Ok(status) => status.clone(),
            Err(_) => self.current(),
        };
        settled
    }

    /// Tear the panel down. A check still in flight keeps running but its
    /// result is dropped.
    pub fn unmount(&self) {
        if !self.cancel.is_cancelled() {
            tracing::debug!("Unmounting status panel");
            self.cancel.cancel();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.cancel.is_cancelled()
    }
}

impl Drop for StatusPanel {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The mount-scoped check. Writes to `tx` at most once.
async fn check_backend(
    api_base: Option<String>,
    fetcher: Arc<dyn HealthFetcher>,
    tx: watch::Sender<BackendStatus>,
    cancel: CancellationToken,
) {
    let Some(api_base) = api_base else {
        tracing::info!("No backend configured, skipping health request");
        tx.send_replace(BackendStatus::NotConfigured);
        return;
    };

    let url = root_url(&api_base);
    tracing::debug!(%url, "Checking backend");

    let outcome = fetcher.get(&url).await;

    if cancel.is_cancelled() {
        tracing::debug!(%url, "Status panel unmounted, discarding backend check result");
        return;
    }

    let status = match outcome {
        Ok(reply) => status_from_reply(&reply),
        Err(e) => BackendStatus::Unreachable(e.to_string()),
    };

    match &status {
        BackendStatus::Ok(_) => tracing::info!(%url, status = %status, "Backend check settled"),
        _ => tracing::warn!(%url, status = %status, "Backend check settled"),
    }

    // Re-check under the channel lock; an unmount racing the check above
    // can still slip in before this point, cancellation is advisory.
    tx.send_if_modified(|current| {
        if cancel.is_cancelled() {
            return false;
        }
        *current = status;
        true
    });
}
