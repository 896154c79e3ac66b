//! Scoped headless-Chrome sessions.
//!
//! Each adapter invocation gets a fresh browser process with a single tab.
//! The process is torn down when the [`BrowserSession`] drops — on success
//! and on every error path alike — so concurrent conversions never share
//! engine state.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::browser::default_executable;
use headless_chrome::{Browser, LaunchOptions, Tab};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::ConvertError;

/// How often the JS-condition poll re-evaluates its expression.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Verify that a usable Chrome/Chromium executable can be located.
///
/// This is the explicit, idempotent setup step for the rendering engine:
/// callers decide when (and whether) it runs, typically once per process
/// before the first conversion. A failure here is advisory — launching can
/// still be attempted, and callers are expected to log a warning and
/// continue best-effort.
pub fn ensure_engine_available() -> Result<PathBuf, ConvertError> {
    let path = default_executable().map_err(|detail| ConvertError::BrowserLaunch { detail })?;
    debug!("browser engine found at {}", path.display());
    Ok(path)
}

/// Build a `file://` URL for a local path.
pub(crate) fn file_url(path: &std::path::Path) -> Result<String, ConvertError> {
    let abs = path
        .canonicalize()
        .map_err(|e| ConvertError::Internal(format!("cannot resolve '{}': {e}", path.display())))?;
    Ok(format!("file://{}", abs.display()))
}

/// One browser process with one open tab.
pub struct BrowserSession {
    tab: Arc<Tab>,
    // Held for its Drop: dropping the Browser kills the Chrome process.
    _browser: Browser,
}

impl BrowserSession {
    /// Launch a fresh headless browser and open a blank tab.
    ///
    /// # Errors
    /// [`ConvertError::BrowserLaunch`] when no executable is found or the
    /// process fails to start.
    pub fn launch() -> Result<Self, ConvertError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .idle_browser_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| ConvertError::BrowserLaunch {
                detail: e.to_string(),
            })?;

        let browser = Browser::new(options).map_err(|e| ConvertError::BrowserLaunch {
            detail: e.to_string(),
        })?;
        let tab = browser.new_tab().map_err(|e| ConvertError::BrowserLaunch {
            detail: e.to_string(),
        })?;

        Ok(Self {
            tab,
            _browser: browser,
        })
    }

    /// The session's tab.
    pub fn tab(&self) -> &Tab {
        &self.tab
    }

    /// Navigate the tab and wait for the navigation to complete.
    pub fn navigate(&self, url: &str) -> Result<(), ConvertError> {
        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| ConvertError::Navigation {
                url: url.to_string(),
                detail: e.to_string(),
            })?;
        Ok(())
    }

    /// Poll a boolean JS expression until it becomes `true` or `timeout`
    /// elapses. Returns whether the condition was met.
    ///
    /// Evaluation errors during the poll are treated as "not yet" — a page
    /// mid-load can transiently reject evaluations.
    pub fn poll_until(&self, expression: &str, timeout: Duration) -> Result<bool, ConvertError> {
        let deadline = Instant::now() + timeout;
        loop {
            match self.tab.evaluate(expression, false) {
                Ok(object) if object.value == Some(Value::Bool(true)) => return Ok(true),
                Ok(_) => trace!("poll condition not yet true: {expression}"),
                Err(e) => trace!("poll evaluation not ready: {e}"),
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    /// Evaluate a JS expression that resolves to a string, awaiting promises.
    pub fn eval_string(&self, expression: &str) -> Result<String, ConvertError> {
        let object = self
            .tab
            .evaluate(expression, true)
            .map_err(|e| ConvertError::Evaluate {
                detail: e.to_string(),
            })?;
        match object.value {
            Some(Value::String(s)) => Ok(s),
            other => Err(ConvertError::Evaluate {
                detail: format!("expected a string result, got {other:?}"),
            }),
        }
    }
}
