//! Rendering through a headless Chromium/Chrome process.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use log::warn;
use scraper::Html;
use scraper::Selector;
use tokio::process::Command;
use tokio::time::Instant;
use uuid::Uuid;

use crate::render::Browser;
use crate::render::PageRequest;
use crate::render::RenderContext;
use crate::render::error::RenderError;

/// How long to wait between DOM dumps while the content marker is absent.
const MARKER_POLL_DELAY: Duration = Duration::from_secs(2);

/// Virtual time granted to page scripts before the DOM is dumped, in ms.
const SCRIPT_TIME_BUDGET_MS: u32 = 10_000;

/// Launches headless Chromium sessions.
pub struct ChromeBrowser {
    binary: PathBuf,
}

impl ChromeBrowser {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

#[async_trait]
impl Browser for ChromeBrowser {
    async fn acquire(&self) -> Result<Box<dyn RenderContext>, RenderError> {
        let profile_dir =
            std::env::temp_dir().join(format!("carwatch-profile-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&profile_dir).map_err(|e| RenderError::Launch {
            message: format!(
                "Failed to create browser profile dir {}: {e}",
                profile_dir.display()
            ),
        })?;
        debug!("Acquired rendering session at {}.", profile_dir.display());

        Ok(Box::new(ChromeSession {
            binary: self.binary.clone(),
            profile_dir,
        }))
    }
}

/// One rendering session. The profile directory is removed on drop, whether
/// the scan finished or bailed out early.
struct ChromeSession {
    binary: PathBuf,
    profile_dir: PathBuf,
}

impl ChromeSession {
    async fn dump_dom(&self, url: &str) -> Result<String, RenderError> {
        let output = Command::new(&self.binary)
            .arg("--headless=new")
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--hide-scrollbars")
            .arg(format!("--user-data-dir={}", self.profile_dir.display()))
            .arg(format!("--virtual-time-budget={SCRIPT_TIME_BUDGET_MS}"))
            .arg("--dump-dom")
            .arg(url)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RenderError::Launch {
                message: format!("Failed to spawn {}: {e}", self.binary.display()),
            })?;

        if !output.status.success() {
            return Err(RenderError::Navigation {
                url: url.to_string(),
                message: format!("renderer exited with {}", output.status),
            });
        }

        String::from_utf8(output.stdout).map_err(|_| RenderError::Navigation {
            url: url.to_string(),
            message: "renderer produced non-UTF-8 output".to_string(),
        })
    }
}

#[async_trait]
impl RenderContext for ChromeSession {
    async fn fetch_page(&self, request: &PageRequest) -> Result<String, RenderError> {
        let marker = Selector::parse(&request.marker).map_err(|_| RenderError::InvalidMarker {
            marker: request.marker.clone(),
        })?;
        let deadline = Instant::now() + request.timeout;

        loop {
            let html = match tokio::time::timeout_at(deadline, self.dump_dom(&request.url)).await {
                Ok(result) => result?,
                Err(_) => {
                    return Err(RenderError::Navigation {
                        url: request.url.clone(),
                        message: format!("page load exceeded {:?}", request.timeout),
                    });
                }
            };

            if marker_present(&html, &marker) {
                return Ok(html);
            }

            debug!(
                "Marker `{}` not yet present on {}, retrying.",
                request.marker, request.url
            );
            if Instant::now() + MARKER_POLL_DELAY >= deadline {
                return Err(RenderError::MarkerTimeout {
                    url: request.url.clone(),
                    marker: request.marker.clone(),
                });
            }
            tokio::time::sleep(MARKER_POLL_DELAY).await;
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.profile_dir) {
            warn!(
                "Failed to remove browser profile dir {}: {e}",
                self.profile_dir.display()
            );
        }
    }
}

// `Html` is not `Send`; keep parsing inside a sync helper so the fetch future
// stays spawnable.
fn marker_present(html: &str, marker: &Selector) -> bool {
    Html::parse_document(html).select(marker).next().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_present() {
        let marker = Selector::parse(r#"[data-cy="auto-listing-block"]"#).unwrap();
        let html = r#"<html><body><div data-cy="auto-listing-block"></div></body></html>"#;
        assert!(marker_present(html, &marker));
        assert!(!marker_present("<html><body>loading...</body></html>", &marker));
    }
}
