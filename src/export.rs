//! Image export and share, over host-provided raster and share capabilities.
//!
//! DESIGN
//! ======
//! The crate never produces pixels itself. A [`Rasterizer`] turns the card
//! into PNG bytes and a [`ShareTarget`] hands a file to the platform share
//! sheet. [`Exporter`] adds the rules around them: one export and one share
//! in flight at a time, timestamped file names, falling back to a download
//! when sharing is unavailable, and a cancelled share being a non-event.

#[cfg(test)]
#[path = "export_test.rs"]
mod export_test;

use std::sync::Arc;

use tracing::{info, warn};

use crate::card::CardState;
use crate::consts::EXPORT_PIXEL_RATIO;
use crate::error::ErrorCode;
use crate::inflight::InFlightSlot;

/// File name used for shared images.
pub const SHARE_FILE_NAME: &str = "mood-card.png";

/// Download file name for an export taken at `unix_ms`.
#[must_use]
pub fn export_file_name(unix_ms: i128) -> String {
    format!("mood-card-{unix_ms}.png")
}

fn now_unix_ms() -> i128 {
    time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

// =============================================================================
// COLLABORATORS
// =============================================================================

/// Renders a card to PNG bytes.
#[async_trait::async_trait]
pub trait Rasterizer: Send + Sync {
    /// # Errors
    ///
    /// Returns a description of why rendering failed (tainted image, no
    /// surface, ...).
    async fn render_png(&self, card: &CardState, pixel_ratio: f64) -> Result<Vec<u8>, String>;
}

/// Result of offering a file to the platform share sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareAttempt {
    Shared,
    /// The user dismissed the sheet.
    Cancelled(String),
    /// The platform accepted the request and then failed.
    Failed(String),
    /// The platform has no share capability.
    Unavailable,
}

#[async_trait::async_trait]
pub trait ShareTarget: Send + Sync {
    async fn share(&self, image: &ExportedImage) -> ShareAttempt;
}

// =============================================================================
// EXPORTER
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub file_name: String,
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Cancelled,
    /// Sharing was unavailable; the host should save this file instead and
    /// tell the user to share it manually.
    Downloaded(ExportedImage),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,
    #[error("export failed: {0}; try again or take a screenshot instead")]
    Render(String),
    #[error("share failed: {0}")]
    Share(String),
}

impl ErrorCode for ExportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Busy => "E_EXPORT_BUSY",
            Self::Render(_) => "E_EXPORT_RENDER",
            Self::Share(_) => "E_EXPORT_SHARE",
        }
    }

    fn retryable(&self) -> bool {
        true
    }
}

pub struct Exporter {
    rasterizer: Arc<dyn Rasterizer>,
    downloading: InFlightSlot,
    sharing: InFlightSlot,
}

impl Exporter {
    pub fn new(rasterizer: Arc<dyn Rasterizer>) -> Self {
        Self { rasterizer, downloading: InFlightSlot::new(), sharing: InFlightSlot::new() }
    }

    /// Render `card` for download.
    ///
    /// # Errors
    ///
    /// `Busy` while another download is rendering; `Render` if the
    /// rasterizer fails.
    pub async fn download(&self, card: &CardState) -> Result<ExportedImage, ExportError> {
        let _guard = self.downloading.try_acquire().ok_or(ExportError::Busy)?;
        let png = self.render(card).await?;
        let image = ExportedImage { file_name: export_file_name(now_unix_ms()), png };
        info!(file = %image.file_name, bytes = image.png.len(), "card exported");
        Ok(image)
    }

    /// Render `card` and offer it to `target`.
    ///
    /// # Errors
    ///
    /// `Busy` while another share is running, `Render` if the rasterizer
    /// fails, `Share` if the platform fails. A dismissed share sheet is
    /// `Ok(Cancelled)`.
    pub async fn share(&self, card: &CardState, target: &dyn ShareTarget) -> Result<ShareOutcome, ExportError> {
        let _guard = self.sharing.try_acquire().ok_or(ExportError::Busy)?;
        let png = self.render(card).await?;
        let image = ExportedImage { file_name: SHARE_FILE_NAME.to_owned(), png };

        match target.share(&image).await {
            ShareAttempt::Shared => {
                info!(bytes = image.png.len(), "card shared");
                Ok(ShareOutcome::Shared)
            }
            ShareAttempt::Cancelled(reason) => {
                info!(%reason, "share cancelled");
                Ok(ShareOutcome::Cancelled)
            }
            ShareAttempt::Failed(reason) => {
                warn!(%reason, "share failed");
                Err(ExportError::Share(reason))
            }
            ShareAttempt::Unavailable => {
                info!("share unavailable; falling back to download");
                Ok(ShareOutcome::Downloaded(image))
            }
        }
    }

    async fn render(&self, card: &CardState) -> Result<Vec<u8>, ExportError> {
        self.rasterizer.render_png(card, EXPORT_PIXEL_RATIO).await.map_err(|e| {
            warn!(error = %e, "card render failed");
            ExportError::Render(e)
        })
    }
}
