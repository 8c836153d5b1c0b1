//! Screen capture: grab the primary display as an encoded still.
//!
//! The pipeline only sees the [`Capturer`] contract: one still image of the
//! primary display, already JPEG-encoded for the analysis request.

mod encode;
mod screenshot;

pub use encode::{encode_jpeg, EncodeError};
pub use screenshot::capture_primary_monitor;

use std::future::Future;
use std::time::Instant;

/// Wire encoding of a captured image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageEncoding {
    Jpeg,
}

impl ImageEncoding {
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageEncoding::Jpeg => "image/jpeg",
        }
    }
}

/// One captured frame. Consumed by exactly one analysis call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub encoding: ImageEncoding,
}

impl CapturedImage {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            encoding: ImageEncoding::Jpeg,
        }
    }
}

/// Produces a still image of the primary display.
pub trait Capturer: Send + Sync {
    fn capture(&self) -> impl Future<Output = Result<CapturedImage, CaptureError>> + Send;
}

/// `xcap`-backed capturer. Capture and encode run on the blocking pool so
/// the event loop keeps servicing overlay events meanwhile.
pub struct ScreenCapturer {
    jpeg_quality: u8,
}

impl ScreenCapturer {
    pub fn new(jpeg_quality: u8) -> Self {
        Self { jpeg_quality }
    }
}

impl Capturer for ScreenCapturer {
    async fn capture(&self) -> Result<CapturedImage, CaptureError> {
        let quality = self.jpeg_quality;

        tokio::task::spawn_blocking(move || {
            let start = Instant::now();

            let screenshot = capture_primary_monitor()?;
            let capture_ms = start.elapsed().as_millis();
            log::info!(
                "[CAPTURE] Screen captured in {}ms ({}x{})",
                capture_ms,
                screenshot.width(),
                screenshot.height()
            );

            let bytes = encode_jpeg(&screenshot, quality)?;
            let encode_ms = start.elapsed().as_millis() - capture_ms;
            log::info!("[CAPTURE] JPEG encoded in {}ms ({} bytes)", encode_ms, bytes.len());

            Ok(CapturedImage::jpeg(bytes))
        })
        .await
        .map_err(|e| CaptureError::Worker(e.to_string()))?
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("Failed to enumerate monitors: {0}")]
    MonitorEnumeration(String),

    #[error("No screen source found")]
    NoMonitor,

    #[error("Screen capture failed: {0}")]
    CaptureFailed(String),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("Capture task failed: {0}")]
    Worker(String),
}
