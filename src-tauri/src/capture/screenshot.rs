//! Full-screen capture using the `xcap` crate.
//!
//! Talks to the OS through xcap; everything else in capture/ is pure.

use super::CaptureError;
use image::DynamicImage;
use xcap::Monitor;

/// Captures the primary monitor's screen as a `DynamicImage`.
///
/// Falls back to the first enumerated monitor when none reports itself as
/// primary (common on some Linux compositors).
pub fn capture_primary_monitor() -> Result<DynamicImage, CaptureError> {
    let monitors = Monitor::all().map_err(|e| CaptureError::MonitorEnumeration(e.to_string()))?;

    let primary_index = monitors
        .iter()
        .position(|m| m.is_primary().unwrap_or(false))
        .unwrap_or_else(|| {
            log::warn!("[CAPTURE] No monitor reports as primary, using the first source");
            0
        });

    let monitor = monitors
        .into_iter()
        .nth(primary_index)
        .ok_or(CaptureError::NoMonitor)?;

    let image = monitor
        .capture_image()
        .map_err(|e| CaptureError::CaptureFailed(e.to_string()))?;

    Ok(DynamicImage::ImageRgba8(image))
}
