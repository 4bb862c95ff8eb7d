use tokio::sync::mpsc;

use crate::error::Result;

/// One encoded audio fragment emitted by a capture device
#[derive(Debug, Clone)]
pub struct AudioFragment {
    /// Encoded audio bytes (already containerized by the device)
    pub bytes: Vec<u8>,
    /// Milliseconds since capture started
    pub timestamp_ms: u64,
}

/// Microphone-style capture device
///
/// Concrete implementations map their platform callback APIs onto this
/// contract: `open` starts delivering fragments on the returned channel in
/// arrival order, `close` stops the hardware and drops the sender so the
/// channel drains cleanly. `close` must be safe to call even when no
/// fragments were ever delivered.
#[async_trait::async_trait]
pub trait AudioCaptureDevice: Send + Sync {
    /// Request device access and start capture
    ///
    /// Fails with `DeviceUnavailable` when permission is denied or no
    /// capture hardware exists.
    async fn open(&mut self) -> Result<mpsc::Receiver<AudioFragment>>;

    /// Stop capture and release the device
    async fn close(&mut self) -> Result<()>;

    /// Check if the device is currently capturing
    fn is_open(&self) -> bool;

    /// Get device name for logging
    fn name(&self) -> &str;
}
