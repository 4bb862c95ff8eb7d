use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::device::AudioFragment;

/// Audio collected during one capture session, finalized into a single blob
#[derive(Debug, Clone)]
pub struct CapturedAudio {
    /// Concatenated fragment bytes, in arrival order
    pub payload: Vec<u8>,
    /// Number of fragments that arrived before the device closed
    pub fragment_count: usize,
}

impl CapturedAudio {
    pub fn is_empty(&self) -> bool {
        self.fragment_count == 0
    }
}

/// Accumulates fragments from an open capture device
///
/// Exists only while the session is recording. A collector task appends
/// fragments in arrival order; `finalize` waits for the device's sender to
/// drop (the device was closed) and concatenates everything into one
/// immutable payload.
pub struct CaptureSession {
    fragments: Arc<Mutex<Vec<AudioFragment>>>,
    collector: JoinHandle<()>,
}

impl CaptureSession {
    /// Start collecting from a freshly opened device channel
    pub fn begin(mut rx: mpsc::Receiver<AudioFragment>) -> Self {
        let fragments = Arc::new(Mutex::new(Vec::new()));

        let collected = Arc::clone(&fragments);
        let collector = tokio::spawn(async move {
            while let Some(fragment) = rx.recv().await {
                let mut fragments = collected.lock().await;
                fragments.push(fragment);
            }
        });

        Self {
            fragments,
            collector,
        }
    }

    /// Wait for the channel to drain and concatenate fragments into one payload
    ///
    /// The caller must close the device first, otherwise this waits for more
    /// fragments indefinitely.
    pub async fn finalize(self) -> CapturedAudio {
        if let Err(e) = self.collector.await {
            error!("Fragment collector task panicked: {}", e);
        }

        let fragments = self.fragments.lock().await;
        let fragment_count = fragments.len();
        let payload: Vec<u8> = fragments
            .iter()
            .flat_map(|f| f.bytes.iter().copied())
            .collect();

        info!(
            "Capture finalized: {} fragments, {} bytes",
            fragment_count,
            payload.len()
        );

        CapturedAudio {
            payload,
            fragment_count,
        }
    }
}
