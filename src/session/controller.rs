use std::sync::Arc;

use tracing::{error, info, warn};

use super::state::SessionState;
use crate::audio::{AudioCaptureDevice, CaptureSession};
use crate::client::{AnalysisTransport, InteractionParameters};
use crate::error::{Result, SessionError};
use crate::feedback::{render_feedback, FeedbackView};
use crate::playback::PlaybackAgent;

/// The voice interaction session controller
///
/// Owns the capture lifecycle, at most one in-flight analysis request,
/// response rendering and reply playback. Capture, transport and playback
/// collaborators are injected so the controller never reaches into platform
/// globals.
pub struct VoiceSession {
    device: Box<dyn AudioCaptureDevice>,
    transport: Arc<dyn AnalysisTransport>,
    playback: PlaybackAgent,

    state: SessionState,

    /// Exists only while state is Recording or transitioning out of it
    capture: Option<CaptureSession>,

    /// Result of the last successful upload, replaced wholesale each time
    feedback: Option<FeedbackView>,
}

impl VoiceSession {
    pub fn new(
        device: Box<dyn AudioCaptureDevice>,
        transport: Arc<dyn AnalysisTransport>,
        playback: PlaybackAgent,
    ) -> Self {
        Self {
            device,
            transport,
            playback,
            state: SessionState::Idle,
            capture: None,
            feedback: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Display model from the last successful interaction, if any
    pub fn feedback(&self) -> Option<&FeedbackView> {
        self.feedback.as_ref()
    }

    /// Begin a new capture session
    ///
    /// No-op unless the state accepts a start signal. On `DeviceUnavailable`
    /// the state is left where it was (Idle stays Idle, Error stays Error)
    /// and the error surfaces to the caller without retry.
    pub async fn start(&mut self) -> Result<()> {
        if !self.state.accepts_start() {
            warn!(
                "Ignoring start signal in state '{}'",
                self.state.label()
            );
            return Ok(());
        }

        let rx = match self.device.open().await {
            Ok(rx) => rx,
            Err(e) => {
                error!("Capture device failed to open: {}", e);
                return Err(e);
            }
        };

        self.capture = Some(CaptureSession::begin(rx));
        self.state = SessionState::Recording;

        info!("Recording started on device '{}'", self.device.name());

        Ok(())
    }

    /// Stop capture, upload the finalized audio, render the response
    ///
    /// No-op unless recording. The device is released on every path out of
    /// Recording, including the empty-capture one. Reply playback failures
    /// are logged and never affect the state transition.
    pub async fn stop(&mut self, params: InteractionParameters) -> Result<()> {
        if !self.state.accepts_stop() {
            warn!("Ignoring stop signal in state '{}'", self.state.label());
            return Ok(());
        }

        self.state = SessionState::Uploading;

        // Release the microphone before anything else can fail
        if let Err(e) = self.device.close().await {
            warn!("Capture device close failed: {}", e);
        }

        let Some(capture) = self.capture.take() else {
            // Recording state without a capture session is unreachable by
            // construction; recover as an empty capture.
            self.state = SessionState::Error;
            return Err(SessionError::EmptyCapture);
        };

        let captured = capture.finalize().await;
        if captured.is_empty() {
            info!("Stop with no captured fragments, skipping upload");
            self.feedback = None;
            self.state = SessionState::Error;
            return Err(SessionError::EmptyCapture);
        }

        match self.transport.send(captured.payload, &params).await {
            Ok(result) => {
                let view = render_feedback(&result);

                if let Some(payload) = &result.audio_base64 {
                    if let Err(e) = self.playback.play_base64(payload).await {
                        warn!("Reply playback failed: {}", e);
                    }
                }

                self.feedback = Some(view);
                self.state = SessionState::Idle;

                info!("Interaction complete, session idle");

                Ok(())
            }
            Err(e) => {
                error!("Upload failed: {}", e);
                self.feedback = None;
                self.state = SessionState::Error;
                Err(e)
            }
        }
    }
}
