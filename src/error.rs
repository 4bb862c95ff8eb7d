use thiserror::Error;

/// Error taxonomy for the voice interaction session.
///
/// None of these are fatal to the process: every variant leaves the session
/// in a state from which the user can start a fresh capture.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Microphone permission denied or no capture hardware present
    #[error("Capture device unavailable: {0}")]
    DeviceUnavailable(String),

    /// Recording stopped before any audio fragment arrived
    #[error("No audio captured")]
    EmptyCapture,

    /// Transport failure or non-success HTTP status from the analysis service
    #[error("Analysis request failed: {0}")]
    RequestFailed(String),

    /// Response body did not match the expected schema
    #[error("Malformed analysis response: {0}")]
    MalformedResponse(String),

    /// Reply audio could not be decoded or played (non-fatal)
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),
}

/// Convenience Result type using SessionError
pub type Result<T> = std::result::Result<T, SessionError>;
