pub mod audio;
pub mod client;
pub mod config;
pub mod error;
pub mod feedback;
pub mod playback;
pub mod session;

pub use audio::{
    AudioCaptureDevice, AudioFragment, CaptureSession, CapturedAudio, WavFileDevice,
};
pub use client::{
    AnalysisRequestClient, AnalysisResult, AnalysisTransport, EndpointResolver, FixedEndpoint,
    InteractionParameters, LanguageAnalysis, PronunciationReport,
};
pub use config::{Config, Environment};
pub use error::SessionError;
pub use feedback::{render_feedback, FeedbackView, PronunciationTier};
pub use playback::{AudioOutput, DecodedAudio, NullOutput, PlaybackAgent};
pub use session::{SessionState, VoiceSession};
