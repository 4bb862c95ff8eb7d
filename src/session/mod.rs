pub mod controller;
pub mod state;

pub use controller::VoiceSession;
pub use state::SessionState;
