pub mod capture;
pub mod device;
pub mod wav;

pub use capture::{CaptureSession, CapturedAudio};
pub use device::{AudioCaptureDevice, AudioFragment};
pub use wav::WavFileDevice;
