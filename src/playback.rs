use std::io::Cursor;

use base64::Engine;
use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use tracing::info;

use crate::error::{Result, SessionError};

/// PCM audio decoded from the synthesized reply (16-bit, interleaved)
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    pub samples: Vec<i16>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl DecodedAudio {
    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64)
    }
}

/// Output sink for decoded reply audio
#[async_trait::async_trait]
pub trait AudioOutput: Send + Sync {
    async fn play(&self, audio: DecodedAudio) -> Result<()>;
}

/// Output sink that logs instead of driving hardware
///
/// Used by the CLI and tests; real deployments inject a platform sink.
#[derive(Default)]
pub struct NullOutput;

#[async_trait::async_trait]
impl AudioOutput for NullOutput {
    async fn play(&self, audio: DecodedAudio) -> Result<()> {
        info!(
            "Reply audio: {:.1}s, {}Hz, {} channels (no output device configured)",
            audio.duration_seconds(),
            audio.sample_rate,
            audio.channels
        );
        Ok(())
    }
}

/// Decodes the base64 reply payload and plays it through an injected sink
///
/// Playback is a side effect of a successful upload, not a session state:
/// failures here are reported to the caller for logging but never feed back
/// into the state machine.
pub struct PlaybackAgent {
    output: Box<dyn AudioOutput>,
}

impl PlaybackAgent {
    pub fn new(output: Box<dyn AudioOutput>) -> Self {
        Self { output }
    }

    /// Decode a base64 payload and begin playback immediately
    pub async fn play_base64(&self, payload: &str) -> Result<()> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| SessionError::PlaybackFailed(format!("invalid base64: {}", e)))?;

        let audio = decode_reply(bytes)?;
        self.output.play(audio).await
    }
}

/// Decode encoded reply bytes (MP3 from the TTS service, WAV in tests) to PCM
fn decode_reply(bytes: Vec<u8>) -> Result<DecodedAudio> {
    let stream = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| SessionError::PlaybackFailed(format!("unrecognized audio: {}", e)))?;

    let mut format = probed.format;

    let track = format
        .default_track()
        .ok_or_else(|| SessionError::PlaybackFailed("no audio track".to_string()))?;
    let track_id = track.id;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| SessionError::PlaybackFailed(format!("unsupported codec: {}", e)))?;

    let mut samples: Vec<i16> = Vec::new();
    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(0);
    let mut channels = track
        .codec_params
        .channels
        .map(|c| c.count() as u16)
        .unwrap_or(1);

    while let Ok(packet) = format.next_packet() {
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                channels = spec.channels.count() as u16;

                let mut buffer = SampleBuffer::<i16>::new(decoded.capacity() as u64, spec);
                buffer.copy_interleaved_ref(decoded);
                samples.extend_from_slice(buffer.samples());
            }
            // Skip undecodable packets; the payload fails below if nothing decoded
            Err(_) => continue,
        }
    }

    if samples.is_empty() || sample_rate == 0 {
        return Err(SessionError::PlaybackFailed(
            "payload contained no decodable audio".to_string(),
        ));
    }

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}
