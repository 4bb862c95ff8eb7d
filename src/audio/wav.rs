use std::io::Cursor;
use std::path::PathBuf;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tokio::sync::mpsc;
use tracing::info;

use super::device::{AudioCaptureDevice, AudioFragment};
use crate::error::{Result, SessionError};

/// File-backed capture device
///
/// Stands in for a live microphone: opens a WAV file, normalizes it to
/// mono 16-bit at the target sample rate, re-encodes it as one in-memory
/// WAV blob and emits that blob over the fragment channel in fixed-size
/// ordered fragments. A missing or unreadable file maps to
/// `DeviceUnavailable`, the same failure a denied microphone permission
/// would produce.
pub struct WavFileDevice {
    path: PathBuf,
    target_sample_rate: u32,
    fragment_bytes: usize,
    open: bool,
}

impl WavFileDevice {
    pub fn new(path: impl Into<PathBuf>, target_sample_rate: u32, fragment_bytes: usize) -> Self {
        Self {
            path: path.into(),
            target_sample_rate,
            fragment_bytes: fragment_bytes.max(1),
            open: false,
        }
    }

    fn load_normalized(&self) -> Result<Vec<u8>> {
        let reader = WavReader::open(&self.path).map_err(|e| {
            SessionError::DeviceUnavailable(format!(
                "cannot open {}: {}",
                self.path.display(),
                e
            ))
        })?;

        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
            return Err(SessionError::DeviceUnavailable(format!(
                "unsupported WAV format: {:?} {}-bit",
                spec.sample_format, spec.bits_per_sample
            )));
        }

        let samples: Vec<i16> = reader
            .into_samples::<i16>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| {
                SessionError::DeviceUnavailable(format!("failed to read samples: {}", e))
            })?;

        let mono = stereo_to_mono(samples, spec.channels);
        let resampled = downsample(mono, spec.sample_rate, self.target_sample_rate)?;

        encode_wav(&resampled, self.target_sample_rate)
    }
}

#[async_trait::async_trait]
impl AudioCaptureDevice for WavFileDevice {
    async fn open(&mut self) -> Result<mpsc::Receiver<AudioFragment>> {
        let blob = self.load_normalized()?;
        self.open = true;

        info!(
            "WAV file device opened: {} ({} bytes normalized)",
            self.path.display(),
            blob.len()
        );

        let fragment_bytes = self.fragment_bytes;
        // Bytes per millisecond of mono 16-bit audio at the target rate
        let bytes_per_ms = ((self.target_sample_rate as u64 * 2) / 1000).max(1);
        let (tx, rx) = mpsc::channel(32);

        // Emit the blob as ordered fixed-size fragments, then drop the
        // sender so the session's collector drains cleanly.
        tokio::spawn(async move {
            for (i, chunk) in blob.chunks(fragment_bytes).enumerate() {
                let fragment = AudioFragment {
                    bytes: chunk.to_vec(),
                    timestamp_ms: (i as u64 * fragment_bytes as u64) / bytes_per_ms,
                };

                if tx.send(fragment).await.is_err() {
                    break;
                }
            }
        });

        Ok(rx)
    }

    async fn close(&mut self) -> Result<()> {
        self.open = false;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn name(&self) -> &str {
        "wav-file"
    }
}

/// Convert stereo to mono by summing channels
fn stereo_to_mono(samples: Vec<i16>, channels: u16) -> Vec<i16> {
    if channels != 2 {
        return samples;
    }

    let mut mono = Vec::with_capacity(samples.len() / 2);
    for chunk in samples.chunks_exact(2) {
        let sum = chunk[0] as i32 + chunk[1] as i32;
        mono.push(sum.clamp(i16::MIN as i32, i16::MAX as i32) as i16);
    }

    mono
}

/// Downsample by decimation
///
/// Only integer rate ratios are supported; anything else would be
/// re-encoded with a header that lies about the rate, so it is rejected.
fn downsample(samples: Vec<i16>, source_rate: u32, target_rate: u32) -> Result<Vec<i16>> {
    if source_rate == target_rate {
        return Ok(samples);
    }

    if source_rate < target_rate || source_rate % target_rate != 0 {
        return Err(SessionError::DeviceUnavailable(format!(
            "unsupported sample rate {} Hz (target {} Hz)",
            source_rate, target_rate
        )));
    }

    let ratio = (source_rate / target_rate) as usize;
    Ok(samples.iter().step_by(ratio).copied().collect())
}

/// Encode mono 16-bit samples as an in-memory WAV blob
fn encode_wav(samples: &[i16], sample_rate: u32) -> Result<Vec<u8>> {
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, spec)
            .map_err(|e| SessionError::DeviceUnavailable(format!("WAV encode failed: {}", e)))?;

        for &sample in samples {
            writer.write_sample(sample).map_err(|e| {
                SessionError::DeviceUnavailable(format!("WAV encode failed: {}", e))
            })?;
        }

        writer
            .finalize()
            .map_err(|e| SessionError::DeviceUnavailable(format!("WAV encode failed: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
