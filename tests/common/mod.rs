// Shared mock collaborators for the integration tests.
//
// The controller takes its capture device, transport and playback output by
// injection, so tests script each one and observe what the state machine did.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use speak_coach::error::Result;
use speak_coach::{
    AnalysisResult, AnalysisTransport, AudioCaptureDevice, AudioFragment, AudioOutput,
    DecodedAudio, InteractionParameters, LanguageAnalysis, PronunciationReport, SessionError,
};

/// Capture device that emits a scripted fragment sequence
pub struct MockDevice {
    fragments: Vec<Vec<u8>>,
    fail_open: bool,
    open: bool,
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicBool>,
}

impl MockDevice {
    pub fn with_fragments(fragments: Vec<Vec<u8>>) -> Self {
        Self {
            fragments,
            fail_open: false,
            open: false,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn silent() -> Self {
        Self::with_fragments(Vec::new())
    }

    pub fn unavailable() -> Self {
        let mut device = Self::silent();
        device.fail_open = true;
        device
    }
}

#[async_trait::async_trait]
impl AudioCaptureDevice for MockDevice {
    async fn open(&mut self) -> Result<mpsc::Receiver<AudioFragment>> {
        if self.fail_open {
            return Err(SessionError::DeviceUnavailable(
                "permission denied".to_string(),
            ));
        }

        self.opened.fetch_add(1, Ordering::SeqCst);
        self.closed.store(false, Ordering::SeqCst);
        self.open = true;

        let fragments = self.fragments.clone();
        let (tx, rx) = mpsc::channel(32);

        tokio::spawn(async move {
            for (i, bytes) in fragments.into_iter().enumerate() {
                let fragment = AudioFragment {
                    bytes,
                    timestamp_ms: i as u64 * 100,
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
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// What the scripted transport should do with a request
#[derive(Clone)]
pub enum TransportScript {
    Succeed(AnalysisResult),
    FailRequest,
    FailMalformed,
}

/// Transport that plays back a script per request and records every payload
///
/// Scripts are consumed front to back; the last one repeats once the
/// sequence is exhausted.
pub struct MockTransport {
    scripts: Mutex<Vec<TransportScript>>,
    pub requests: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockTransport {
    pub fn new(script: TransportScript) -> Self {
        Self::sequence(vec![script])
    }

    pub fn sequence(scripts: Vec<TransportScript>) -> Self {
        assert!(!scripts.is_empty());
        Self {
            scripts: Mutex::new(scripts),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl AnalysisTransport for MockTransport {
    async fn send(
        &self,
        audio: Vec<u8>,
        _params: &InteractionParameters,
    ) -> Result<AnalysisResult> {
        self.requests.lock().unwrap().push(audio);

        let script = {
            let mut scripts = self.scripts.lock().unwrap();
            if scripts.len() > 1 {
                scripts.remove(0)
            } else {
                scripts[0].clone()
            }
        };

        match script {
            TransportScript::Succeed(result) => Ok(result),
            TransportScript::FailRequest => Err(SessionError::RequestFailed(
                "analysis service returned 500 Internal Server Error".to_string(),
            )),
            TransportScript::FailMalformed => Err(SessionError::MalformedResponse(
                "missing field `transcript`".to_string(),
            )),
        }
    }
}

/// Output sink that counts plays instead of producing sound
#[derive(Default)]
pub struct CountingOutput {
    pub played: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl AudioOutput for CountingOutput {
    async fn play(&self, _audio: DecodedAudio) -> Result<()> {
        self.played.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// A complete well-formed analysis result without reply audio
pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        transcript: "I have went there".to_string(),
        analysis: LanguageAnalysis {
            corrected_sentence: "I went there".to_string(),
            learning_tip: "Use the simple past for finished actions.".to_string(),
            follow_up_question: "Where did you go?".to_string(),
        },
        pronunciation: PronunciationReport {
            score: 62.0,
            feedback: "Work on the th sounds.".to_string(),
            problematic_phonemes: vec!["θ".to_string(), "ð".to_string()],
        },
        audio_base64: None,
    }
}
