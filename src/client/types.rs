use serde::{Deserialize, Serialize};

/// Parameters for one analysis request, supplied by external collaborators
/// (personality/voice selectors, auth provider) and never mutated here
#[derive(Debug, Clone)]
pub struct InteractionParameters {
    /// Tutor style id (opaque, validated by the backend)
    pub personality: String,

    /// Proficiency tier id (opaque)
    pub user_level: String,

    /// Optional playback voice override
    pub voice_id: Option<String>,

    /// Optional bearer credential; anonymous requests are permitted
    pub auth_token: Option<String>,
}

impl Default for InteractionParameters {
    fn default() -> Self {
        Self {
            personality: "friendly".to_string(),
            user_level: "intermediate".to_string(),
            voice_id: None,
            auth_token: None,
        }
    }
}

/// Grammar analysis produced by the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageAnalysis {
    pub corrected_sentence: String,
    pub learning_tip: String,
    pub follow_up_question: String,
}

/// Pronunciation scoring derived from word-level confidences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronunciationReport {
    /// 0-100
    pub score: f64,

    pub feedback: String,

    /// Phonemes the learner should practice; empty suppresses the section
    #[serde(default)]
    pub problematic_phonemes: Vec<String>,
}

/// Full response for one uploaded utterance
///
/// Immutable once received; the controller replaces it wholesale on the
/// next successful request. Unknown extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub transcript: String,
    pub analysis: LanguageAnalysis,
    pub pronunciation: PronunciationReport,

    /// Synthesized voice reply, base64-encoded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
}
