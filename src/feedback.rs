use serde::Serialize;

use crate::client::AnalysisResult;

/// Presentation tier for the pronunciation score
///
/// Used only for visual emphasis, never for control decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PronunciationTier {
    /// score >= 85
    Strong,
    /// 70 <= score < 85
    Developing,
    /// score < 70
    NeedsWork,
}

impl PronunciationTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            Self::Strong
        } else if score >= 70.0 {
            Self::Developing
        } else {
            Self::NeedsWork
        }
    }
}

/// Display model for one analysis result
#[derive(Debug, Clone, Serialize)]
pub struct FeedbackView {
    pub transcript: String,

    /// None when the corrected sentence matches the transcript verbatim;
    /// the comparison is plain string equality, not a semantic diff
    pub correction: Option<String>,

    pub learning_tip: String,
    pub follow_up_question: String,

    /// Score rounded for display
    pub score: u32,
    pub tier: PronunciationTier,
    pub pronunciation_feedback: String,

    /// Phoneme chips to practice; empty means the section is suppressed
    pub phonemes: Vec<String>,
}

impl FeedbackView {
    pub fn shows_correction(&self) -> bool {
        self.correction.is_some()
    }

    pub fn shows_phonemes(&self) -> bool {
        !self.phonemes.is_empty()
    }
}

/// Map an analysis result into its display model
///
/// Pure function of the response data, no side effects.
pub fn render_feedback(result: &AnalysisResult) -> FeedbackView {
    let correction = if result.analysis.corrected_sentence == result.transcript {
        None
    } else {
        Some(result.analysis.corrected_sentence.clone())
    };

    FeedbackView {
        transcript: result.transcript.clone(),
        correction,
        learning_tip: result.analysis.learning_tip.clone(),
        follow_up_question: result.analysis.follow_up_question.clone(),
        score: result.pronunciation.score.round().max(0.0) as u32,
        tier: PronunciationTier::from_score(result.pronunciation.score),
        pronunciation_feedback: result.pronunciation.feedback.clone(),
        phonemes: result.pronunciation.problematic_phonemes.clone(),
    }
}
