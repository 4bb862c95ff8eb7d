use serde::Serialize;

/// Controller state, the sole gate for start/stop signals
///
/// Single-flight enforcement lives here: no second capture or request can
/// begin while the machine is in `Recording` or `Uploading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    Recording,
    Uploading,
    Error,
}

impl SessionState {
    /// The UI-facing busy signal, derived solely from the state value
    pub fn is_busy(&self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// A start signal is honored from Idle and from Error (Error is not sticky)
    pub fn accepts_start(&self) -> bool {
        matches!(self, Self::Idle | Self::Error)
    }

    /// A stop signal is honored only while recording
    pub fn accepts_stop(&self) -> bool {
        matches!(self, Self::Recording)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Uploading => "uploading",
            Self::Error => "error",
        }
    }
}
