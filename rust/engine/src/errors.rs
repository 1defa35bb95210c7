use thiserror::Error;

/// Which of the three recorded sequences a replay call reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStream {
    Doubles,
    Ints,
    IntRanges,
}

impl std::fmt::Display for ReplayStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ReplayStream::Doubles => "Doubles",
            ReplayStream::Ints => "Ints",
            ReplayStream::IntRanges => "IntRanges",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("Replay log exhausted: {stream}")]
    ReplayExhausted { stream: ReplayStream },
    #[error(
        "Replay log mismatch: expected ({requested_min},{requested_max}), got ({recorded_min},{recorded_max})"
    )]
    ReplayMismatch {
        requested_min: i32,
        requested_max: i32,
        recorded_min: i32,
        recorded_max: i32,
    },
    #[error("Replay log mismatch: expected a value below {max}, got {value}")]
    ReplayOutOfBounds { max: i32, value: i32 },
    #[error("Invalid range: min {min} exceeds max {max}")]
    InvalidRange { min: i32, max: i32 },
    #[error("No {role} available on the field")]
    MissingPlayer { role: &'static str },
    #[error("Invalid play state: {0}")]
    InvalidPlayState(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed replay log: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SimError {
    /// True for the two structural replay failures that end a run.
    pub fn is_replay_divergence(&self) -> bool {
        matches!(
            self,
            SimError::ReplayExhausted { .. }
                | SimError::ReplayMismatch { .. }
                | SimError::ReplayOutOfBounds { .. }
        )
    }
}
