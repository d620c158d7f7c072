//! Request lifecycle stages.

use std::fmt;

/// Stage of a single request.
///
/// A request moves strictly forward through
/// `Start -> Retrieving -> PromptBuilt -> Generating -> Done`. Any failure
/// ends it in `Failed`; no stage is revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Retrieving,
    PromptBuilt,
    Generating,
    Done,
    Failed,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Retrieving => "retrieving",
            Self::PromptBuilt => "prompt_built",
            Self::Generating => "generating",
            Self::Done => "done",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
