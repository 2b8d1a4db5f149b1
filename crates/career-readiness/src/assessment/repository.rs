use std::fmt;

use serde::{Deserialize, Serialize};

use super::scoring::AssessmentScores;

/// Key under which a candidate's result is stored.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Fixed key used when a deployment serves a single candidate at a time.
    pub const PRIMARY: &'static str = "assessmentData";

    pub fn primary() -> Self {
        Self(Self::PRIMARY.to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::primary()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key-value boundary for submitted results. Only category scores cross it;
/// overall score and recommendation are recomputed after every load.
pub trait AssessmentStore: Send + Sync {
    fn load(&self, session: &SessionId) -> Result<Option<AssessmentScores>, StoreError>;
    fn save(&self, session: &SessionId, scores: &AssessmentScores) -> Result<(), StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session id '{0}' cannot be used as a storage key")]
    InvalidKey(String),
    #[error("stored result for '{session}' is unreadable: {reason}")]
    Corrupt { session: String, reason: String },
    #[error("result store unavailable: {0}")]
    Unavailable(String),
}
