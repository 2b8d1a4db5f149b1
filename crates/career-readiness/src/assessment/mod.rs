//! Career readiness assessment: three scored instruments, the weighted
//! composite, the recommendation, and role matching.
//!
//! Answers flow through an [`AssessmentSession`]; submitting a session
//! persists its category scores through an [`AssessmentStore`], and every
//! read recomputes the overall score and recommendation from them.

pub mod content;
pub mod domain;
pub mod report;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod session;

#[cfg(test)]
mod tests;

pub use content::{question_bank, AnswerKey, AptitudeItem, InstrumentView, QuestionView};
pub use domain::{
    unanswered_policy, AnswerSubmission, AnswerValue, AptitudeQuiz, AptitudeSection, Averaged,
    Graded, GradedInstrument, Instrument, InstrumentKind, InstrumentProgress, LikertInstrument,
    QuestionId, ReadinessDimension, ReadinessSurvey, ResponseError, ResponseSet, ScoringRule,
    TraitCategory, TraitSurvey, UnansweredPolicy,
};
pub use report::{AssessmentReport, CategoryScoreView, LearningStage, LEARNING_PATH};
pub use repository::{AssessmentStore, SessionId, StoreError};
pub use router::assessment_router;
pub use scoring::{
    evaluate, AptitudeResult, AssessmentResult, AssessmentScores, Recommendation, RoleMatch,
    ScoreBand,
};
pub use service::{AssessmentService, AssessmentServiceError, DEFAULT_IDLE_TIMEOUT};
pub use session::{AssessmentSession, InstrumentSnapshot, SessionView};
