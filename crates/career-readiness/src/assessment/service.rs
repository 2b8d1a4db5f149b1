use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::domain::{AnswerSubmission, ResponseError};
use super::report::AssessmentReport;
use super::repository::{AssessmentStore, SessionId, StoreError};
use super::scoring::{evaluate, AptitudeResult, AssessmentResult};
use super::session::{AssessmentSession, InstrumentSnapshot, SessionView};

/// Unsubmitted sessions untouched for this long are dropped.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(2 * 60 * 60);

struct OpenSession {
    session: AssessmentSession,
    last_active: Instant,
}

/// Service composing in-progress sessions, the scoring engine, and the result store.
///
/// A session lives in memory from its first accepted answer until its scores
/// are saved. After that the store is the only record of it.
pub struct AssessmentService<S> {
    store: Arc<S>,
    sessions: Mutex<HashMap<SessionId, OpenSession>>,
    idle_timeout: Duration,
}

impl<S> AssessmentService<S>
where
    S: AssessmentStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self::with_idle_timeout(store, DEFAULT_IDLE_TIMEOUT)
    }

    pub fn with_idle_timeout(store: Arc<S>, idle_timeout: Duration) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Record one answer. The first valid answer for an id starts its session.
    pub fn record_answer(
        &self,
        session_id: &SessionId,
        answer: &AnswerSubmission,
    ) -> Result<InstrumentSnapshot, AssessmentServiceError> {
        let known = self.sessions().contains_key(session_id);
        if !known && self.store.load(session_id)?.is_some() {
            return Err(AssessmentServiceError::AlreadySubmitted(session_id.clone()));
        }

        let now = Instant::now();
        let mut sessions = self.sessions();
        let snapshot = match sessions.get_mut(session_id) {
            Some(open) if open.session.is_submitted() => {
                return Err(AssessmentServiceError::AlreadySubmitted(session_id.clone()));
            }
            Some(open) => {
                let snapshot = open.session.apply(answer)?;
                open.last_active = now;
                snapshot
            }
            None => {
                let mut session = AssessmentSession::new();
                let snapshot = session.apply(answer)?;
                self.evict_idle(&mut sessions, now);
                sessions.insert(
                    session_id.clone(),
                    OpenSession {
                        session,
                        last_active: now,
                    },
                );
                snapshot
            }
        };

        debug!(
            session = %session_id,
            instrument = %answer.instrument,
            question = %answer.question_id,
            "answer recorded"
        );
        Ok(snapshot)
    }

    /// Grade the aptitude quiz for a session. This is the only path that
    /// updates the aptitude result.
    pub fn calculate_aptitude(
        &self,
        session_id: &SessionId,
    ) -> Result<AptitudeResult, AssessmentServiceError> {
        {
            let mut sessions = self.sessions();
            if let Some(open) = sessions.get_mut(session_id) {
                if open.session.is_submitted() {
                    return Err(AssessmentServiceError::AlreadySubmitted(session_id.clone()));
                }
                open.last_active = Instant::now();
                return Ok(open.session.calculate_aptitude());
            }
        }
        Err(self.not_open(session_id))
    }

    /// Combine the session's scores, save the category scores, then drop the
    /// session. The session is locked while the save runs and reopened if the
    /// save fails. The store is never called with the session map held.
    pub fn submit(&self, session_id: &SessionId) -> Result<AssessmentResult, AssessmentServiceError> {
        let claimed = {
            let mut sessions = self.sessions();
            match sessions.get_mut(session_id) {
                Some(open) if open.session.is_submitted() => {
                    return Err(AssessmentServiceError::AlreadySubmitted(session_id.clone()));
                }
                Some(open) => Some(open.session.finalize()),
                None => None,
            }
        };
        let Some(scores) = claimed else {
            return Err(self.not_open(session_id));
        };

        let result = evaluate(&scores);
        if let Err(err) = self.store.save(session_id, &result.scores) {
            if let Some(open) = self.sessions().get_mut(session_id) {
                open.session.reopen();
            }
            warn!(session = %session_id, error = %err, "saving result failed; session reopened");
            return Err(err.into());
        }

        let open_sessions = {
            let mut sessions = self.sessions();
            sessions.remove(session_id);
            sessions.len()
        };
        info!(
            session = %session_id,
            overall_score = result.overall_score,
            recommendation = result.recommendation.label(),
            open_sessions,
            "assessment submitted"
        );
        Ok(result)
    }

    /// Load saved category scores and rebuild the full report from them.
    pub fn results(&self, session_id: &SessionId) -> Result<AssessmentReport, AssessmentServiceError> {
        let Some(scores) = self.store.load(session_id)? else {
            warn!(session = %session_id, "no saved result; session incomplete");
            return Err(AssessmentServiceError::MissingResult(session_id.clone()));
        };

        let report = AssessmentReport::build(&scores);
        info!(
            session = %session_id,
            overall_percent = report.overall_percent,
            recommendation = report.recommendation.label(),
            "assessment results read"
        );
        Ok(report)
    }

    /// Live scores and progress for a session that is still in progress.
    pub fn session(&self, session_id: &SessionId) -> Option<SessionView> {
        self.sessions()
            .get(session_id)
            .map(|open| open.session.view())
    }

    /// Why a session id has no open session: its result is already saved, or
    /// it never recorded an answer.
    fn not_open(&self, session_id: &SessionId) -> AssessmentServiceError {
        match self.store.load(session_id) {
            Ok(Some(_)) => AssessmentServiceError::AlreadySubmitted(session_id.clone()),
            Ok(None) => AssessmentServiceError::NotStarted(session_id.clone()),
            Err(err) => err.into(),
        }
    }

    fn evict_idle(&self, sessions: &mut HashMap<SessionId, OpenSession>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, open| {
            open.session.is_submitted() || now.duration_since(open.last_active) < self.idle_timeout
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "idle sessions dropped");
        }
    }

    fn sessions(&self) -> MutexGuard<'_, HashMap<SessionId, OpenSession>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("no assessment result saved for session '{0}'")]
    MissingResult(SessionId),
    #[error("session '{0}' has not recorded any answers")]
    NotStarted(SessionId),
    #[error("session '{0}' was already submitted")]
    AlreadySubmitted(SessionId),
}
