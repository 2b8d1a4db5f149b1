use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::assessment::content::{aptitude_items, readiness_prompts, trait_prompts, AnswerKey};
use crate::assessment::domain::{
    AnswerSubmission, AnswerValue, AptitudeSection, InstrumentKind, QuestionId,
    ReadinessDimension, TraitCategory,
};
use crate::assessment::repository::{AssessmentStore, SessionId, StoreError};
use crate::assessment::scoring::AssessmentScores;
use crate::assessment::{assessment_router, AssessmentService};

pub(super) fn build_service() -> (AssessmentService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = AssessmentService::new(store.clone());
    (service, store)
}

pub(super) fn assessment_router_with_service(
    service: AssessmentService<MemoryStore>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) fn session() -> SessionId {
    SessionId("candidate-42".to_string())
}

pub(super) fn likert(instrument: InstrumentKind, question_id: &str, value: f64) -> AnswerSubmission {
    AnswerSubmission {
        instrument,
        question_id: question_id.to_string(),
        value: AnswerValue::Number(value),
    }
}

pub(super) fn entry(question_id: &str, raw: &str) -> AnswerSubmission {
    AnswerSubmission {
        instrument: InstrumentKind::Technical,
        question_id: question_id.to_string(),
        value: AnswerValue::Entry(raw.to_string()),
    }
}

/// Every psychometric question answered with the same Likert point.
pub(super) fn uniform_trait_answers(value: f64) -> Vec<AnswerSubmission> {
    TraitCategory::ALL
        .iter()
        .flat_map(|category| {
            (0..trait_prompts(*category).len()).map(move |index| {
                likert(
                    InstrumentKind::Psychometric,
                    QuestionId::new(category.key(), index).as_str(),
                    value,
                )
            })
        })
        .collect()
}

/// Every readiness question answered with `values`, cycling per dimension.
pub(super) fn readiness_answers(values: &[f64]) -> Vec<AnswerSubmission> {
    ReadinessDimension::ALL
        .iter()
        .flat_map(|dimension| {
            (0..readiness_prompts(*dimension).len()).map(move |index| {
                likert(
                    InstrumentKind::Wiscar,
                    QuestionId::new(dimension.key(), index).as_str(),
                    values[index % values.len()],
                )
            })
        })
        .collect()
}

/// The correct answer for every multiple-choice item and nothing else.
pub(super) fn correct_choice_answers() -> Vec<AnswerSubmission> {
    AptitudeSection::ALL
        .iter()
        .flat_map(|section| {
            aptitude_items(*section)
                .iter()
                .enumerate()
                .filter_map(move |(index, item)| match item.key {
                    AnswerKey::Choice { correct } => Some(likert(
                        InstrumentKind::Technical,
                        QuestionId::new(section.key(), index).as_str(),
                        correct as f64,
                    )),
                    AnswerKey::Numeric { .. } => None,
                })
        })
        .collect()
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<SessionId, AssessmentScores>>>,
}

impl MemoryStore {
    pub(super) fn saved(&self, session: &SessionId) -> Option<AssessmentScores> {
        self.records
            .lock()
            .expect("store mutex poisoned")
            .get(session)
            .cloned()
    }
}

impl AssessmentStore for MemoryStore {
    fn load(&self, session: &SessionId) -> Result<Option<AssessmentScores>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(session).cloned())
    }

    fn save(&self, session: &SessionId, scores: &AssessmentScores) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(session.clone(), scores.clone());
        Ok(())
    }
}

/// Reads find nothing; every write fails.
pub(super) struct FailingWriteStore;

impl AssessmentStore for FailingWriteStore {
    fn load(&self, _session: &SessionId) -> Result<Option<AssessmentScores>, StoreError> {
        Ok(None)
    }

    fn save(&self, _session: &SessionId, _scores: &AssessmentScores) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
