use career_readiness::assessment::{AssessmentScores, AssessmentStore, SessionId, StoreError};
use career_readiness::config::StoreConfig;
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::warn;

const MAX_KEY_LEN: usize = 128;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAssessmentStore {
    records: Arc<Mutex<HashMap<SessionId, AssessmentScores>>>,
}

impl AssessmentStore for InMemoryAssessmentStore {
    fn load(&self, session: &SessionId) -> Result<Option<AssessmentScores>, StoreError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        Ok(guard.get(session).cloned())
    }

    fn save(&self, session: &SessionId, scores: &AssessmentScores) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|_| StoreError::Unavailable("store mutex poisoned".to_string()))?;
        guard.insert(session.clone(), scores.clone());
        Ok(())
    }
}

/// On-disk record: the category scores plus when they were written.
#[derive(Debug, Serialize, Deserialize)]
struct StoredResult {
    saved_at: DateTime<Utc>,
    scores: AssessmentScores,
}

/// One JSON file per session under a root directory.
#[derive(Debug, Clone)]
pub(crate) struct FileAssessmentStore {
    root: PathBuf,
}

impl FileAssessmentStore {
    pub(crate) fn open(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path_for(&self, session: &SessionId) -> Result<PathBuf, StoreError> {
        let key = session.0.as_str();
        let valid = !key.is_empty()
            && key.len() <= MAX_KEY_LEN
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl AssessmentStore for FileAssessmentStore {
    fn load(&self, session: &SessionId) -> Result<Option<AssessmentScores>, StoreError> {
        let path = self.path_for(session)?;
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Unavailable(err.to_string())),
        };

        let stored: StoredResult = serde_json::from_str(&raw).map_err(|err| {
            warn!(session = %session, path = %path.display(), "stored result unreadable");
            StoreError::Corrupt {
                session: session.0.clone(),
                reason: err.to_string(),
            }
        })?;
        Ok(Some(stored.scores))
    }

    fn save(&self, session: &SessionId, scores: &AssessmentScores) -> Result<(), StoreError> {
        let path = self.path_for(session)?;
        let record = StoredResult {
            saved_at: Utc::now(),
            scores: scores.clone(),
        };
        let json = serde_json::to_vec_pretty(&record)
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json).map_err(|err| StoreError::Unavailable(err.to_string()))?;
        fs::rename(&staging, &path).map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}

/// Store selected by `APP_STORE_PATH`.
#[derive(Clone)]
pub(crate) enum ConfiguredStore {
    Memory(InMemoryAssessmentStore),
    File(FileAssessmentStore),
}

impl ConfiguredStore {
    pub(crate) fn from_config(config: &StoreConfig) -> std::io::Result<Self> {
        match &config.path {
            Some(path) => Ok(Self::File(FileAssessmentStore::open(path)?)),
            None => Ok(Self::Memory(InMemoryAssessmentStore::default())),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match self {
            Self::Memory(_) => "in-memory".to_string(),
            Self::File(store) => format!("files under {}", store.root.display()),
        }
    }
}

impl AssessmentStore for ConfiguredStore {
    fn load(&self, session: &SessionId) -> Result<Option<AssessmentScores>, StoreError> {
        match self {
            Self::Memory(store) => store.load(session),
            Self::File(store) => store.load(session),
        }
    }

    fn save(&self, session: &SessionId, scores: &AssessmentScores) -> Result<(), StoreError> {
        match self {
            Self::Memory(store) => store.save(session, scores),
            Self::File(store) => store.save(session, scores),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use career_readiness::assessment::{AptitudeResult, ReadinessDimension, TraitCategory};

    fn sample_scores() -> AssessmentScores {
        let mut scores = AssessmentScores::default();
        scores.psychometric.insert(TraitCategory::Persistence, 4.5);
        scores.technical = AptitudeResult::from_sections(100.0, 50.0, 66.0);
        scores.wiscar.insert(ReadinessDimension::Will, 85.0);
        scores
    }

    #[test]
    fn file_store_round_trips_scores() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileAssessmentStore::open(dir.path()).expect("store opens");
        let session = SessionId::primary();

        assert_eq!(store.load(&session).expect("load succeeds"), None);

        store.save(&session, &sample_scores()).expect("save succeeds");
        let loaded = store.load(&session).expect("load succeeds");
        assert_eq!(loaded, Some(sample_scores()));

        let raw = fs::read_to_string(dir.path().join("assessmentData.json")).expect("file written");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("json file");
        assert!(value.get("saved_at").is_some());
        assert!(value["scores"].get("overallScore").is_none());
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileAssessmentStore::open(dir.path()).expect("store opens");

        for key in ["../escape", "", "a/b", "dot.json"] {
            match store.load(&SessionId(key.to_string())) {
                Err(StoreError::InvalidKey(rejected)) => assert_eq!(rejected, key),
                other => panic!("expected invalid key for {key:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn file_store_reports_corrupt_records() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileAssessmentStore::open(dir.path()).expect("store opens");
        fs::write(dir.path().join("broken.json"), "{ not json").expect("write fixture");

        assert!(matches!(
            store.load(&SessionId("broken".to_string())),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn configured_store_defaults_to_memory() {
        let store = ConfiguredStore::from_config(&StoreConfig { path: None }).expect("memory store");
        assert_eq!(store.describe(), "in-memory");

        let session = SessionId("memory".to_string());
        store.save(&session, &sample_scores()).expect("save succeeds");
        assert_eq!(store.load(&session).expect("load succeeds"), Some(sample_scores()));
    }
}
