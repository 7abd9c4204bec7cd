//! Step narration for test reports

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::error::ScreenplayError;
use crate::interaction::StepKind;

/// A step as seen by narrators
#[derive(Debug, Clone, Copy)]
pub struct StepEvent<'a> {
    pub actor: &'a str,
    pub description: &'a str,
    pub kind: StepKind,
    pub depth: usize,
}

/// Observer told about every step an actor attempts and every question it asks.
///
/// Narrators only watch. Nothing they do changes what the actor runs or
/// what it returns.
pub trait Narrator: Send {
    fn on_step_started(&mut self, step: &StepEvent<'_>);

    fn on_step_finished(
        &mut self,
        step: &StepEvent<'_>,
        elapsed: Duration,
        error: Option<&ScreenplayError>,
    );
}

/// One narrated step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub actor: String,
    pub description: String,
    pub kind: StepKind,
    pub depth: usize,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct JournalState {
    records: Vec<StepRecord>,
    /// Per actor, indices into `records` of steps still running, innermost last
    open: HashMap<String, Vec<usize>>,
}

/// A narrator that keeps every step in memory.
///
/// Clones share the same records, so a test can hand one clone to the
/// actor and read the other afterwards. Records are kept in the order
/// steps started. Several actors may share one journal; finished steps
/// are matched to the open step of the actor with the same name.
#[derive(Clone, Default)]
pub struct Journal {
    state: Arc<Mutex<JournalState>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every record so far
    pub fn records(&self) -> Vec<StepRecord> {
        self.state.lock().records.clone()
    }

    /// Descriptions of every record so far, in start order
    pub fn descriptions(&self) -> Vec<String> {
        self.state
            .lock()
            .records
            .iter()
            .map(|r| r.description.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }

    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.records.clear();
        state.open.clear();
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.state.lock().records)
    }

    /// Write `journal.json` into `dir`, creating it if needed
    pub fn write_json(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;

        let path = dir.join("journal.json");
        std::fs::write(&path, self.to_json()?)?;

        tracing::info!("Journal written to: {}", path.display());
        Ok(path)
    }
}

impl Narrator for Journal {
    fn on_step_started(&mut self, step: &StepEvent<'_>) {
        let mut state = self.state.lock();
        let index = state.records.len();
        state.records.push(StepRecord {
            actor: step.actor.to_string(),
            description: step.description.to_string(),
            kind: step.kind,
            depth: step.depth,
            started_at: Utc::now(),
            duration_ms: 0,
            success: false,
            error: None,
        });
        state
            .open
            .entry(step.actor.to_string())
            .or_default()
            .push(index);
    }

    fn on_step_finished(
        &mut self,
        step: &StepEvent<'_>,
        elapsed: Duration,
        error: Option<&ScreenplayError>,
    ) {
        let mut state = self.state.lock();
        let Some(index) = state.open.get_mut(step.actor).and_then(|open| open.pop()) else {
            return;
        };
        if let Some(record) = state.records.get_mut(index) {
            record.duration_ms = elapsed.as_millis() as u64;
            record.success = error.is_none();
            record.error = error.map(|e| e.to_string());
        }
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("records", &self.len())
            .finish()
    }
}
