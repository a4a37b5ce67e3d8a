//! The opaque backend boundary. The workflow only needs these four calls;
//! what sits behind them (REST, local store) is the host's concern.

use std::collections::HashMap;

use anyhow::Result;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a sample within a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SampleState {
    New,
    Skipped,
    Done,
}

/// A sample to create from an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSample {
    pub attachment_id: u64,
    pub file_name: String,
    pub url: String,
}

/// Body of an annotation-result save: the serialized wire result captured
/// at save-initiation instant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaveBody {
    pub result: String,
    pub annotated_count: usize,
    pub state: SampleState,
}

pub trait SampleService: Send + Sync {
    /// Create samples under a task, returning their assigned ids in order.
    fn create_samples(&self, task_id: u64, samples: &[NewSample]) -> Result<Vec<u64>>;

    fn update_sample_state(&self, task_id: u64, sample_id: u64, state: SampleState) -> Result<()>;

    fn update_annotation_result(&self, task_id: u64, sample_id: u64, body: &SaveBody)
        -> Result<()>;

    fn delete_samples(&self, task_id: u64, sample_ids: &[u64]) -> Result<()>;
}

#[derive(Default)]
struct InMemoryInner {
    next_id: u64,
    states: HashMap<u64, SampleState>,
    results: HashMap<u64, SaveBody>,
    deleted: Vec<u64>,
    save_calls: usize,
    fail_saves: bool,
}

/// Test/offline implementation keeping everything in a map.
#[derive(Default)]
pub struct InMemoryService {
    inner: Mutex<InMemoryInner>,
}

impl InMemoryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent saves reject, for failure-path tests.
    pub fn fail_saves(&self, fail: bool) {
        self.inner.lock().fail_saves = fail;
    }

    pub fn result_for(&self, sample_id: u64) -> Option<SaveBody> {
        self.inner.lock().results.get(&sample_id).cloned()
    }

    pub fn state_for(&self, sample_id: u64) -> Option<SampleState> {
        self.inner.lock().states.get(&sample_id).copied()
    }

    pub fn deleted(&self) -> Vec<u64> {
        self.inner.lock().deleted.clone()
    }

    pub fn save_calls(&self) -> usize {
        self.inner.lock().save_calls
    }
}

impl SampleService for InMemoryService {
    fn create_samples(&self, _task_id: u64, samples: &[NewSample]) -> Result<Vec<u64>> {
        let mut inner = self.inner.lock();
        let mut ids = Vec::with_capacity(samples.len());
        for _ in samples {
            inner.next_id += 1;
            let id = inner.next_id;
            inner.states.insert(id, SampleState::New);
            ids.push(id);
        }
        Ok(ids)
    }

    fn update_sample_state(&self, _task_id: u64, sample_id: u64, state: SampleState) -> Result<()> {
        self.inner.lock().states.insert(sample_id, state);
        Ok(())
    }

    fn update_annotation_result(
        &self,
        _task_id: u64,
        sample_id: u64,
        body: &SaveBody,
    ) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.save_calls += 1;
        if inner.fail_saves {
            anyhow::bail!("save rejected");
        }
        inner.states.insert(sample_id, body.state);
        inner.results.insert(sample_id, body.clone());
        Ok(())
    }

    fn delete_samples(&self, _task_id: u64, sample_ids: &[u64]) -> Result<()> {
        let mut inner = self.inner.lock();
        for id in sample_ids {
            inner.states.remove(id);
            inner.results.remove(id);
            inner.deleted.push(*id);
        }
        Ok(())
    }
}
