//! Sample workflow: navigation across a task's samples with
//! save-then-navigate semantics, skip handling, and the save pipeline.
//!
//! Saving captures the wire result at initiation instant and hands it to
//! the background runtime; whatever the user edits afterwards stays in the
//! editor and is simply picked up by the next save (last-write-wins per
//! save initiation). Save responses, success or failure, never roll the
//! editor back.

use std::sync::Arc;
use std::time::Duration;

use annotation::{annotated_count, sample_result, MediaKind, Sample};
use crossbeam_channel::Receiver;
use editor::{Debouncer, Editor, EditorError, SampleDirection};
use thiserror::Error;

use crate::save::{SaveEvent, SaveHandle, SaveRuntime};
use crate::service::{SampleService, SampleState, SaveBody};
use crate::task::Task;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("task has no samples")]
    Empty,

    #[error("unknown sample id: {0}")]
    UnknownSample(u64),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error(transparent)]
    Service(#[from] anyhow::Error),
}

/// Where a navigation attempt ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// Now on this sample.
    Moved(u64),
    /// Next past the last sample: the task run is complete.
    Finished,
    /// Prev at the first sample: nothing happened.
    Boundary,
}

/// Keyboard navigation between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Prev,
    Next,
}

#[derive(Debug, Clone)]
pub struct SampleRecord {
    pub sample: Sample,
    pub state: SampleState,
    pub annotated_count: usize,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Preview sessions never save.
    pub no_save: bool,
    pub nav_debounce: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            no_save: false,
            nav_debounce: Debouncer::DEFAULT_DELAY,
        }
    }
}

pub struct AnnotationSession {
    task: Task,
    media: MediaKind,
    editor: Editor,
    records: Vec<SampleRecord>,
    current: usize,
    no_save: bool,
    service: Arc<dyn SampleService>,
    saves: SaveHandle,
    nav_keys: Debouncer,
}

impl AnnotationSession {
    pub fn new(
        task: Task,
        samples: Vec<Sample>,
        service: Arc<dyn SampleService>,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        if samples.is_empty() {
            return Err(SessionError::Empty);
        }
        let media = task.media;
        let config = task.config.clone().unwrap_or_default();
        let mut editor = Editor::new(config, media);
        editor.load_sample(Some(samples[0].clone()));

        let records = samples
            .into_iter()
            .map(|sample| SampleRecord {
                sample,
                state: SampleState::New,
                annotated_count: 0,
            })
            .collect();

        Ok(Self {
            task,
            media,
            editor,
            records,
            current: 0,
            no_save: options.no_save,
            saves: SaveRuntime::start(service.clone()),
            service,
            nav_keys: Debouncer::new(options.nav_debounce),
        })
    }

    // ---- accessors -------------------------------------------------------

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn current_id(&self) -> u64 {
        self.records[self.current].sample.id
    }

    pub fn current_state(&self) -> SampleState {
        self.records[self.current].state
    }

    /// Receiver of save lifecycle events, for the host's status display.
    pub fn save_events(&self) -> Receiver<SaveEvent> {
        self.saves.rx_events.clone()
    }

    // ---- saving ----------------------------------------------------------

    /// Submit the current sample's annotations for persistence. No-op for
    /// skipped samples and preview sessions. Returns whether a save was
    /// actually submitted.
    pub fn save_current(&mut self) -> Result<bool, SessionError> {
        self.sync_record();
        if self.no_save || self.records[self.current].state == SampleState::Skipped {
            return Ok(false);
        }
        let sample = &self.records[self.current].sample;
        let result = sample_result(sample, self.media);
        let count = annotated_count(&result);
        let body = SaveBody {
            result: serde_json::to_string(&result).map_err(anyhow::Error::from)?,
            annotated_count: count,
            state: SampleState::Done,
        };
        tracing::debug!(sample_id = sample.id, annotated_count = count, "submitting save");
        self.saves.submit(self.task.id, sample.id, body);

        let record = &mut self.records[self.current];
        record.state = SampleState::Done;
        record.annotated_count = count;
        Ok(true)
    }

    // ---- navigation ------------------------------------------------------

    pub fn next(&mut self) -> Result<NavOutcome, SessionError> {
        self.save_current()?;
        if self.current + 1 >= self.records.len() {
            return Ok(NavOutcome::Finished);
        }
        self.move_to(self.current + 1);
        Ok(NavOutcome::Moved(self.current_id()))
    }

    pub fn prev(&mut self) -> Result<NavOutcome, SessionError> {
        if self.current == 0 {
            return Ok(NavOutcome::Boundary);
        }
        self.save_current()?;
        self.move_to(self.current - 1);
        Ok(NavOutcome::Moved(self.current_id()))
    }

    pub fn go_to(&mut self, sample_id: u64) -> Result<NavOutcome, SessionError> {
        let target = self
            .records
            .iter()
            .position(|r| r.sample.id == sample_id)
            .ok_or(SessionError::UnknownSample(sample_id))?;
        if target != self.current {
            self.save_current()?;
            self.move_to(target);
        }
        Ok(NavOutcome::Moved(sample_id))
    }

    /// Handle a sample-changed signal from the editor event bus.
    pub fn dispatch(&mut self, direction: SampleDirection) -> Result<NavOutcome, SessionError> {
        match direction {
            SampleDirection::Next => self.next(),
            SampleDirection::Prev => self.prev(),
            SampleDirection::To(id) => self.go_to(id),
        }
    }

    /// Debounced keyboard navigation (the rapid-fire prev/next keys).
    pub fn handle_nav_key(&mut self, key: NavKey) -> Result<NavOutcome, SessionError> {
        if !self.nav_keys.accept() {
            return Ok(NavOutcome::Boundary);
        }
        match key {
            NavKey::Prev => self.prev(),
            NavKey::Next => self.next(),
        }
    }

    // ---- skip ------------------------------------------------------------

    /// Mark the current sample skipped and advance, without saving it.
    pub fn skip(&mut self) -> Result<NavOutcome, SessionError> {
        if self.no_save {
            return Ok(NavOutcome::Boundary);
        }
        let id = self.current_id();
        self.service
            .update_sample_state(self.task.id, id, SampleState::Skipped)?;
        self.records[self.current].state = SampleState::Skipped;
        self.sync_record();

        if self.current + 1 >= self.records.len() {
            return Ok(NavOutcome::Finished);
        }
        self.move_to(self.current + 1);
        Ok(NavOutcome::Moved(self.current_id()))
    }

    /// Put a skipped sample back into play.
    pub fn cancel_skip(&mut self) -> Result<(), SessionError> {
        if self.no_save {
            return Ok(());
        }
        let id = self.current_id();
        self.service
            .update_sample_state(self.task.id, id, SampleState::New)?;
        self.records[self.current].state = SampleState::New;
        Ok(())
    }

    // ---- internals -------------------------------------------------------

    /// Keep the record's copy of the sample in step with the editor.
    fn sync_record(&mut self) {
        if let Some(sample) = self.editor.sample() {
            self.records[self.current].sample = sample.clone();
        }
    }

    fn move_to(&mut self, target: usize) {
        self.sync_record();
        self.current = target;
        let sample = self.records[target].sample.clone();
        self.editor.load_sample(Some(sample));
    }
}
