//! Task lifecycle and upload bookkeeping for task creation: files are
//! queued, uploaded, then connected to the task as samples exactly once.

use annotation::{EditorConfig, MediaKind};
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::service::{NewSample, SampleService};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum TaskStatus {
    Draft,
    Imported,
    Configured,
    InProgress,
    Finished,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: u64,
    pub name: String,
    pub media: MediaKind,
    pub status: TaskStatus,
    #[serde(default)]
    pub config: Option<EditorConfig>,
}

impl Task {
    pub fn new(id: u64, name: impl Into<String>, media: MediaKind) -> Self {
        Self {
            id,
            name: name.into(),
            media,
            status: TaskStatus::Draft,
            config: None,
        }
    }

    /// Data was imported: a draft task advances, any other status stays.
    pub fn mark_imported(&mut self) {
        if self.status == TaskStatus::Draft {
            self.status = TaskStatus::Imported;
        }
    }

    pub fn configure(&mut self, config: EditorConfig) {
        self.config = Some(config);
        self.status = TaskStatus::Configured;
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UploadStatus {
    Queued,
    Uploading,
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QueuedFile {
    pub id: u64,
    pub name: String,
    pub url: String,
    pub status: UploadStatus,
}

/// Upload queue of a task being created.
#[derive(Default)]
pub struct TaskUpload {
    files: Vec<QueuedFile>,
    created_sample_ids: Vec<u64>,
    connected: bool,
}

impl TaskUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, file: QueuedFile) {
        self.files.push(file);
    }

    pub fn set_status(&mut self, file_id: u64, status: UploadStatus) {
        if let Some(file) = self.files.iter_mut().find(|f| f.id == file_id) {
            file.status = status;
        }
    }

    pub fn files(&self) -> &[QueuedFile] {
        &self.files
    }

    pub fn successful(&self) -> impl Iterator<Item = &QueuedFile> {
        self.files
            .iter()
            .filter(|f| f.status == UploadStatus::Success)
    }

    /// Create samples for the successfully uploaded files. Guarded so that
    /// leaving and re-entering the upload step does not create them twice.
    pub fn connect(&mut self, service: &dyn SampleService, task: &mut Task) -> Result<Vec<u64>> {
        if self.connected {
            return Ok(Vec::new());
        }
        let new_samples: Vec<NewSample> = self
            .successful()
            .map(|file| NewSample {
                attachment_id: file.id,
                file_name: file.name.clone(),
                url: file.url.clone(),
            })
            .collect();
        if new_samples.is_empty() {
            return Ok(Vec::new());
        }
        let ids = service.create_samples(task.id, &new_samples)?;
        self.created_sample_ids.extend(&ids);
        self.connected = true;
        task.mark_imported();
        Ok(ids)
    }

    /// Abort task creation: delete the samples created from this queue.
    pub fn cancel(&mut self, service: &dyn SampleService, task: &Task) -> Result<()> {
        if !self.created_sample_ids.is_empty() {
            service.delete_samples(task.id, &self.created_sample_ids)?;
            self.created_sample_ids.clear();
        }
        self.connected = false;
        Ok(())
    }
}
