//! Background save runtime.
//!
//! Saves are fire-and-forget: the caller hands over an owned, already
//! serialized body and keeps editing. A worker thread pushes requests to
//! the service in submission order, so a later save supersedes an earlier
//! one at the backend; responses never touch editor state. There is no
//! cancellation of in-flight saves.

use std::sync::Arc;
use std::thread;

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::service::{SampleService, SaveBody};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveStatus {
    Pending,
    Done,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEvent {
    pub sample_id: u64,
    pub status: SaveStatus,
}

struct SaveRequest {
    task_id: u64,
    sample_id: u64,
    body: SaveBody,
}

#[derive(Clone)]
pub struct SaveHandle {
    tx_submit: Sender<SaveRequest>,
    tx_events: Sender<SaveEvent>,
    pub rx_events: Receiver<SaveEvent>,
}

pub struct SaveRuntime;

impl SaveRuntime {
    /// Spawn the worker. The worker exits once every handle is dropped.
    pub fn start(service: Arc<dyn SampleService>) -> SaveHandle {
        let (tx_submit, rx_submit) = unbounded::<SaveRequest>();
        let (tx_events, rx_events) = unbounded::<SaveEvent>();

        let tx_worker_events = tx_events.clone();
        thread::spawn(move || {
            while let Ok(request) = rx_submit.recv() {
                let status = match service.update_annotation_result(
                    request.task_id,
                    request.sample_id,
                    &request.body,
                ) {
                    Ok(()) => {
                        tracing::debug!(sample_id = request.sample_id, "save done");
                        SaveStatus::Done
                    }
                    Err(error) => {
                        tracing::warn!(sample_id = request.sample_id, %error, "save failed");
                        SaveStatus::Failed(error.to_string())
                    }
                };
                let _ = tx_worker_events.send(SaveEvent {
                    sample_id: request.sample_id,
                    status,
                });
            }
        });

        SaveHandle {
            tx_submit,
            tx_events,
            rx_events,
        }
    }
}

impl SaveHandle {
    pub fn submit(&self, task_id: u64, sample_id: u64, body: SaveBody) {
        let _ = self.tx_events.send(SaveEvent {
            sample_id,
            status: SaveStatus::Pending,
        });
        let _ = self.tx_submit.send(SaveRequest {
            task_id,
            sample_id,
            body,
        });
    }
}
