//! Task and sample orchestration on top of the editor: task creation with
//! its upload queue, sample navigation with save-then-navigate semantics,
//! and the background save pipeline.

pub mod save;
pub mod service;
pub mod task;
pub mod workflow;

pub use save::{SaveEvent, SaveHandle, SaveRuntime, SaveStatus};
pub use service::{InMemoryService, NewSample, SampleService, SampleState, SaveBody};
pub use task::{QueuedFile, Task, TaskStatus, TaskUpload, UploadStatus};
pub use workflow::{
    AnnotationSession, NavKey, NavOutcome, SampleRecord, SessionError, SessionOptions,
};
