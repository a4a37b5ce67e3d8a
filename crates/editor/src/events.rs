//! Application-level signals the surrounding UI observes, delivered over a
//! publish/subscribe channel rather than direct calls.

use annotation::Annotation;
use crossbeam_channel::{unbounded, Receiver, Sender};

/// Where a sample navigation request points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleDirection {
    Next,
    Prev,
    To(u64),
}

#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The user asked to move to another sample.
    SampleChanged(SampleDirection),
    /// A new annotation was just finished, with the originating pointer
    /// position when one exists.
    AnnotateEnd {
        annotation: Annotation,
        pointer: Option<(f32, f32)>,
    },
}

/// Fan-out bus: every subscriber gets its own unbounded receiver; dropped
/// receivers are pruned on the next emit.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Sender<EditorEvent>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<EditorEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    pub fn emit(&mut self, event: EditorEvent) {
        self.subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }
}
