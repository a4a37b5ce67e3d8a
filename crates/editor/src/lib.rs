//! Annotation editor core: sample ownership, bounded snapshot undo/redo,
//! selection and tool state, and the bridges that keep the media player
//! and the embedded preview frame in sync.
//!
//! ```text
//! Editor (owns the active Sample)
//! ├── History          bounded past/future snapshot stacks
//! ├── SelectionState   selected annotation + active tool/label
//! ├── PlayerBridge     pass-through to player & timeline widget
//! ├── EventBus         sample-changed / annotate-end signals
//! └── derived views    id lookup map, order-sorted timed sequence
//! ```
//!
//! All editor state is single-threaded; only the channels in
//! [`events`] and [`preview`] cross thread or frame boundaries.

mod error;
mod events;
mod history;
mod keyboard;
mod player;
mod preview;
mod selection;
mod store;

pub use error::EditorError;
pub use events::{EditorEvent, EventBus, SampleDirection};
pub use history::History;
pub use keyboard::{Debouncer, KeyCommand};
pub use player::{MediaPlayer, PlayerBridge, TimelineView};
pub use preview::{preview_config, FrameEndpoint, PreviewBridge, PreviewMessage, PreviewPayload};
pub use selection::SelectionState;
pub use store::{Editor, EditorOptions};
