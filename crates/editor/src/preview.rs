//! Cross-frame preview bridge.
//!
//! The task-configuration page embeds the annotation page in a preview
//! frame. Host and frame exchange typed message envelopes over an owned
//! channel pair; exactly one channel is live per mount, and remounting
//! drops the old pair before creating a new one. The frame posts `ready`
//! once loaded and the host replies with a single `preview` message
//! carrying the tool configuration and current annotations.

use annotation::{Annotation, EditorConfig, MediaKind, ToolKind};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use serde::{Deserialize, Serialize};

/// Message envelope posted across the frame boundary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "payload", rename_all = "lowercase")]
pub enum PreviewMessage {
    Ready,
    Preview(PreviewPayload),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreviewPayload {
    pub config: serde_json::Value,
    pub annotations: Vec<Annotation>,
}

/// Frame half of the channel pair, handed to the embedded preview.
pub struct FrameEndpoint {
    to_host: Sender<PreviewMessage>,
    from_host: Receiver<PreviewMessage>,
}

impl FrameEndpoint {
    pub fn post_ready(&self) {
        let _ = self.to_host.send(PreviewMessage::Ready);
    }

    pub fn try_recv(&self) -> Option<PreviewMessage> {
        self.from_host.try_recv().ok()
    }
}

/// Host half. Dropping it tears the channel down; the frame endpoint then
/// observes a disconnected channel.
pub struct PreviewBridge {
    to_frame: Sender<PreviewMessage>,
    from_frame: Receiver<PreviewMessage>,
}

impl PreviewBridge {
    /// Create the channel pair for a fresh mount.
    pub fn mount() -> (PreviewBridge, FrameEndpoint) {
        let (to_frame, from_host) = unbounded();
        let (to_host, from_frame) = unbounded();
        (
            PreviewBridge { to_frame, from_frame },
            FrameEndpoint { to_host, from_host },
        )
    }

    /// Drain frame messages; on `ready`, serialize the current state and
    /// post one `preview` back. Returns how many previews were posted.
    pub fn pump(
        &self,
        config: &EditorConfig,
        media: MediaKind,
        annotations: &[Annotation],
    ) -> usize {
        let mut posted = 0;
        loop {
            match self.from_frame.try_recv() {
                Ok(PreviewMessage::Ready) => {
                    let payload = PreviewPayload {
                        config: preview_config(config, media),
                        annotations: annotations.to_vec(),
                    };
                    if self.to_frame.send(PreviewMessage::Preview(payload)).is_ok() {
                        posted += 1;
                    }
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        posted
    }
}

/// One-way transform of the editor config into the preview's tool list.
/// Video media renames the generic timed tools to their video buckets;
/// everything else keeps its generic name.
pub fn preview_config(config: &EditorConfig, media: MediaKind) -> serde_json::Value {
    let mut tools = Vec::new();
    for kind in [ToolKind::Tag, ToolKind::Text, ToolKind::Frame, ToolKind::Segment] {
        let Some(tool) = config.tool(kind) else {
            continue;
        };
        let name = match (kind, media) {
            (ToolKind::Frame, MediaKind::Video) => "videoFrameTool".to_string(),
            (ToolKind::Segment, MediaKind::Video) => "videoSegmentTool".to_string(),
            (ToolKind::Tag, _) => "tagTool".to_string(),
            (ToolKind::Text, _) => "textTool".to_string(),
            (ToolKind::Frame, _) => "frame".to_string(),
            (ToolKind::Segment, _) => "segment".to_string(),
        };
        tools.push(serde_json::json!({
            "tool": name,
            "config": tool,
        }));
    }
    serde_json::json!({ "tools": tools })
}
