use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AnnotationError {
    #[error("duplicate annotation id: {0}")]
    DuplicateId(String),
    #[error("segment {id}: start {start} is after end {end}")]
    InvertedSegment { id: String, start: f64, end: f64 },
    #[error("annotation {id}: time {time} is outside media duration {duration}")]
    TimeOutOfRange { id: String, time: f64, duration: f64 },
}

/// Attribute values filled in by the annotator, keyed by attribute key.
pub type AttributeValues = HashMap<String, serde_json::Value>;

/// The annotation kind a tool produces.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    Tag,
    Text,
    Frame,
    Segment,
}

/// Media type of the sample under annotation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

fn default_visible() -> bool {
    true
}

/// A single labeled region within a sample.
///
/// `tag` and `text` are global overlays; `frame` marks a point in time and
/// `segment` a time interval. The `visible` flag is transient UI state and
/// is stripped before persistence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Annotation {
    #[serde(rename = "tag")]
    Tag {
        id: String,
        #[serde(default)]
        values: AttributeValues,
        order: u32,
    },

    #[serde(rename = "text")]
    Text {
        id: String,
        #[serde(default)]
        values: AttributeValues,
        order: u32,
    },

    #[serde(rename = "frame")]
    Frame {
        id: String,
        time: f64,
        label: String,
        #[serde(default)]
        attributes: AttributeValues,
        order: u32,
        #[serde(default = "default_visible")]
        visible: bool,
    },

    #[serde(rename = "segment")]
    Segment {
        id: String,
        start: f64,
        end: f64,
        label: String,
        #[serde(default)]
        attributes: AttributeValues,
        order: u32,
        #[serde(default = "default_visible")]
        visible: bool,
    },
}

impl Annotation {
    pub fn id(&self) -> &str {
        match self {
            Annotation::Tag { id, .. }
            | Annotation::Text { id, .. }
            | Annotation::Frame { id, .. }
            | Annotation::Segment { id, .. } => id,
        }
    }

    pub fn order(&self) -> u32 {
        match self {
            Annotation::Tag { order, .. }
            | Annotation::Text { order, .. }
            | Annotation::Frame { order, .. }
            | Annotation::Segment { order, .. } => *order,
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Annotation::Tag { .. } => ToolKind::Tag,
            Annotation::Text { .. } => ToolKind::Text,
            Annotation::Frame { .. } => ToolKind::Frame,
            Annotation::Segment { .. } => ToolKind::Segment,
        }
    }

    /// Label (attribute key) of a timed annotation. Tag/text overlays carry
    /// free-form values instead of a label.
    pub fn label(&self) -> Option<&str> {
        match self {
            Annotation::Frame { label, .. } | Annotation::Segment { label, .. } => Some(label),
            _ => None,
        }
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, Annotation::Frame { .. } | Annotation::Segment { .. })
    }

    /// Playback position associated with this annotation: the point in time
    /// of a frame, the start of a segment.
    pub fn anchor_time(&self) -> Option<f64> {
        match self {
            Annotation::Frame { time, .. } => Some(*time),
            Annotation::Segment { start, .. } => Some(*start),
            _ => None,
        }
    }

    pub fn attribute_values(&self) -> &AttributeValues {
        match self {
            Annotation::Tag { values, .. } | Annotation::Text { values, .. } => values,
            Annotation::Frame { attributes, .. } | Annotation::Segment { attributes, .. } => {
                attributes
            }
        }
    }

    /// Replace this annotation's attribute values wholesale.
    pub fn set_attribute_values(&mut self, new_values: AttributeValues) {
        match self {
            Annotation::Tag { values, .. } | Annotation::Text { values, .. } => {
                *values = new_values
            }
            Annotation::Frame { attributes, .. } | Annotation::Segment { attributes, .. } => {
                *attributes = new_values
            }
        }
    }

    /// Re-label a timed annotation, dropping attribute values that belonged
    /// to the previous label. No-op on tag/text overlays.
    pub fn set_label(&mut self, new_label: &str) {
        match self {
            Annotation::Frame {
                label, attributes, ..
            }
            | Annotation::Segment {
                label, attributes, ..
            } => {
                *label = new_label.to_string();
                attributes.clear();
            }
            _ => {}
        }
    }

    pub fn visible(&self) -> bool {
        match self {
            Annotation::Frame { visible, .. } | Annotation::Segment { visible, .. } => *visible,
            _ => true,
        }
    }

    pub fn set_visible(&mut self, value: bool) {
        if let Annotation::Frame { visible, .. } | Annotation::Segment { visible, .. } = self {
            *visible = value;
        }
    }

    /// Check temporal bounds against the media duration, when known.
    pub fn validate(&self, duration: Option<f64>) -> Result<(), AnnotationError> {
        match self {
            Annotation::Segment { id, start, end, .. } => {
                if start > end {
                    return Err(AnnotationError::InvertedSegment {
                        id: id.clone(),
                        start: *start,
                        end: *end,
                    });
                }
                if let Some(d) = duration {
                    if *end > d {
                        return Err(AnnotationError::TimeOutOfRange {
                            id: id.clone(),
                            time: *end,
                            duration: d,
                        });
                    }
                }
            }
            Annotation::Frame { id, time, .. } => {
                if let Some(d) = duration {
                    if *time > d || *time < 0.0 {
                        return Err(AnnotationError::TimeOutOfRange {
                            id: id.clone(),
                            time: *time,
                            duration: d,
                        });
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }
}

pub fn new_annotation_id() -> String {
    Uuid::new_v4().to_string()
}

/// One media unit under annotation. Replaced wholesale when the user
/// navigates to another sample; history snapshots are full copies of it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sample {
    pub id: u64,
    pub url: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

impl Sample {
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            annotations: Vec::new(),
        }
    }

    /// Validate every annotation plus id uniqueness across the sample.
    pub fn validate(&self, duration: Option<f64>) -> Result<(), AnnotationError> {
        let mut seen = HashSet::new();
        for annotation in &self.annotations {
            if !seen.insert(annotation.id()) {
                return Err(AnnotationError::DuplicateId(annotation.id().to_string()));
            }
            annotation.validate(duration)?;
        }
        Ok(())
    }

    pub fn next_order(&self) -> u32 {
        self.annotations
            .iter()
            .map(|a| a.order() + 1)
            .max()
            .unwrap_or(1)
    }
}
