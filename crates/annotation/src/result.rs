use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Annotation, MediaKind, Sample, ToolKind};

/// One tool bucket of the persisted result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ToolResult {
    pub tool_name: String,
    pub result: Vec<serde_json::Value>,
}

/// The per-sample wire object, keyed by tool bucket name.
pub type AnnotationResult = BTreeMap<String, ToolResult>;

/// Bucket an annotation kind maps to for the given media. Timed kinds have
/// no bucket on image media.
pub fn bucket_name(media: MediaKind, kind: ToolKind) -> Option<&'static str> {
    match (kind, media) {
        (ToolKind::Tag, _) => Some("tagTool"),
        (ToolKind::Text, _) => Some("textTool"),
        (ToolKind::Frame, MediaKind::Video) => Some("videoFrameTool"),
        (ToolKind::Segment, MediaKind::Video) => Some("videoSegmentTool"),
        (ToolKind::Frame, MediaKind::Audio) => Some("audioFrameTool"),
        (ToolKind::Segment, MediaKind::Audio) => Some("audioSegmentTool"),
        (_, MediaKind::Image) => None,
    }
}

/// Serialize one annotation for persistence, stripping the transient
/// `type` discriminant and `visible` flag.
fn wire_record(annotation: &Annotation) -> serde_json::Value {
    let mut value = serde_json::to_value(annotation).unwrap_or_default();
    if let Some(object) = value.as_object_mut() {
        object.remove("type");
        object.remove("visible");
    }
    value
}

/// Group a sample's annotations into tool buckets, preserving their order
/// within each bucket.
pub fn sample_result(sample: &Sample, media: MediaKind) -> AnnotationResult {
    let mut result = AnnotationResult::new();
    for annotation in &sample.annotations {
        let Some(name) = bucket_name(media, annotation.kind()) else {
            continue;
        };
        result
            .entry(name.to_string())
            .or_insert_with(|| ToolResult {
                tool_name: name.to_string(),
                result: Vec::new(),
            })
            .result
            .push(wire_record(annotation));
    }
    result
}

/// Number of timed annotations in a result. Counts `result` array lengths
/// of the non-global buckets; the legacy shape where the bucket itself was
/// the array is not honored.
pub fn annotated_count(result: &AnnotationResult) -> usize {
    result
        .iter()
        .filter(|(name, _)| {
            name.contains("Tool") && name.as_str() != "tagTool" && name.as_str() != "textTool"
        })
        .map(|(_, tool)| tool.result.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AttributeValues;

    fn sample() -> Sample {
        let mut sample = Sample::new(7, "a.mp3");
        sample.annotations = vec![
            Annotation::Segment {
                id: "s1".to_string(),
                start: 1.0,
                end: 2.0,
                label: "speech".to_string(),
                attributes: AttributeValues::new(),
                order: 1,
                visible: false,
            },
            Annotation::Frame {
                id: "f1".to_string(),
                time: 3.0,
                label: "beep".to_string(),
                attributes: AttributeValues::new(),
                order: 2,
                visible: true,
            },
            Annotation::Tag {
                id: "t1".to_string(),
                values: AttributeValues::new(),
                order: 3,
            },
        ];
        sample
    }

    #[test]
    fn buckets_follow_media_kind() {
        assert_eq!(
            bucket_name(MediaKind::Audio, ToolKind::Segment),
            Some("audioSegmentTool")
        );
        assert_eq!(
            bucket_name(MediaKind::Video, ToolKind::Segment),
            Some("videoSegmentTool")
        );
        assert_eq!(bucket_name(MediaKind::Image, ToolKind::Frame), None);
        assert_eq!(bucket_name(MediaKind::Image, ToolKind::Tag), Some("tagTool"));
    }

    #[test]
    fn wire_records_drop_transient_fields() {
        let result = sample_result(&sample(), MediaKind::Audio);
        let segment = &result["audioSegmentTool"].result[0];
        assert!(segment.get("type").is_none());
        assert!(segment.get("visible").is_none());
        assert_eq!(segment["start"], 1.0);
        assert_eq!(segment["label"], "speech");
    }

    #[test]
    fn buckets_group_by_tool() {
        let result = sample_result(&sample(), MediaKind::Audio);
        assert_eq!(result["audioSegmentTool"].result.len(), 1);
        assert_eq!(result["audioFrameTool"].result.len(), 1);
        assert_eq!(result["tagTool"].result.len(), 1);
        assert_eq!(result["audioFrameTool"].tool_name, "audioFrameTool");
    }

    #[test]
    fn annotated_count_ignores_global_tools() {
        let result = sample_result(&sample(), MediaKind::Audio);
        assert_eq!(annotated_count(&result), 2);
    }

    #[test]
    fn empty_sample_serializes_to_empty_object() {
        let sample = Sample::new(1, "a.mp3");
        let result = sample_result(&sample, MediaKind::Video);
        assert!(result.is_empty());
        assert_eq!(serde_json::to_string(&result).unwrap(), "{}");
    }
}
