//! Data model for media annotation: annotation records, the labeling
//! schema, and the wire result format persisted per sample.

mod model;
mod result;
mod schema;

pub use model::{
    new_annotation_id, Annotation, AnnotationError, AttributeValues, MediaKind, Sample, ToolKind,
};
pub use result::{annotated_count, bucket_name, sample_result, AnnotationResult, ToolResult};
pub use schema::{
    default_attribute_values, AttributeDef, AttributeOption, EditorConfig, LabelConfig,
    LabelMapping, ToolConfig,
};
