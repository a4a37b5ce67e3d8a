use annotation::AnnotationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("no sample loaded")]
    NoSample,

    #[error("unknown annotation id: {0}")]
    UnknownAnnotation(String),

    #[error(transparent)]
    Invalid(#[from] AnnotationError),
}
