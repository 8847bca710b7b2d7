use thiserror::Error;

/// One source type for everything a collaborator can throw at us.
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("detection input length mismatch: {boxes} boxes, {confidences} confidences, {classes} classes")]
    LengthMismatch {
        boxes: usize,
        confidences: usize,
        classes: usize,
    },

    #[error("frame has a zero dimension: {width}x{height}")]
    EmptyFrame { width: u32, height: u32 },

    #[error("feature extractor returned {got} features for {expected} crops")]
    FeatureCount { expected: usize, got: usize },

    #[error("suppression returned index {index} out of range for {len} detections")]
    SuppressionIndex { index: usize, len: usize },

    #[error("feature extractor error: {0}")]
    Embedder(#[source] CollaboratorError),

    #[error("suppressor error: {0}")]
    Suppressor(#[source] CollaboratorError),

    #[error("tracker error: {0}")]
    Tracker(#[source] CollaboratorError),
}
