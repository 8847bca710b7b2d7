pub mod bbox;
pub mod detection;
pub mod embedder;
pub mod error;
pub mod frame;
pub mod output;
pub mod pipeline;
pub mod suppression;

mod track;

pub use detection::Detection;
pub use error::Error;
pub use frame::Frame;
pub use output::{EmissionPolicy, OutputRecord};
pub use pipeline::{Pipeline, PipelineConfig};
pub use track::Track;

use error::CollaboratorError;

/// Stateful multi object tracker collaborator. It owns the whole
/// cross-frame track table; the pipeline only drives its predict/update
/// cycle and reads the live tracks back.
///
/// `predict` advances motion state for every track with no detections in
/// hand; `update` runs association and the lifecycle transitions (create,
/// confirm, age, delete). Both are opaque, synchronous and side-effecting.
/// Calls per instance must be serialized, which `&mut self` enforces.
pub trait Tracking {
    fn predict(&mut self);
    fn update(&mut self, detections: &[Detection]) -> Result<(), CollaboratorError>;
    fn tracks(&self) -> &[Track];
}
