use crate::bbox::{BBox, Ltwh};
use crate::detection::Detection;
use crate::error::{CollaboratorError, Error};

/// Overlap suppression collaborator. Given top-left boxes, the configured
/// maximum overlap ratio and the matching scores, it returns the indices of
/// the boxes to keep. Tie-breaking between equal-score overlapping boxes is
/// the collaborator's business, not ours.
pub trait OverlapSuppressor {
    fn suppress(
        &self,
        boxes: &[BBox<Ltwh>],
        max_overlap: f32,
        scores: &[f32],
    ) -> Result<Vec<usize>, CollaboratorError>;
}

/// Marshals the detection set through the suppressor and keeps the retained
/// subset, in the order the collaborator returned it. No overlap math here.
pub fn suppress_detections<S: OverlapSuppressor + ?Sized>(
    suppressor: &S,
    max_overlap: f32,
    detections: Vec<Detection>,
) -> Result<Vec<Detection>, Error> {
    let boxes: Vec<BBox<Ltwh>> = detections.iter().map(|d| d.bbox.clone()).collect();
    let scores: Vec<f32> = detections.iter().map(|d| d.confidence).collect();

    let retained = suppressor
        .suppress(&boxes, max_overlap, &scores)
        .map_err(Error::Suppressor)?;

    let len = detections.len();
    let mut kept = Vec::with_capacity(retained.len());
    for &index in &retained {
        let det = detections
            .get(index)
            .cloned()
            .ok_or(Error::SuppressionIndex { index, len })?;
        kept.push(det);
    }
    Ok(kept)
}
