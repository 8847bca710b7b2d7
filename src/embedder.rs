use crate::bbox::{BBox, Xywh};
use crate::error::{CollaboratorError, Error};
use crate::frame::Frame;

use ndarray::prelude::*;

/// Appearance embedding collaborator: one batched call turns image crops
/// into a `(n, dim)` feature matrix, rows in crop order. The feature
/// dimension is fixed by the model and constant for a process lifetime.
///
/// Implementations are not required to accept an empty batch; the adapter
/// below never hands them one.
pub trait FeatureExtractor {
    fn extract(&self, crops: &[ArrayView3<'_, u8>]) -> Result<Array2<f32>, CollaboratorError>;
}

/// Crops every box region out of the frame and runs the extractor once on
/// the whole batch. Boxes come in the original center form; corner
/// conversion and frame clamping happen here.
pub fn extract_features<E: FeatureExtractor + ?Sized>(
    extractor: &E,
    frame: &Frame<'_>,
    boxes: &[BBox<Xywh>],
) -> Result<Array2<f32>, Error> {
    if boxes.is_empty() {
        return Ok(Array2::zeros((0, 0)));
    }

    let crops: Vec<ArrayView3<'_, u8>> = boxes
        .iter()
        .map(|bbox| frame.crop(bbox.corners(frame.width(), frame.height())))
        .collect();

    let features = extractor.extract(&crops).map_err(Error::Embedder)?;
    if features.nrows() != crops.len() {
        return Err(Error::FeatureCount {
            expected: crops.len(),
            got: features.nrows(),
        });
    }

    Ok(features)
}
