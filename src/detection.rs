use crate::bbox::{BBox, Ltwh, Xywh};

use ndarray::prelude::*;

/// One candidate object for a single frame: top-left box, detector
/// confidence, class id and the appearance feature extracted for it.
#[derive(Debug, Clone)]
pub struct Detection {
    pub bbox: BBox<Ltwh>,
    pub confidence: f32,
    pub class: i32,
    pub feature: Array1<f32>,
}

/// Builds the per-frame detection set from aligned input sequences.
///
/// `features` holds one row per input box (extracted before filtering, so
/// row i still belongs to box i). Only boxes with confidence strictly above
/// `min_confidence` survive; relative order among survivors is kept.
pub fn build_detections(
    boxes: &[BBox<Xywh>],
    confidences: &[f32],
    classes: &[i32],
    features: &Array2<f32>,
    min_confidence: f32,
) -> Vec<Detection> {
    boxes
        .iter()
        .zip(confidences.iter().copied())
        .zip(classes.iter().copied())
        .enumerate()
        .filter(|&(_, ((_, confidence), _))| confidence > min_confidence)
        .map(|(idx, ((bbox, confidence), class))| Detection {
            bbox: bbox.as_ltwh(),
            confidence,
            class,
            feature: features.row(idx).to_owned(),
        })
        .collect()
}
