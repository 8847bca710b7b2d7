use crate::bbox::{BBox, Xywh};
use crate::detection::build_detections;
use crate::embedder::{extract_features, FeatureExtractor};
use crate::error::Error;
use crate::frame::Frame;
use crate::output::{assemble, EmissionPolicy, OutputRecord};
use crate::suppression::{suppress_detections, OverlapSuppressor};
use crate::Tracking;

use tracing::debug;

/// Construction-time knobs, fixed for the lifetime of one pipeline.
///
/// The pipeline itself consumes `min_confidence`, `max_overlap` and
/// `emission`. The remaining fields parameterize the collaborators the
/// caller builds (appearance metric, association gate, lifecycle, feature
/// budget, device) and are carried here so one config value describes the
/// whole tracker setup.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub min_confidence: f32,
    pub max_overlap: f32,
    pub max_feature_distance: f32,
    pub max_iou_distance: f32,
    pub max_age: u32,
    pub n_init: u32,
    pub feature_budget: usize,
    pub use_gpu: bool,
    pub emission: EmissionPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            max_overlap: 1.0,
            max_feature_distance: 0.2,
            max_iou_distance: 0.7,
            max_age: 70,
            n_init: 3,
            feature_budget: 100,
            use_gpu: true,
            emission: EmissionPolicy::default(),
        }
    }
}

/// Per-frame update pipeline: crop, embed, filter, suppress, associate,
/// assemble. All cross-frame state lives in the tracker collaborator;
/// the pipeline holds only its configuration and the collaborators.
pub struct Pipeline<E, S, T> {
    config: PipelineConfig,
    extractor: E,
    suppressor: S,
    tracker: T,
}

impl<E, S, T> Pipeline<E, S, T>
where
    E: FeatureExtractor,
    S: OverlapSuppressor,
    T: Tracking,
{
    pub fn new(config: PipelineConfig, extractor: E, suppressor: S, tracker: T) -> Self {
        Self {
            config,
            extractor,
            suppressor,
            tracker,
        }
    }

    #[inline]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    #[inline]
    pub fn tracker(&self) -> &T {
        &self.tracker
    }

    /// Runs one frame through the whole pipeline and returns the
    /// caller-visible rows for that frame.
    ///
    /// `boxes`, `confidences` and `classes` are aligned by index and must
    /// share one length; that is checked before any collaborator runs.
    /// An empty input is fine and never reaches the feature extractor.
    pub fn update(
        &mut self,
        frame: &Frame<'_>,
        boxes: &[BBox<Xywh>],
        confidences: &[f32],
        classes: &[i32],
    ) -> Result<Vec<OutputRecord>, Error> {
        if boxes.len() != confidences.len() || boxes.len() != classes.len() {
            return Err(Error::LengthMismatch {
                boxes: boxes.len(),
                confidences: confidences.len(),
                classes: classes.len(),
            });
        }
        if frame.width() == 0 || frame.height() == 0 {
            return Err(Error::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        let features = extract_features(&self.extractor, frame, boxes)?;

        let detections = build_detections(
            boxes,
            confidences,
            classes,
            &features,
            self.config.min_confidence,
        );
        debug!(raw = boxes.len(), kept = detections.len(), "confidence filter");

        let detections =
            suppress_detections(&self.suppressor, self.config.max_overlap, detections)?;
        debug!(kept = detections.len(), "overlap suppression");

        self.tracker.predict();
        self.tracker.update(&detections).map_err(Error::Tracker)?;

        let rows = assemble(self.tracker.tracks(), self.config.emission, frame);
        debug!(rows = rows.len(), "assembled output");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::Detection;
    use crate::error::CollaboratorError;
    use crate::track::Track;
    use ndarray::prelude::*;
    use std::cell::Cell;

    struct CountingExtractor {
        calls: Cell<usize>,
    }

    impl FeatureExtractor for CountingExtractor {
        fn extract(
            &self,
            crops: &[ArrayView3<'_, u8>],
        ) -> Result<Array2<f32>, CollaboratorError> {
            self.calls.set(self.calls.get() + 1);
            Ok(Array2::zeros((crops.len(), 4)))
        }
    }

    struct KeepAll {
        calls: Cell<usize>,
    }

    impl OverlapSuppressor for KeepAll {
        fn suppress(
            &self,
            boxes: &[BBox<crate::bbox::Ltwh>],
            _max_overlap: f32,
            _scores: &[f32],
        ) -> Result<Vec<usize>, CollaboratorError> {
            self.calls.set(self.calls.get() + 1);
            Ok((0..boxes.len()).collect())
        }
    }

    /// Turns every detection straight into a confirmed track.
    #[derive(Default)]
    struct EchoTracker {
        tracks: Vec<Track>,
        next_id: u32,
    }

    impl Tracking for EchoTracker {
        fn predict(&mut self) {}

        fn update(&mut self, detections: &[Detection]) -> Result<(), CollaboratorError> {
            self.tracks = detections
                .iter()
                .map(|det| {
                    self.next_id += 1;
                    Track {
                        track_id: self.next_id,
                        confirmed: true,
                        time_since_update: 0,
                        bbox: det.bbox.clone(),
                        class: det.class,
                        confidence: det.confidence,
                    }
                })
                .collect();
            Ok(())
        }

        fn tracks(&self) -> &[Track] {
            &self.tracks
        }
    }

    fn pipeline() -> Pipeline<CountingExtractor, KeepAll, EchoTracker> {
        Pipeline::new(
            PipelineConfig::default(),
            CountingExtractor {
                calls: Cell::new(0),
            },
            KeepAll {
                calls: Cell::new(0),
            },
            EchoTracker::default(),
        )
    }

    #[test]
    fn test_length_mismatch_fails_before_collaborators() {
        let buf = Array3::<u8>::zeros((100, 100, 3));
        let frame = Frame::new(buf.view());
        let mut p = pipeline();

        let err = p
            .update(&frame, &[BBox::xywh(10.0, 10.0, 4.0, 4.0)], &[0.9, 0.8], &[1])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::LengthMismatch {
                boxes: 1,
                confidences: 2,
                classes: 1
            }
        ));
        assert_eq!(p.extractor.calls.get(), 0);
        assert_eq!(p.suppressor.calls.get(), 0);
        assert!(p.tracker.tracks().is_empty());
    }

    #[test]
    fn test_zero_dimension_frame_is_rejected() {
        let buf = Array3::<u8>::zeros((0, 100, 3));
        let frame = Frame::new(buf.view());
        let mut p = pipeline();

        let err = p.update(&frame, &[], &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            Error::EmptyFrame {
                width: 100,
                height: 0
            }
        ));
    }

    #[test]
    fn test_zero_detections_skip_embedder() {
        let buf = Array3::<u8>::zeros((100, 100, 3));
        let frame = Frame::new(buf.view());
        let mut p = pipeline();

        let rows = p.update(&frame, &[], &[], &[]).unwrap();
        assert!(rows.is_empty());
        assert_eq!(p.extractor.calls.get(), 0);
    }

    #[test]
    fn test_worked_example() {
        // Frame 100x100, one box centered at (50,50) sized 20x20 with
        // confidence 0.9 and class 3 comes out as corners (40,40,60,60).
        let buf = Array3::<u8>::zeros((100, 100, 3));
        let frame = Frame::new(buf.view());
        let mut p = pipeline();

        let rows = p
            .update(&frame, &[BBox::xywh(50.0, 50.0, 20.0, 20.0)], &[0.9], &[3])
            .unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows[0];
        assert_eq!((row.x1, row.y1, row.x2, row.y2), (40, 40, 60, 60));
        assert_eq!(row.class, 3);
        assert!((row.confidence - 0.9).abs() < f32::EPSILON);
    }

    #[test]
    fn test_fresh_instances_are_deterministic() {
        let buf = Array3::<u8>::zeros((100, 100, 3));
        let frame = Frame::new(buf.view());
        let boxes = [
            BBox::xywh(30.0, 30.0, 10.0, 10.0),
            BBox::xywh(70.0, 70.0, 10.0, 10.0),
        ];
        let confidences = [0.8, 0.7];
        let classes = [1, 2];

        let first = pipeline()
            .update(&frame, &boxes, &confidences, &classes)
            .unwrap();
        let second = pipeline()
            .update(&frame, &boxes, &confidences, &classes)
            .unwrap();
        assert_eq!(first, second);
    }
}
