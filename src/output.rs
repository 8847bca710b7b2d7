use crate::frame::Frame;
use crate::track::Track;

use serde_derive::{Deserialize, Serialize};

/// Which tracks become caller-visible each frame.
///
/// The historical behavior had both of these baked into different code
/// paths; here the choice is explicit and configured once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionPolicy {
    /// Only confirmed tracks matched within the last frame. Safer default:
    /// coasting and tentative tracks stay hidden.
    #[default]
    Confirmed,
    /// Every live track, including tentative and coasting ones.
    All,
}

/// One output row: integer frame-clamped corners, persistent identity and
/// the confidence/class of the track's last matched detection.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct OutputRecord {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub track_id: u32,
    pub class: i32,
    pub confidence: f32,
}

/// Maps eligible tracks into output rows, in the tracker's own order.
///
/// Confidence and class travel on the track itself rather than being
/// re-attached by output position, so this stays well defined when track
/// count and input detection count diverge. Zero eligible tracks yield an
/// empty row set, whatever the frame's inputs looked like.
pub fn assemble(tracks: &[Track], policy: EmissionPolicy, frame: &Frame<'_>) -> Vec<OutputRecord> {
    tracks
        .iter()
        .filter(|track| match policy {
            EmissionPolicy::Confirmed => track.is_fresh(),
            EmissionPolicy::All => true,
        })
        .map(|track| {
            let c = track.bbox.corners(frame.width(), frame.height());
            OutputRecord {
                x1: c.x1,
                y1: c.y1,
                x2: c.x2,
                y2: c.y2,
                track_id: track.track_id,
                class: track.class,
                confidence: track.confidence,
            }
        })
        .collect()
}
