use crate::bbox::{BBox, Ltwh};

/// Read-only snapshot of one live track, as exposed by the tracker
/// collaborator. The pipeline never mutates track state.
///
/// `confidence` and `class` are those of the detection most recently
/// associated with this track, so output rows carry per-object scores
/// without relying on output position matching input position.
#[derive(Debug, Clone)]
pub struct Track {
    pub track_id: u32,
    pub confirmed: bool,
    pub time_since_update: u32,
    pub bbox: BBox<Ltwh>,
    pub class: i32,
    pub confidence: f32,
}

impl Track {
    /// A track is worth showing while it is confirmed and was matched in
    /// this frame or the one before.
    #[inline]
    pub fn is_fresh(&self) -> bool {
        self.confirmed && self.time_since_update <= 1
    }
}
