use crate::bbox::Corners;

use ndarray::prelude::*;

/// Read-only view over one video frame in HWC layout.
///
/// The pipeline never keeps a frame beyond a single update call, so this is
/// a borrowed view rather than an owned buffer.
#[derive(Clone, Copy)]
pub struct Frame<'a> {
    pixels: ArrayView3<'a, u8>,
}

impl<'a> Frame<'a> {
    #[inline]
    pub fn new(pixels: ArrayView3<'a, u8>) -> Self {
        Self { pixels }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.shape()[1] as u32
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.shape()[0] as u32
    }

    #[inline]
    pub fn pixels(&self) -> ArrayView3<'a, u8> {
        self.pixels
    }

    /// Slices the region `[y1..y2, x1..x2]`. Corners are already clamped to
    /// the frame, so the slice cannot go out of bounds; a degenerate box
    /// yields an empty view rather than failing.
    #[inline]
    pub fn crop(&self, c: Corners) -> ArrayView3<'a, u8> {
        let (y1, y2) = (c.y1 as usize, c.y2 as usize);
        let (x1, x2) = (c.x1 as usize, c.x2 as usize);
        self.pixels.slice_move(s![y1..y2, x1..x2, ..])
    }
}
