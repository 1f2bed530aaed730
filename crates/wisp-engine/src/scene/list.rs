use core::ops::Range;

use super::DrawCmd;

/// Recorded draw stream for one frame.
///
/// - `push()` is O(1)
/// - commands replay in insertion order
/// - `clear()` keeps capacity for reuse
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawCmd>,
    points: Vec<[f32; 2]>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears commands and the point arena. Keeps allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
        self.points.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Commands in insertion order.
    #[inline]
    pub fn items(&self) -> &[DrawCmd] {
        &self.items
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.items.push(cmd);
    }

    /// Appends control points to the arena and returns their range.
    pub fn push_points(&mut self, points: &[[f32; 2]]) -> Range<u32> {
        let start = self.points.len() as u32;
        self.points.extend_from_slice(points);
        start..self.points.len() as u32
    }

    /// Control points for a range previously returned by [`push_points`](Self::push_points).
    ///
    /// An out-of-bounds range yields an empty slice.
    #[inline]
    pub fn points(&self, range: Range<u32>) -> &[[f32; 2]] {
        self.points
            .get(range.start as usize..range.end as usize)
            .unwrap_or(&[])
    }
}
