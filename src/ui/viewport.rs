//! Which gallery tiles are on screen.
//!
//! Tiles are laid out row-major in a grid of fixed-height rows. A tile counts
//! as visible when it intersects the viewport widened by a margin on both
//! sides, so previews start loading just before they scroll in.

use std::collections::BTreeSet;
use std::ops::Range;

/// Scroll position and size of the gallery viewport, in logical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f32,
    pub height: f32,
    pub tile_height: f32,
    pub columns: usize,
}

/// Index range of tiles intersecting the viewport widened by `margin`.
pub fn visible_tiles(viewport: &Viewport, count: usize, margin: f32) -> Range<usize> {
    if count == 0 || viewport.tile_height <= 0.0 || viewport.height <= 0.0 {
        return 0..0;
    }
    let columns = viewport.columns.max(1);

    let top = (viewport.scroll_top - margin).max(0.0);
    let bottom = viewport.scroll_top + viewport.height + margin;

    let first_row = (top / viewport.tile_height).floor() as usize;
    let last_row = (bottom / viewport.tile_height).ceil() as usize;

    let start = first_row.saturating_mul(columns).min(count);
    let end = last_row.saturating_mul(columns).min(count);
    start..end
}

/// Turns successive visible ranges into enter/leave edges per tile.
#[derive(Debug, Default)]
pub struct VisibilityTracker {
    visible: BTreeSet<usize>,
}

impl VisibilityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the new visible range and returns `(tile, now_visible)` for
    /// every tile whose visibility changed.
    pub fn update(&mut self, range: Range<usize>) -> Vec<(usize, bool)> {
        let next: BTreeSet<usize> = range.collect();

        let mut changes: Vec<(usize, bool)> = self
            .visible
            .difference(&next)
            .map(|&tile| (tile, false))
            .collect();
        changes.extend(next.difference(&self.visible).map(|&tile| (tile, true)));

        self.visible = next;
        changes
    }

    pub fn reset(&mut self) {
        self.visible.clear();
    }
}
