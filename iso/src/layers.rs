use alloc::vec::Vec;

use torri_core::Coord2;

use crate::DrawPrimitive;

/// Painter's-algorithm buckets keyed by isometric depth.
///
/// A tile's depth is `display_x + display_y`; the origin corner is nearest
/// to the viewer, so the highest depth must be painted first. Within a
/// bucket insertion order is kept, which leaves the relative order of two
/// tiles sharing a depth index up to traversal order.
#[derive(Clone, Debug, Default)]
pub struct DepthLayers {
    buckets: Vec<Vec<DrawPrimitive>>,
}

impl DepthLayers {
    /// Buckets for a `width + height` board; depth indices actually used
    /// range over `0 ..= width + height - 2`.
    pub fn new(depth_count: usize) -> Self {
        let mut buckets = Vec::new();
        buckets.resize(depth_count, Vec::new());
        Self { buckets }
    }

    pub fn depth_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Bucket one tile's primitives under its depth index, preserving
    /// their build order.
    pub fn push<I>(&mut self, display: Coord2, primitives: I)
    where
        I: IntoIterator<Item = DrawPrimitive>,
    {
        let depth = usize::from(display.0) + usize::from(display.1);
        assert!(depth < self.buckets.len(), "depth outside allocated layers");
        self.buckets[depth].extend(primitives);
    }

    /// Every primitive back-to-front: descending depth index, insertion
    /// order within a layer.
    pub fn iter_back_to_front(&self) -> impl Iterator<Item = &DrawPrimitive> {
        self.buckets.iter().rev().flatten()
    }

    /// Layers with their depth index, back-to-front. Empty layers are
    /// included so callers can reason about the full depth range.
    pub fn layers(&self) -> impl Iterator<Item = (usize, &[DrawPrimitive])> {
        self.buckets
            .iter()
            .enumerate()
            .rev()
            .map(|(depth, bucket)| (depth, bucket.as_slice()))
    }
}
