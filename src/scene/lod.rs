use smallvec::SmallVec;

use crate::scene::node::RenderNode;

/// One distance-gated alternative.
#[derive(Debug, Clone)]
pub struct LodLevel {
    pub min_distance: f32,
    pub node: RenderNode,
}

/// Level-of-detail selector.
///
/// Levels are kept sorted ascending by `min_distance`; each owns an
/// independent subtree.
#[derive(Debug, Clone, Default)]
pub struct Lod {
    levels: SmallVec<[LodLevel; 4]>,
}

impl Lod {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a level, keeping the order (ties keep insertion order).
    pub fn add_level(&mut self, min_distance: f32, node: RenderNode) {
        let at = self
            .levels
            .iter()
            .position(|l| l.min_distance > min_distance)
            .unwrap_or(self.levels.len());
        self.levels.insert(at, LodLevel { min_distance, node });
    }

    #[must_use]
    pub fn levels(&self) -> &[LodLevel] {
        &self.levels
    }

    pub fn levels_mut(&mut self) -> &mut [LodLevel] {
        &mut self.levels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the level shown at `distance`: the last one whose
    /// `min_distance` does not exceed it. Closer than every level selects
    /// the first.
    #[must_use]
    pub fn select_index(&self, distance: f32) -> Option<usize> {
        if self.levels.is_empty() {
            return None;
        }
        let past = self.levels.partition_point(|l| l.min_distance <= distance);
        Some(past.saturating_sub(1))
    }

    #[must_use]
    pub fn select(&self, distance: f32) -> Option<&LodLevel> {
        self.select_index(distance).map(|i| &self.levels[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(name: &str) -> RenderNode {
        RenderNode::new(name)
    }

    #[test]
    fn levels_stay_sorted_and_select_by_distance() {
        let mut lod = Lod::new();
        lod.add_level(50.0, level("low"));
        lod.add_level(0.0, level("high"));
        lod.add_level(20.0, level("mid"));

        let names: Vec<_> = lod.levels().iter().map(|l| l.node.name.as_str()).collect();
        assert_eq!(names, ["high", "mid", "low"]);

        assert_eq!(lod.select(0.0).map(|l| l.node.name.as_str()), Some("high"));
        assert_eq!(lod.select(19.9).map(|l| l.node.name.as_str()), Some("high"));
        assert_eq!(lod.select(20.0).map(|l| l.node.name.as_str()), Some("mid"));
        assert_eq!(lod.select(1000.0).map(|l| l.node.name.as_str()), Some("low"));
        assert_eq!(lod.select(-5.0).map(|l| l.node.name.as_str()), Some("high"));
    }
}
