// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Maps pointer coordinates back to the semantic action of whatever was
//! rendered there. The view registers a zone per interactive rectangle on
//! every frame; the event loop resolves presses against the registry and a
//! miss means the press landed outside the widget.

use ratatui::layout::{Position, Rect};

/// One interactive rectangle and the action a press on it means.
#[derive(Debug, Clone)]
pub struct HitZone<A> {
    pub rect: Rect,
    pub action: A,
}

/// Per-frame collection of interactive zones. Zones registered later sit
/// on top, so overlays win over whatever they cover.
#[derive(Debug)]
pub struct HitTestRegistry<A> {
    zones: Vec<HitZone<A>>,
}

impl<A> Default for HitTestRegistry<A> {
    fn default() -> Self {
        Self { zones: Vec::new() }
    }
}

impl<A> HitTestRegistry<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every zone; call before rendering the next frame.
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    pub fn register(&mut self, rect: Rect, action: A) {
        self.zones.push(HitZone { rect, action });
    }

    /// The action of the top-most zone containing the coordinate, if any.
    pub fn hit_test(&self, column: u16, row: u16) -> Option<&A> {
        let position = Position::new(column, row);
        self.zones
            .iter()
            .rev()
            .find(|zone| zone.rect.contains(position))
            .map(|zone| &zone.action)
    }

    /// All registered zones in registration order.
    pub fn zones(&self) -> &[HitZone<A>] {
        &self.zones
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Probe {
        Below,
        Above,
    }

    #[test]
    fn later_zones_cover_earlier_ones() {
        let mut registry = HitTestRegistry::new();
        registry.register(Rect::new(0, 0, 12, 6), Probe::Below);
        registry.register(Rect::new(2, 2, 4, 2), Probe::Above);

        assert_eq!(registry.hit_test(3, 3), Some(&Probe::Above));
        assert_eq!(registry.hit_test(10, 5), Some(&Probe::Below));
    }

    #[test]
    fn misses_resolve_to_none() {
        let mut registry = HitTestRegistry::new();
        registry.register(Rect::new(1, 1, 3, 1), Probe::Below);

        assert!(registry.hit_test(0, 0).is_none());
        assert!(registry.hit_test(4, 1).is_none(), "the right edge is exclusive");
    }

    #[test]
    fn clear_resets_the_frame() {
        let mut registry = HitTestRegistry::new();
        registry.register(Rect::new(0, 0, 2, 2), Probe::Below);
        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.hit_test(1, 1).is_none());
    }
}
