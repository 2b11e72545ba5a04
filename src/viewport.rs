//! The host map viewport contract.

use std::collections::BTreeMap;
use log::debug;
use crate::surface::{OverlayPosition, RenderSurface, SurfaceId};

/// What an overlay needs from the map it is attached to.
pub trait Viewport {
    /// Add a surface to the viewport's control layer.
    fn register_overlay(&mut self, surface: &RenderSurface);

    /// Remove a previously registered surface. Unknown surfaces are ignored.
    fn unregister_overlay(&mut self, surface: &RenderSurface);
}

/// A viewport control layer keeping registered surfaces per corner, in
/// registration order.
#[derive(Debug, Clone, Default)]
pub struct ControlLayer {
    corners: BTreeMap<OverlayPosition, Vec<SurfaceId>>,
}

impl ControlLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surfaces anchored to a corner, oldest first.
    pub fn surfaces_at(&self, position: OverlayPosition) -> &[SurfaceId] {
        self.corners.get(&position).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: SurfaceId) -> bool {
        self.corners.values().any(|ids| ids.contains(&id))
    }

    pub fn len(&self) -> usize {
        self.corners.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Viewport for ControlLayer {
    fn register_overlay(&mut self, surface: &RenderSurface) {
        let ids = self.corners.entry(surface.position).or_default();
        if !ids.contains(&surface.id()) {
            ids.push(surface.id());
        }
    }

    fn unregister_overlay(&mut self, surface: &RenderSurface) {
        let Some(ids) = self.corners.get_mut(&surface.position) else {
            debug!("[ControlLayer] Nothing registered at {:?}", surface.position);
            return;
        };
        ids.retain(|id| *id != surface.id());
        if ids.is_empty() {
            self.corners.remove(&surface.position);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_keeps_order_per_corner() {
        let mut layer = ControlLayer::new();
        let a = RenderSurface::new(OverlayPosition::TopRight, "a");
        let b = RenderSurface::new(OverlayPosition::TopRight, "b");
        let c = RenderSurface::new(OverlayPosition::BottomLeft, "c");

        layer.register_overlay(&a);
        layer.register_overlay(&b);
        layer.register_overlay(&c);
        layer.register_overlay(&a);

        assert_eq!(layer.surfaces_at(OverlayPosition::TopRight), &[a.id(), b.id()]);
        assert_eq!(layer.surfaces_at(OverlayPosition::BottomLeft), &[c.id()]);
        assert_eq!(layer.len(), 3);
    }

    #[test]
    fn test_unregister_unknown_is_ignored() {
        let mut layer = ControlLayer::new();
        let a = RenderSurface::new(OverlayPosition::TopLeft, "a");
        let b = RenderSurface::new(OverlayPosition::TopLeft, "b");

        layer.unregister_overlay(&a);
        layer.register_overlay(&a);
        layer.unregister_overlay(&b);

        assert!(layer.contains(a.id()));
        layer.unregister_overlay(&a);
        assert!(layer.is_empty());
    }
}
