//! Render surfaces.
//!
//! A [`RenderSurface`] is the positioned container an overlay hands to the map
//! viewport. Its content is a small element tree ([`Element`]) that mirrors
//! what the overlay would build in a browser: a tag, CSS classes, attributes,
//! optional text and children.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SURFACE_ID: AtomicU64 = AtomicU64::new(1);

/// Corner of the map viewport an overlay is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OverlayPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

/// A node of the overlay's element tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: BTreeMap<String, String>,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), ..Default::default() }
    }

    /// Create an element with a space-separated class list.
    pub fn with_class(tag: &str, class_name: &str) -> Self {
        let mut element = Self::new(tag);
        element.classes = class_name.split_whitespace().map(str::to_string).collect();
        element
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.classes.iter().any(|c| c == class_name)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.attributes.insert(name.to_string(), value.to_string());
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = Some(text.to_string());
    }

    /// Append a child and return a handle to it.
    pub fn append(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// First descendant (or self) with the given tag, depth-first.
    pub fn find(&self, tag: &str) -> Option<&Element> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }
}

/// Process-unique identity of a render surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(u64);

impl SurfaceId {
    fn next() -> Self {
        Self(NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// A positioned container attached to a map viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSurface {
    id: SurfaceId,
    pub position: OverlayPosition,
    pub root: Element,
}

impl RenderSurface {
    /// Create an empty container `div` with the given class list.
    pub fn new(position: OverlayPosition, class_name: &str) -> Self {
        Self {
            id: SurfaceId::next(),
            position,
            root: Element::with_class("div", class_name),
        }
    }

    pub fn id(&self) -> SurfaceId {
        self.id
    }

    /// The canvas element inside this surface, if one was created.
    pub fn canvas(&self) -> Option<&Element> {
        self.root.find("canvas")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surfaces_get_distinct_ids() {
        let a = RenderSurface::new(OverlayPosition::TopRight, "a");
        let b = RenderSurface::new(OverlayPosition::TopRight, "a");
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_with_class_splits_class_list() {
        let element = Element::with_class("i", "fa  fa-map");
        assert_eq!(element.classes, vec!["fa", "fa-map"]);
        assert!(element.has_class("fa-map"));
    }

    #[test]
    fn test_find_descends_depth_first() {
        let mut surface = RenderSurface::new(OverlayPosition::BottomLeft, "leaflet-control-chart");
        assert!(surface.canvas().is_none());

        let wrapper = surface.root.append(Element::new("div"));
        wrapper.append(Element::new("canvas")).set_attribute("width", "300");

        let canvas = surface.canvas().unwrap();
        assert_eq!(canvas.attribute("width"), Some("300"));
    }
}
