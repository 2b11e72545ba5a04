//! Map buttons.
//!
//! A [`ButtonControl`] is a clickable control on the map viewport showing
//! either a text label or an [`Icon`]. It follows the same attach/detach
//! pattern as the chart overlay: the click callback is live only while the
//! button is attached.

use std::fmt;
use std::rc::Rc;
use log::debug;
use crate::surface::{Element, OverlayPosition, RenderSurface};
use crate::viewport::Viewport;

/// Callback invoked when a button is activated.
pub type ClickCallback = Rc<dyn Fn()>;

const ICON_CLASS: &str = "leaflet-control-custom-button-icon";
const TEXT_CLASS: &str = "leaflet-control-custom-button-text";
const BUTTON_CLASS: &str = "leaflet-control-custom-button";

/// Material Design icon font variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MaterialDesignTheme {
    Outlined,
    TwoTone,
    Round,
    Sharp,
}

impl MaterialDesignTheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outlined => "outlined",
            Self::TwoTone => "two-tone",
            Self::Round => "round",
            Self::Sharp => "sharp",
        }
    }
}

/// An icon from one of the supported icon fonts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Icon {
    /// Font Awesome icon class, e.g. `"fa-map"`
    FontAwesome { name: String },
    /// Material Design ligature name, e.g. `"timeline"`
    MaterialDesign { name: String, theme: Option<MaterialDesignTheme> },
}

impl Icon {
    pub fn font_awesome(name: &str) -> Self {
        Self::FontAwesome { name: name.to_string() }
    }

    pub fn material(name: &str, theme: Option<MaterialDesignTheme>) -> Self {
        Self::MaterialDesign { name: name.to_string(), theme }
    }

    /// Build the icon's element and append it to `container`.
    pub fn render<'a>(&self, container: &'a mut Element) -> &'a mut Element {
        let wrapper = container.append(Element::with_class("div", ICON_CLASS));
        match self {
            Self::FontAwesome { name } => {
                wrapper.append(Element::with_class("i", &format!("fa {}", name)));
            }
            Self::MaterialDesign { name, theme } => {
                let class_name = match theme {
                    Some(theme) => format!("material-icons-{}", theme.as_str()),
                    None => "material-icons".to_string(),
                };
                wrapper.append(Element::with_class("span", &class_name)).set_text(name);
            }
        }
        wrapper
    }
}

/// What a button shows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ButtonContent {
    Text(String),
    Icon(Icon),
}

impl ButtonContent {
    fn render(&self, container: &mut Element) {
        match self {
            Self::Text(text) => {
                container.append(Element::with_class("div", TEXT_CLASS)).set_text(text);
            }
            Self::Icon(icon) => {
                icon.render(container);
            }
        }
    }
}

/// Button configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ButtonOptions {
    /// Element id of the link
    pub id: Option<String>,
    /// Tooltip text of the link
    pub title: Option<String>,
    pub content: ButtonContent,
    pub position: OverlayPosition,
}

impl ButtonOptions {
    pub fn new(content: ButtonContent) -> Self {
        Self { id: None, title: None, content, position: OverlayPosition::TopLeft }
    }
}

/// A clickable map button.
pub struct ButtonControl {
    options: ButtonOptions,
    on_click: ClickCallback,
    surface: Option<RenderSurface>,
}

impl ButtonControl {
    pub fn new(options: ButtonOptions, on_click: impl Fn() + 'static) -> Self {
        Self { options, on_click: Rc::new(on_click), surface: None }
    }

    pub fn options(&self) -> &ButtonOptions {
        &self.options
    }

    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Build the button and register it with the viewport.
    pub fn attach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> &RenderSurface {
        let surface = match self.surface.take() {
            Some(surface) => surface,
            None => {
                let surface = self.build();
                viewport.register_overlay(&surface);
                surface
            }
        };
        self.surface.insert(surface)
    }

    /// Unregister the button. Clicks are ignored afterwards.
    pub fn detach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        if let Some(surface) = self.surface.take() {
            viewport.unregister_overlay(&surface);
        }
    }

    /// Activate the button. Returns whether the callback ran.
    pub fn click(&self) -> bool {
        if self.surface.is_none() {
            debug!("[ButtonControl] Click on detached button ignored");
            return false;
        }
        (self.on_click)();
        true
    }

    fn build(&self) -> RenderSurface {
        let mut surface = RenderSurface::new(self.options.position, BUTTON_CLASS);

        let link = surface.root.append(Element::new("a"));
        link.set_attribute("href", "#");
        link.set_attribute("role", "button");
        if let Some(id) = &self.options.id {
            link.set_attribute("id", id);
        }
        if let Some(title) = &self.options.title {
            link.set_attribute("title", title);
        }
        self.options.content.render(link);

        surface
    }
}

impl fmt::Debug for ButtonControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonControl")
            .field("options", &self.options)
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::viewport::ControlLayer;

    #[test]
    fn test_font_awesome_icon() {
        let mut container = Element::new("a");
        Icon::font_awesome("fa-map").render(&mut container);

        let wrapper = &container.children[0];
        assert!(wrapper.has_class(ICON_CLASS));
        let i = &wrapper.children[0];
        assert_eq!(i.tag, "i");
        assert_eq!(i.classes, vec!["fa", "fa-map"]);
    }

    #[test]
    fn test_material_icon_themes() {
        let mut plain = Element::new("a");
        Icon::material("timeline", None).render(&mut plain);
        let span = plain.find("span").unwrap();
        assert!(span.has_class("material-icons"));
        assert_eq!(span.text.as_deref(), Some("timeline"));

        let mut themed = Element::new("a");
        Icon::material("timeline", Some(MaterialDesignTheme::TwoTone)).render(&mut themed);
        assert!(themed.find("span").unwrap().has_class("material-icons-two-tone"));
    }

    #[test]
    fn test_text_button_markup() {
        let mut options = ButtonOptions::new(ButtonContent::Text("GPX".to_string()));
        options.id = Some("load-track".to_string());
        options.title = Some("Load track".to_string());
        let mut button = ButtonControl::new(options, || {});
        let mut map = ControlLayer::new();

        let surface = button.attach(&mut map).clone();
        assert!(surface.root.has_class(BUTTON_CLASS));

        let link = surface.root.find("a").unwrap();
        assert_eq!(link.attribute("href"), Some("#"));
        assert_eq!(link.attribute("role"), Some("button"));
        assert_eq!(link.attribute("id"), Some("load-track"));
        assert_eq!(link.attribute("title"), Some("Load track"));

        let label = &link.children[0];
        assert!(label.has_class(TEXT_CLASS));
        assert_eq!(label.text.as_deref(), Some("GPX"));
        assert_eq!(map.surfaces_at(OverlayPosition::TopLeft), &[surface.id()]);
    }

    #[test]
    fn test_click_only_while_attached() {
        let clicks = Rc::new(Cell::new(0));
        let counter = clicks.clone();
        let mut button = ButtonControl::new(
            ButtonOptions::new(ButtonContent::Icon(Icon::font_awesome("fa-upload"))),
            move || counter.set(counter.get() + 1),
        );
        let mut map = ControlLayer::new();

        assert!(!button.click());
        button.attach(&mut map);
        assert!(button.click());
        button.detach(&mut map);
        assert!(!button.click());

        assert_eq!(clicks.get(), 1);
        assert!(map.is_empty());
    }

    #[test]
    fn test_attach_twice_registers_once() {
        let mut button = ButtonControl::new(ButtonOptions::new(ButtonContent::Text("x".into())), || {});
        let mut map = ControlLayer::new();

        let first = button.attach(&mut map).id();
        let second = button.attach(&mut map).id();
        assert_eq!(first, second);
        assert_eq!(map.len(), 1);
    }
}
