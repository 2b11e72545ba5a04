//! Chart overlay lifecycle.
//!
//! [`ChartOverlay`] owns the profile chart shown on top of a map viewport:
//! its render surface, the live chart built by a [`ChartBackend`], and the
//! track currently displayed.
//!
//! ## Lifecycle
//!
//! | Phase | `set_track` | `attach` | `detach` |
//! |-------|-------------|----------|----------|
//! | `Unattached` | stored, shown on attach | mounts | no-op |
//! | `Attached` | rendered immediately | no-op (same surface) | unmounts |
//! | `Detached` | stored, not rendered | mounts again | no-op |
//!
//! A chart backend failure during attach never reaches the caller. The error
//! is logged and the overlay stays mounted without a chart, so the map keeps
//! working.

use std::rc::Rc;
use log::{debug, error, info, warn};
use crate::chart::{ChartBackend, ChartConfig, ChartOptions, ProfileChart, TooltipHook};
use crate::hover::{HoverTranslator, TooltipItem};
use crate::nearest::TrackIndex;
use crate::profile::build_profile;
use crate::surface::{Element, OverlayPosition, RenderSurface};
use crate::viewport::Viewport;
use crate::{GpsPoint, Track};

/// Configuration for the chart overlay.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayConfig {
    /// Viewport corner the overlay is anchored to.
    /// Default: top right
    pub position: OverlayPosition,
    /// Class list of the container element.
    /// Default: "leaflet-control-chart"
    pub class_name: String,
    /// Optional class list for the canvas element
    pub canvas_class: Option<String>,
    pub chart: ChartOptions,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            position: OverlayPosition::TopRight,
            class_name: "leaflet-control-chart".to_string(),
            canvas_class: None,
            chart: ChartOptions::default(),
        }
    }
}

/// Where an overlay is in its attach/detach lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    Unattached,
    Attached,
    Detached,
}

/// Profile chart overlay for one map viewport.
pub struct ChartOverlay<B: ChartBackend> {
    backend: B,
    config: OverlayConfig,
    translator: Rc<HoverTranslator>,
    phase: OverlayPhase,
    surface: Option<RenderSurface>,
    chart: Option<Box<dyn ProfileChart>>,
    track: Option<Track>,
    track_index: Option<TrackIndex>,
}

impl<B: ChartBackend> ChartOverlay<B> {
    pub fn new(backend: B, config: OverlayConfig) -> Self {
        Self {
            backend,
            config,
            translator: Rc::new(HoverTranslator::new(None)),
            phase: OverlayPhase::Unattached,
            surface: None,
            chart: None,
            track: None,
            track_index: None,
        }
    }

    /// Register the callback receiving the track index under the chart pointer.
    ///
    /// Replaces any earlier callback, also on a chart that is already mounted.
    pub fn on_hover(self, on_hover: impl Fn(usize) + 'static) -> Self {
        self.translator.set_callback(Some(Rc::new(on_hover)));
        self
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// The mounted render surface, while attached.
    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Whether a working chart is mounted.
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }

    /// The most recently supplied track.
    pub fn track(&self) -> Option<&Track> {
        self.track.as_ref()
    }

    /// Mount the overlay on a viewport and return its render surface.
    ///
    /// Builds a container holding a canvas, asks the backend for a chart on it
    /// and registers the container with the viewport. A track supplied before
    /// attaching is drawn right away. If the backend fails, the failure is
    /// logged and the surface is still registered, just without a chart.
    ///
    /// # Arguments
    ///
    /// * `viewport` - The map the surface is registered with, at the configured
    ///   corner
    ///
    /// # Returns
    ///
    /// The mounted surface. Attaching again while attached returns the existing
    /// surface unchanged.
    ///
    /// # Example
    ///
    /// ```rust
    /// use track_profile::{ChartOverlay, ControlLayer, HeadlessBackend, OverlayConfig};
    ///
    /// let backend = HeadlessBackend::new();
    /// let mut overlay = ChartOverlay::new(backend.clone(), OverlayConfig::default());
    /// let mut map = ControlLayer::new();
    ///
    /// let id = overlay.attach(&mut map).id();
    /// assert!(map.contains(id));
    /// assert!(overlay.has_chart());
    /// ```
    pub fn attach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> &RenderSurface {
        let surface = match self.surface.take() {
            Some(surface) if self.phase == OverlayPhase::Attached => {
                warn!("[ChartOverlay] Already attached, keeping surface {:?}", surface.id());
                surface
            }
            _ => self.mount(viewport),
        };
        self.surface.insert(surface)
    }

    /// Show a new track, replacing whatever was displayed.
    ///
    /// Before the overlay is attached the track is kept and drawn once the
    /// chart exists. After detaching it is kept but nothing is drawn.
    pub fn set_track(&mut self, track: Track) {
        if track.points.len() != track.cumulative_distance.len() {
            warn!(
                "[ChartOverlay] Track has {} points but {} distances, plotting the shorter",
                track.points.len(),
                track.cumulative_distance.len()
            );
        }

        self.track_index = Some(TrackIndex::new(&track));
        self.track = Some(track);

        match self.phase {
            OverlayPhase::Attached => self.render(),
            OverlayPhase::Unattached => {
                debug!("[ChartOverlay] Not attached yet, track stored for attach");
            }
            OverlayPhase::Detached => {
                debug!("[ChartOverlay] Detached, track stored but not rendered");
            }
        }
    }

    /// Unmount the overlay from a viewport. Does nothing if not attached.
    pub fn detach<V: Viewport + ?Sized>(&mut self, viewport: &mut V) {
        let Some(surface) = self.surface.take() else {
            debug!("[ChartOverlay] Detach without attach, nothing to do");
            return;
        };

        viewport.unregister_overlay(&surface);
        self.chart = None;
        self.translator.set_series_len(0);
        self.phase = OverlayPhase::Detached;
        info!("[ChartOverlay] Detached surface {:?}", surface.id());
    }

    /// Mark a track index as active on the chart, or clear the mark.
    ///
    /// Returns false when there is no chart to mark.
    pub fn highlight(&mut self, index: Option<usize>) -> bool {
        let Some(chart) = self.chart.as_mut() else {
            return false;
        };
        chart.set_active_index(index);
        true
    }

    /// Mark the track point nearest a map position and return its index.
    ///
    /// Points farther than `max_meters` from the position are not matched; a
    /// miss clears the mark.
    pub fn highlight_position(&mut self, position: &GpsPoint, max_meters: f64) -> Option<usize> {
        let index = self
            .track_index
            .as_ref()
            .and_then(|tree| tree.nearest_within(position, max_meters));
        self.highlight(index);
        index
    }

    fn mount<V: Viewport + ?Sized>(&mut self, viewport: &mut V) -> RenderSurface {
        let mut surface = RenderSurface::new(self.config.position, &self.config.class_name);
        let canvas = match &self.config.canvas_class {
            Some(class_name) => Element::with_class("canvas", class_name),
            None => Element::new("canvas"),
        };
        surface.root.append(canvas);

        let config = ChartConfig {
            options: self.config.chart.clone(),
            tooltip: self.tooltip_hook(),
        };
        self.chart = match self.backend.create_chart(&surface, config) {
            Ok(chart) => Some(chart),
            Err(e) => {
                error!("[ChartOverlay] Chart unavailable, attaching without it: {}", e);
                None
            }
        };

        viewport.register_overlay(&surface);
        self.phase = OverlayPhase::Attached;
        info!(
            "[ChartOverlay] Attached surface {:?} at {:?} (chart: {})",
            surface.id(),
            surface.position,
            self.chart.is_some()
        );

        if self.track.is_some() {
            self.render();
        }
        surface
    }

    fn tooltip_hook(&self) -> TooltipHook {
        let translator = Rc::clone(&self.translator);
        Rc::new(move |items: &[TooltipItem]| {
            translator.handle(items);
        })
    }

    /// Push the current track's profile into the chart and redraw.
    fn render(&mut self) {
        let Some(track) = &self.track else {
            return;
        };
        let samples = build_profile(track);

        let Some(chart) = self.chart.as_mut() else {
            debug!("[ChartOverlay] No chart, skipping render of {} samples", samples.len());
            return;
        };

        info!("[ChartOverlay] Rendering profile with {} samples", samples.len());
        self.translator.set_series_len(samples.len());
        chart.replace_series(samples);
        chart.update();
    }
}
