//! In-memory chart backend.
//!
//! [`HeadlessBackend`] builds charts that keep their series in memory instead of
//! drawing to a canvas. It does the one piece of interaction the profile needs,
//! nearest-point hit testing, and fires the tooltip hook synchronously from
//! [`HeadlessBackend::pointer_move`] the way a browser chart fires it from a
//! pointer event. Clones share state, so one clone can be handed to an overlay
//! while another inspects what was rendered.

use std::cell::RefCell;
use std::rc::Rc;
use crate::chart::{ChartBackend, ChartConfig, ChartError, ChartOptions, ProfileChart, TooltipHook};
use crate::hover::TooltipItem;
use crate::profile::ProfileSample;
use crate::surface::{RenderSurface, SurfaceId};

#[derive(Clone, Default)]
pub struct HeadlessBackend {
    inner: Rc<RefCell<BackendState>>,
}

#[derive(Default)]
struct BackendState {
    failure: Option<String>,
    charts_created: usize,
    current: Option<Rc<RefCell<ChartState>>>,
}

struct ChartState {
    surface: SurfaceId,
    options: ChartOptions,
    tooltip: TooltipHook,
    series: Vec<ProfileSample>,
    rendered: Vec<ProfileSample>,
    redraws: usize,
    active: Option<usize>,
    live: bool,
}

struct HeadlessChart {
    state: Rc<RefCell<ChartState>>,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend whose chart construction always fails.
    pub fn failing(reason: &str) -> Self {
        let backend = Self::new();
        backend.set_failure(Some(reason));
        backend
    }

    /// Make subsequent chart construction fail (`Some`) or succeed (`None`).
    pub fn set_failure(&self, reason: Option<&str>) {
        self.inner.borrow_mut().failure = reason.map(str::to_string);
    }

    pub fn charts_created(&self) -> usize {
        self.inner.borrow().charts_created
    }

    /// Whether the most recent chart is still owned by an overlay.
    pub fn has_live_chart(&self) -> bool {
        self.with_chart(|c| c.live).unwrap_or(false)
    }

    /// Surface the most recent chart was built on.
    pub fn chart_surface(&self) -> Option<SurfaceId> {
        self.with_chart(|c| c.surface)
    }

    pub fn chart_options(&self) -> Option<ChartOptions> {
        self.with_chart(|c| c.options.clone())
    }

    /// Series as of the last redraw.
    pub fn rendered_series(&self) -> Vec<ProfileSample> {
        self.with_chart(|c| c.rendered.clone()).unwrap_or_default()
    }

    pub fn redraw_count(&self) -> usize {
        self.with_chart(|c| c.redraws).unwrap_or(0)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.with_chart(|c| c.active).flatten()
    }

    /// Move the pointer to data coordinates `(x, y)`.
    ///
    /// Returns the items found under the pointer. When there are any, the
    /// tooltip hook is invoked with them before this returns.
    pub fn pointer_move(&self, x: f64, y: f64) -> Vec<TooltipItem> {
        let Some((hook, items)) = self.with_chart(|c| {
            let items = if c.live { nearest_items(&c.rendered, x, y) } else { Vec::new() };
            (c.tooltip.clone(), items)
        }) else {
            return Vec::new();
        };

        if !items.is_empty() {
            hook(items.as_slice());
        }
        items
    }

    fn with_chart<T>(&self, f: impl FnOnce(&ChartState) -> T) -> Option<T> {
        let chart = self.inner.borrow().current.clone()?;
        let state = chart.borrow();
        Some(f(&state))
    }
}

impl ChartBackend for HeadlessBackend {
    fn create_chart(
        &self,
        surface: &RenderSurface,
        config: ChartConfig,
    ) -> Result<Box<dyn ProfileChart>, ChartError> {
        let mut inner = self.inner.borrow_mut();
        if let Some(reason) = &inner.failure {
            return Err(ChartError::BackendUnavailable(reason.clone()));
        }
        if surface.canvas().is_none() {
            return Err(ChartError::InvalidSurface("no canvas element".to_string()));
        }

        let state = Rc::new(RefCell::new(ChartState {
            surface: surface.id(),
            options: config.options,
            tooltip: config.tooltip,
            series: Vec::new(),
            rendered: Vec::new(),
            redraws: 0,
            active: None,
            live: true,
        }));
        inner.charts_created += 1;
        inner.current = Some(state.clone());

        Ok(Box::new(HeadlessChart { state }))
    }
}

impl ProfileChart for HeadlessChart {
    fn replace_series(&mut self, samples: Vec<ProfileSample>) {
        let mut state = self.state.borrow_mut();
        state.series = samples;
        state.active = None;
    }

    fn update(&mut self) {
        let mut state = self.state.borrow_mut();
        state.rendered = state.series.clone();
        state.redraws += 1;
    }

    fn set_active_index(&mut self, index: Option<usize>) {
        let mut state = self.state.borrow_mut();
        let len = state.series.len();
        state.active = index.filter(|&i| i < len);
    }
}

impl Drop for HeadlessChart {
    fn drop(&mut self) {
        self.state.borrow_mut().live = false;
    }
}

/// Items closest to `(x, y)` in data space, in series order.
///
/// Every sample at the minimum distance is reported, so ties come back in the
/// order the series holds them.
fn nearest_items(samples: &[ProfileSample], x: f64, y: f64) -> Vec<TooltipItem> {
    let distances: Vec<f64> = samples
        .iter()
        .map(|s| (s.elapsed_seconds - x).hypot(s.cumulative_distance - y))
        .collect();

    let min = distances.iter().copied().fold(f64::INFINITY, f64::min);
    if !min.is_finite() {
        return Vec::new();
    }

    distances
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == min)
        .map(|(i, _)| TooltipItem::new(0, i))
        .collect()
}
