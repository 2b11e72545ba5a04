//! Chart configuration and the rendering backend seam.
//!
//! The overlay never draws anything itself. It builds a [`ChartConfig`] and asks
//! a [`ChartBackend`] for a [`ProfileChart`] bound to its render surface, then
//! pushes series into that chart and requests redraws.

use std::fmt;
use std::rc::Rc;
use thiserror::Error;
use crate::hover::TooltipItem;
use crate::profile::ProfileSample;
use crate::surface::RenderSurface;

/// Hook the chart invokes with the active items right before it shows a
/// tooltip.
pub type TooltipHook = Rc<dyn Fn(&[TooltipItem])>;

/// Axis scale type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ScaleType {
    #[default]
    Linear,
}

/// How the chart picks the items under the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum InteractionMode {
    /// Items closest to the pointer, whether or not the pointer touches them
    #[default]
    Nearest,
}

/// Static chart options.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ChartOptions {
    /// Elapsed time axis
    pub x_scale: ScaleType,
    /// Cumulative distance axis
    pub y_scale: ScaleType,
    pub interaction: InteractionMode,
    /// Resize with the container
    pub responsive: bool,
    /// Keep the canvas aspect ratio while resizing.
    /// Default: false, so the chart fills whatever box the overlay gets
    pub maintain_aspect_ratio: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            x_scale: ScaleType::Linear,
            y_scale: ScaleType::Linear,
            interaction: InteractionMode::Nearest,
            responsive: true,
            maintain_aspect_ratio: false,
        }
    }
}

/// Everything a backend needs to construct the profile chart.
#[derive(Clone)]
pub struct ChartConfig {
    pub options: ChartOptions,
    /// Wired to the overlay's hover translator
    pub tooltip: TooltipHook,
}

impl fmt::Debug for ChartConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartConfig")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Chart construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    #[error("chart rendering backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("render surface cannot host a chart: {0}")]
    InvalidSurface(String),
}

/// Constructs profile charts on render surfaces.
pub trait ChartBackend {
    fn create_chart(
        &self,
        surface: &RenderSurface,
        config: ChartConfig,
    ) -> Result<Box<dyn ProfileChart>, ChartError>;
}

/// A live single-series profile chart.
pub trait ProfileChart {
    /// Replace the chart's only series.
    fn replace_series(&mut self, samples: Vec<ProfileSample>);

    /// Redraw with the current series.
    fn update(&mut self);

    /// Mark one sample as active (e.g. hovered on the map), or clear it.
    fn set_active_index(&mut self, index: Option<usize>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ChartOptions::default();
        assert_eq!(options.x_scale, ScaleType::Linear);
        assert_eq!(options.y_scale, ScaleType::Linear);
        assert_eq!(options.interaction, InteractionMode::Nearest);
        assert!(options.responsive);
        assert!(!options.maintain_aspect_ratio);
    }

    #[test]
    fn test_error_messages() {
        let err = ChartError::BackendUnavailable("no canvas context".to_string());
        assert_eq!(err.to_string(), "chart rendering backend unavailable: no canvas context");
    }
}
