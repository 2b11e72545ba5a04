//! # Track Profile
//!
//! Distance-over-time profile chart for a GPS track, kept in sync with the map
//! the track is drawn on.
//!
//! This library provides:
//! - A profile series builder turning a track into (elapsed time, distance) samples
//! - A chart overlay with an attach/detach lifecycle against a host map viewport
//! - Hover translation from the chart's nearest-point events back to track indices
//! - The reverse lookup, from a map position to the nearest track index
//!
//! ## Features
//!
//! - **`serde`** - Serialize/deserialize track and configuration types
//!
//! ## Quick Start
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use chrono::{TimeZone, Utc};
//! use track_profile::{
//!     ChartOverlay, ControlLayer, GpsPoint, HeadlessBackend, OverlayConfig, Track, TrackPoint,
//! };
//!
//! let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
//! let track = Track::from_points(vec![
//!     TrackPoint::new(GpsPoint::new(51.5074, -0.1278), Some(t0)),
//!     TrackPoint::new(GpsPoint::new(51.5080, -0.1290), Some(t0 + chrono::Duration::seconds(30))),
//!     TrackPoint::new(GpsPoint::new(51.5090, -0.1300), Some(t0 + chrono::Duration::seconds(60))),
//! ]);
//!
//! let hovered = Rc::new(Cell::new(None));
//! let sink = hovered.clone();
//!
//! let backend = HeadlessBackend::new();
//! let mut overlay = ChartOverlay::new(backend.clone(), OverlayConfig::default())
//!     .on_hover(move |index| sink.set(Some(index)));
//!
//! let mut map = ControlLayer::new();
//! overlay.attach(&mut map);
//!
//! let halfway = track.cumulative_distance[1];
//! overlay.set_track(track);
//!
//! // Pointer lands closest to the sample at 30s
//! backend.pointer_move(29.0, halfway);
//! assert_eq!(hovered.get(), Some(1));
//! ```

use chrono::{DateTime, Utc};
use thiserror::Error;

pub mod geo_utils;

// Profile series builder
pub mod profile;
pub use profile::{ProfileSample, build_profile};

// Hover translation (chart -> track index)
pub mod hover;
pub use hover::{HoverCallback, HoverTranslator, TooltipItem};

// Chart configuration and backend seam
pub mod chart;
pub use chart::{
    ChartBackend, ChartConfig, ChartError, ChartOptions, InteractionMode, ProfileChart,
    ScaleType, TooltipHook,
};

// In-memory chart backend
pub mod headless;
pub use headless::HeadlessBackend;

// Render surfaces and the viewport contract
pub mod surface;
pub use surface::{Element, OverlayPosition, RenderSurface, SurfaceId};

pub mod viewport;
pub use viewport::{ControlLayer, Viewport};

// Overlay lifecycle
pub mod overlay;
pub use overlay::{ChartOverlay, OverlayConfig, OverlayPhase};

// Nearest track point lookup (map -> chart)
pub mod nearest;
pub use nearest::TrackIndex;

// Map buttons
pub mod button;
pub use button::{ButtonContent, ButtonControl, ButtonOptions, ClickCallback, Icon, MaterialDesignTheme};

// ============================================================================
// Core Types
// ============================================================================

/// A GPS coordinate with latitude and longitude.
///
/// # Example
/// ```
/// use track_profile::GpsPoint;
/// let point = GpsPoint::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GpsPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GpsPoint {
    /// Create a new GPS point.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Get the center point of the bounds.
    pub fn center(&self) -> GpsPoint {
        GpsPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

/// A single recorded position of a track.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackPoint {
    pub position: GpsPoint,
    /// Recording time, if the source had one for this point
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    pub fn new(position: GpsPoint, time: Option<DateTime<Utc>>) -> Self {
        Self { position, time }
    }
}

/// Problems [`Track::validate`] can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackError {
    #[error("track has {points} points but {distances} cumulative distances")]
    LengthMismatch { points: usize, distances: usize },
    #[error("cumulative distance decreases at index {index}")]
    DecreasingDistance { index: usize },
    #[error("first cumulative distance is {0}, expected 0")]
    NonZeroOrigin(f64),
}

/// An ordered path of track points with its cumulative distance.
///
/// `cumulative_distance[i]` is the distance in meters travelled from the first
/// point up to `points[i]`. The two sequences are index-aligned; that alignment
/// is what lets a chart index be used directly as a track index.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Track {
    pub points: Vec<TrackPoint>,
    pub cumulative_distance: Vec<f64>,
}

impl Track {
    /// Create a track from points and a precomputed cumulative distance.
    ///
    /// Nothing is checked here; use [`Track::validate`] when the source is
    /// not trusted.
    pub fn new(points: Vec<TrackPoint>, cumulative_distance: Vec<f64>) -> Self {
        Self { points, cumulative_distance }
    }

    /// Create a track and compute its cumulative haversine distance.
    ///
    /// Segments touching an invalid position add no distance.
    pub fn from_points(points: Vec<TrackPoint>) -> Self {
        let positions: Vec<GpsPoint> = points.iter().map(|p| p.position).collect();
        let cumulative_distance = geo_utils::cumulative_distances(&positions);
        Self { points, cumulative_distance }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Positions of all points, in order.
    pub fn positions(&self) -> Vec<GpsPoint> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Bounding box of the track, `None` when empty.
    pub fn bounds(&self) -> Option<Bounds> {
        geo_utils::compute_bounds(&self.positions())
    }

    /// Total distance in meters (last cumulative value).
    pub fn total_distance(&self) -> f64 {
        self.cumulative_distance.last().copied().unwrap_or(0.0)
    }

    /// Check the track invariants: aligned lengths, distance starting at 0
    /// and never decreasing.
    pub fn validate(&self) -> Result<(), TrackError> {
        if self.points.len() != self.cumulative_distance.len() {
            return Err(TrackError::LengthMismatch {
                points: self.points.len(),
                distances: self.cumulative_distance.len(),
            });
        }

        if let Some(&first) = self.cumulative_distance.first() {
            if first != 0.0 {
                return Err(TrackError::NonZeroOrigin(first));
            }
        }

        if let Some(index) = self
            .cumulative_distance
            .windows(2)
            .position(|w| w[1] < w[0])
        {
            return Err(TrackError::DecreasingDistance { index: index + 1 });
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
