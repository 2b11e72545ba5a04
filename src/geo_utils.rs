//! # Geographic Utilities
//!
//! Distance and extent helpers for GPS tracks.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`haversine_distance`] | Great-circle distance between two GPS points |
//! | [`cumulative_distances`] | Running distance from the first point, one entry per point |
//! | [`compute_bounds`] | Bounding box of a GPS track |
//!
//! ## Example
//!
//! ```rust
//! use track_profile::{GpsPoint, geo_utils};
//!
//! let points = vec![
//!     GpsPoint::new(51.5074, -0.1278),
//!     GpsPoint::new(51.5080, -0.1290),
//!     GpsPoint::new(51.5090, -0.1300),
//! ];
//!
//! let cumulative = geo_utils::cumulative_distances(&points);
//! assert_eq!(cumulative.len(), 3);
//! assert_eq!(cumulative[0], 0.0);
//! assert!(cumulative[2] > cumulative[1]);
//! ```
//!
//! All functions expect WGS84 coordinates (latitude/longitude in degrees).

use geo::{Point, Haversine, Distance};
use crate::{GpsPoint, Bounds};

// =============================================================================
// Distance Functions
// =============================================================================

/// Calculate the great-circle distance between two GPS points in meters.
///
/// ```rust
/// use track_profile::{GpsPoint, geo_utils};
///
/// let london = GpsPoint::new(51.5074, -0.1278);
/// let paris = GpsPoint::new(48.8566, 2.3522);
///
/// let distance = geo_utils::haversine_distance(&london, &paris);
/// assert!((distance - 343_560.0).abs() < 5000.0); // ~344 km
/// ```
#[inline]
pub fn haversine_distance(p1: &GpsPoint, p2: &GpsPoint) -> f64 {
    let point1 = Point::new(p1.longitude, p1.latitude);
    let point2 = Point::new(p2.longitude, p2.latitude);
    Haversine::distance(point1, point2)
}

/// Running distance along a track, in meters.
///
/// The result has exactly one entry per input point. Entry 0 is always 0.0 and
/// the sequence is non-decreasing. Empty input yields an empty vector.
///
/// A segment touching a point that fails [`GpsPoint::is_valid`] adds nothing,
/// so a bad fix repeats the previous distance instead of turning every later
/// entry into NaN.
pub fn cumulative_distances(points: &[GpsPoint]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(points.len());
    let mut total = 0.0;

    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            let prev = &points[i - 1];
            if prev.is_valid() && point.is_valid() {
                total += haversine_distance(prev, point);
            }
        }
        cumulative.push(total);
    }

    cumulative
}

// =============================================================================
// Bounding Box Functions
// =============================================================================

/// Compute the bounding box of a GPS track, or `None` for an empty track.
///
/// ```rust
/// use track_profile::{GpsPoint, geo_utils};
///
/// let points = vec![
///     GpsPoint::new(51.5000, -0.1300),
///     GpsPoint::new(51.5100, -0.1200),
///     GpsPoint::new(51.5050, -0.1250),
/// ];
///
/// let bounds = geo_utils::compute_bounds(&points).unwrap();
/// assert_eq!(bounds.min_lat, 51.5000);
/// assert_eq!(bounds.max_lng, -0.1200);
/// ```
pub fn compute_bounds(points: &[GpsPoint]) -> Option<Bounds> {
    if points.is_empty() {
        return None;
    }

    let mut min_lat = f64::MAX;
    let mut max_lat = f64::MIN;
    let mut min_lng = f64::MAX;
    let mut max_lng = f64::MIN;

    for p in points {
        min_lat = min_lat.min(p.latitude);
        max_lat = max_lat.max(p.latitude);
        min_lng = min_lng.min(p.longitude);
        max_lng = max_lng.max(p.longitude);
    }

    Some(Bounds { min_lat, max_lat, min_lng, max_lng })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_haversine_distance_same_point() {
        let p = GpsPoint::new(51.5074, -0.1278);
        assert_eq!(haversine_distance(&p, &p), 0.0);
    }

    #[test]
    fn test_haversine_distance_known_value() {
        let london = GpsPoint::new(51.5074, -0.1278);
        let paris = GpsPoint::new(48.8566, 2.3522);
        let dist = haversine_distance(&london, &paris);
        assert!(approx_eq(dist, 343_560.0, 5000.0));
    }

    #[test]
    fn test_cumulative_distances_empty() {
        assert!(cumulative_distances(&[]).is_empty());
    }

    #[test]
    fn test_cumulative_distances_single_point() {
        let single = vec![GpsPoint::new(51.5074, -0.1278)];
        assert_eq!(cumulative_distances(&single), vec![0.0]);
    }

    #[test]
    fn test_cumulative_distances_non_decreasing() {
        // Out-and-back: distance keeps growing on the way back
        let points = vec![
            GpsPoint::new(51.5000, -0.1200),
            GpsPoint::new(51.5010, -0.1200),
            GpsPoint::new(51.5020, -0.1200),
            GpsPoint::new(51.5010, -0.1200),
        ];
        let cumulative = cumulative_distances(&points);

        assert_eq!(cumulative.len(), points.len());
        assert_eq!(cumulative[0], 0.0);
        assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
        // ~111m per 0.001 degree of latitude
        assert!(approx_eq(cumulative[1], 111.2, 1.0));
        assert!(approx_eq(cumulative[3], 3.0 * cumulative[1], 1.0));
    }

    #[test]
    fn test_cumulative_distances_skip_invalid_point() {
        let points = vec![
            GpsPoint::new(51.5000, -0.1200),
            GpsPoint::new(51.5010, -0.1200),
            GpsPoint::new(f64::NAN, -0.1200),
            GpsPoint::new(51.5020, -0.1200),
            GpsPoint::new(51.5030, -0.1200),
        ];
        let cumulative = cumulative_distances(&points);

        assert_eq!(cumulative.len(), points.len());
        assert!(cumulative.iter().all(|d| d.is_finite()));
        assert!(cumulative.windows(2).all(|w| w[1] >= w[0]));
        // Both segments around the bad fix add nothing
        assert_eq!(cumulative[2], cumulative[1]);
        assert_eq!(cumulative[3], cumulative[1]);
        assert!(approx_eq(cumulative[4] - cumulative[3], 111.2, 1.0));
    }

    #[test]
    fn test_compute_bounds() {
        let points = vec![
            GpsPoint::new(51.50, -0.13),
            GpsPoint::new(51.51, -0.12),
            GpsPoint::new(51.505, -0.125),
        ];
        let bounds = compute_bounds(&points).unwrap();
        assert_eq!(bounds.min_lat, 51.50);
        assert_eq!(bounds.max_lat, 51.51);
        assert_eq!(bounds.min_lng, -0.13);
        assert_eq!(bounds.max_lng, -0.12);
    }

    #[test]
    fn test_compute_bounds_empty() {
        assert!(compute_bounds(&[]).is_none());
    }
}
