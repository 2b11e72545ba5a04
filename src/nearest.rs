//! Nearest track point lookup.
//!
//! The map-to-chart direction of the sync: given a position on the map (where
//! the pointer is), find the index of the closest track point so the profile
//! chart can mark the matching sample.
//!
//! Points are indexed in an R-tree on `[lat, lng * cos(ref_lat)]`, with
//! `ref_lat` the mean latitude of the track, so planar nearest-neighbor queries
//! stay close to true ground distance for tracks that don't span a hemisphere.

use rstar::{PointDistance, RTree, RTreeObject, AABB};
use crate::geo_utils::haversine_distance;
use crate::{GpsPoint, Track};

/// A track point with its index for R-tree queries
#[derive(Debug, Clone, Copy)]
struct IndexedPoint {
    idx: usize,
    lat: f64,
    lng: f64,
    /// Longitude scaled for the tree
    x: f64,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.lat, self.x])
    }
}

impl PointDistance for IndexedPoint {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dlat = self.lat - point[0];
        let dx = self.x - point[1];
        dlat * dlat + dx * dx
    }
}

/// Spatial index over the points of one track.
#[derive(Debug, Clone)]
pub struct TrackIndex {
    tree: RTree<IndexedPoint>,
    lng_scale: f64,
}

impl TrackIndex {
    /// Index the points of a track. Points with invalid coordinates are
    /// skipped but the remaining points keep their original indices.
    pub fn new(track: &Track) -> Self {
        Self::from_points(&track.positions())
    }

    pub fn from_points(points: &[GpsPoint]) -> Self {
        let valid: Vec<(usize, &GpsPoint)> = points
            .iter()
            .enumerate()
            .filter(|(_, p)| p.is_valid())
            .collect();

        let lng_scale = if valid.is_empty() {
            1.0
        } else {
            let mean_lat = valid.iter().map(|(_, p)| p.latitude).sum::<f64>() / valid.len() as f64;
            mean_lat.to_radians().cos().max(0.01)
        };

        let indexed: Vec<IndexedPoint> = valid
            .into_iter()
            .map(|(idx, p)| IndexedPoint {
                idx,
                lat: p.latitude,
                lng: p.longitude,
                x: p.longitude * lng_scale,
            })
            .collect();

        Self { tree: RTree::bulk_load(indexed), lng_scale }
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Index of the track point closest to `position`.
    ///
    /// When several points are equally close (a track passing the same spot
    /// twice), the earliest one wins.
    pub fn nearest(&self, position: &GpsPoint) -> Option<usize> {
        let query = [position.latitude, position.longitude * self.lng_scale];
        let mut candidates = self.tree.nearest_neighbor_iter_with_distance_2(&query);

        let (first, best_dist) = candidates.next()?;
        let mut best = first.idx;
        for (point, dist) in candidates {
            if dist > best_dist {
                break;
            }
            best = best.min(point.idx);
        }
        Some(best)
    }

    /// Like [`TrackIndex::nearest`], but only if the point lies within
    /// `max_meters` of `position`.
    pub fn nearest_within(&self, position: &GpsPoint, max_meters: f64) -> Option<usize> {
        let idx = self.nearest(position)?;
        let query = [position.latitude, position.longitude * self.lng_scale];
        let point = self
            .tree
            .nearest_neighbor_iter(&query)
            .find(|p| p.idx == idx)?;

        let distance = haversine_distance(position, &GpsPoint::new(point.lat, point.lng));
        (distance <= max_meters).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrackPoint;

    fn out_and_back() -> Vec<GpsPoint> {
        vec![
            GpsPoint::new(60.000, 10.000),
            GpsPoint::new(60.001, 10.000),
            GpsPoint::new(60.002, 10.000),
            GpsPoint::new(60.001, 10.000),
            GpsPoint::new(60.000, 10.000),
        ]
    }

    #[test]
    fn test_nearest_finds_closest_point() {
        let index = TrackIndex::from_points(&out_and_back());
        assert_eq!(index.len(), 5);
        assert_eq!(index.nearest(&GpsPoint::new(60.0019, 10.0001)), Some(2));
    }

    #[test]
    fn test_nearest_prefers_earliest_on_revisit() {
        let index = TrackIndex::from_points(&out_and_back());
        assert_eq!(index.nearest(&GpsPoint::new(60.0010, 10.0)), Some(1));
        assert_eq!(index.nearest(&GpsPoint::new(59.9999, 10.0)), Some(0));
    }

    #[test]
    fn test_longitude_scaled_by_latitude() {
        // At 60N a degree of longitude is half a degree of latitude on the ground,
        // so the point 0.0015 east is nearer than the one 0.001 north.
        let points = vec![
            GpsPoint::new(60.001, 10.0),
            GpsPoint::new(60.0, 10.0015),
        ];
        let index = TrackIndex::from_points(&points);
        assert_eq!(index.nearest(&GpsPoint::new(60.0, 10.0)), Some(1));
    }

    #[test]
    fn test_invalid_points_skipped_indices_kept() {
        let points = vec![
            GpsPoint::new(f64::NAN, 0.0),
            GpsPoint::new(45.0, 7.0),
        ];
        let index = TrackIndex::from_points(&points);
        assert_eq!(index.len(), 1);
        assert_eq!(index.nearest(&GpsPoint::new(45.1, 7.1)), Some(1));
    }

    #[test]
    fn test_empty_index() {
        let index = TrackIndex::new(&Track::default());
        assert!(index.is_empty());
        assert_eq!(index.nearest(&GpsPoint::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_nearest_within_distance() {
        let track = Track::from_points(
            out_and_back().into_iter().map(|p| TrackPoint::new(p, None)).collect(),
        );
        let index = TrackIndex::new(&track);
        let probe = GpsPoint::new(60.002, 10.001); // ~56m east of point 2

        assert_eq!(index.nearest_within(&probe, 100.0), Some(2));
        assert_eq!(index.nearest_within(&probe, 20.0), None);
    }
}
