//! Profile series builder.
//!
//! Turns a [`Track`] into the series plotted by the profile chart: one
//! [`ProfileSample`] per track point, in the same order, so that the position
//! of a sample in the series is the index of the point it came from.

use crate::{Track, TrackPoint};

/// One plotted point of the distance-over-time profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProfileSample {
    /// Seconds since the first point of the track (x axis)
    pub elapsed_seconds: f64,
    /// Meters travelled since the first point of the track (y axis)
    pub cumulative_distance: f64,
}

impl ProfileSample {
    pub fn new(elapsed_seconds: f64, cumulative_distance: f64) -> Self {
        Self { elapsed_seconds, cumulative_distance }
    }
}

/// Build the profile series for a track.
///
/// Produces one sample per track point, in track order, so sample `i` always
/// describes `track.points[i]`.
///
/// # Arguments
///
/// * `track` - The track to plot; may be empty
///
/// # Returns
///
/// The (elapsed time, cumulative distance) samples. Empty for an empty track.
///
/// # Time origin
///
/// The first point's timestamp is the time origin. A point without a timestamp
/// gets an elapsed time of 0. When the first point itself has no timestamp the
/// origin falls back to the Unix epoch, so later timed points are placed at
/// their absolute epoch seconds and keep their order on the time axis.
///
/// Distances are taken verbatim from the track; nothing is sorted or
/// validated, so out-of-order timestamps come out as they went in.
///
/// # Example
///
/// ```rust
/// use chrono::{Duration, TimeZone, Utc};
/// use track_profile::{build_profile, GpsPoint, Track, TrackPoint};
///
/// let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
/// let track = Track::new(
///     vec![
///         TrackPoint::new(GpsPoint::new(46.0, 7.0), Some(t0)),
///         TrackPoint::new(GpsPoint::new(46.001, 7.0), Some(t0 + Duration::seconds(5))),
///     ],
///     vec![0.0, 111.2],
/// );
///
/// let samples = build_profile(&track);
/// assert_eq!(samples[1].elapsed_seconds, 5.0);
/// assert_eq!(samples[1].cumulative_distance, 111.2);
/// ```
pub fn build_profile(track: &Track) -> Vec<ProfileSample> {
    let Some(first) = track.points.first() else {
        return Vec::new();
    };
    let t0_millis = first.time.map_or(0, |t| t.timestamp_millis());

    track
        .points
        .iter()
        .zip(track.cumulative_distance.iter())
        .map(|(point, &distance)| ProfileSample::new(elapsed_seconds(point, t0_millis), distance))
        .collect()
}

fn elapsed_seconds(point: &TrackPoint, t0_millis: i64) -> f64 {
    match point.time {
        Some(t) => (t.timestamp_millis() - t0_millis) as f64 / 1000.0,
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use crate::GpsPoint;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap()
    }

    fn timed_track(offsets: &[Option<i64>]) -> Track {
        let points = offsets
            .iter()
            .enumerate()
            .map(|(i, offset)| {
                TrackPoint::new(
                    GpsPoint::new(46.0 + i as f64 * 0.001, 7.0),
                    offset.map(|ms| t0() + Duration::milliseconds(ms)),
                )
            })
            .collect();
        let distances = (0..offsets.len()).map(|i| i as f64 * 100.0).collect();
        Track::new(points, distances)
    }

    #[test]
    fn test_empty_track_builds_empty_series() {
        assert!(build_profile(&Track::default()).is_empty());
    }

    #[test]
    fn test_one_sample_per_point_with_distance_verbatim() {
        let track = timed_track(&[Some(0), Some(1_000), Some(2_000), Some(3_000)]);
        let samples = build_profile(&track);

        assert_eq!(samples.len(), track.points.len());
        for (i, sample) in samples.iter().enumerate() {
            assert_eq!(sample.cumulative_distance, track.cumulative_distance[i]);
        }
    }

    #[test]
    fn test_first_sample_is_time_origin() {
        let track = timed_track(&[Some(0), Some(4_000)]);
        let samples = build_profile(&track);
        assert_eq!(samples[0].elapsed_seconds, 0.0);
    }

    #[test]
    fn test_elapsed_seconds_relative_to_first_point() {
        let track = timed_track(&[Some(0), Some(5_000), Some(12_500)]);
        let samples = build_profile(&track);

        assert_eq!(samples[1].elapsed_seconds, 5.0);
        assert_eq!(samples[2].elapsed_seconds, 12.5);
    }

    #[test]
    fn test_missing_timestamp_is_zero_elapsed() {
        let track = timed_track(&[Some(0), None, Some(10_000)]);
        let samples = build_profile(&track);

        assert_eq!(samples[1].elapsed_seconds, 0.0);
        assert_eq!(samples[2].elapsed_seconds, 10.0);
    }

    #[test]
    fn test_untimed_first_point_uses_epoch_origin() {
        let track = timed_track(&[None, Some(5_000), Some(10_000)]);
        let samples = build_profile(&track);
        let epoch_seconds = t0().timestamp() as f64;

        assert_eq!(samples[0].elapsed_seconds, 0.0);
        assert_eq!(samples[1].elapsed_seconds, epoch_seconds + 5.0);
        assert_eq!(samples[2].elapsed_seconds, epoch_seconds + 10.0);
        assert!(samples[2].elapsed_seconds > samples[1].elapsed_seconds);
        assert_eq!(samples[2].cumulative_distance, 200.0);
    }

    #[test]
    fn test_out_of_order_times_pass_through() {
        let track = timed_track(&[Some(0), Some(8_000), Some(3_000)]);
        let samples = build_profile(&track);

        assert_eq!(samples[1].elapsed_seconds, 8.0);
        assert_eq!(samples[2].elapsed_seconds, 3.0);
    }

    #[test]
    fn test_mismatched_lengths_are_best_effort() {
        let mut track = timed_track(&[Some(0), Some(1_000), Some(2_000)]);
        track.cumulative_distance.truncate(2);

        let samples = build_profile(&track);
        assert_eq!(samples.len(), 2);
    }
}
