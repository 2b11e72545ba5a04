//! Attach a profile chart to a map, load a track and move the pointer around.
//!
//! Run with: cargo run --example profile_overlay

use std::rc::Rc;
use chrono::{Duration, TimeZone, Utc};
use track_profile::{
    build_profile, ChartOverlay, ControlLayer, GpsPoint, HeadlessBackend, OverlayConfig, Track,
    TrackPoint,
};

fn main() {
    // A short ride north out of London, one fix every 20 seconds
    let t0 = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let points: Vec<TrackPoint> = (0..8)
        .map(|i| {
            TrackPoint::new(
                GpsPoint::new(51.5074 + i as f64 * 0.0012, -0.1278 + i as f64 * 0.0004),
                Some(t0 + Duration::seconds(i * 20)),
            )
        })
        .collect();
    let track = Rc::new(Track::from_points(points));

    println!("Track: {} points, {:.0}m", track.len(), track.total_distance());
    if let Some(bounds) = track.bounds() {
        let center = bounds.center();
        println!("Map centered on ({:.4}, {:.4})\n", center.latitude, center.longitude);
    }

    let hovered_track = track.clone();
    let backend = HeadlessBackend::new();
    let mut overlay = ChartOverlay::new(backend.clone(), OverlayConfig::default())
        .on_hover(move |index| {
            let point = &hovered_track.points[index];
            println!(
                "   hover -> point {} at ({:.4}, {:.4})",
                index, point.position.latitude, point.position.longitude
            );
        });

    let mut map = ControlLayer::new();
    let surface_id = overlay.attach(&mut map).id();
    println!("Attached surface {:?}, chart available: {}", surface_id, overlay.has_chart());

    overlay.set_track((*track).clone());

    println!("\nProfile series:");
    for (i, sample) in backend.rendered_series().iter().enumerate() {
        println!("   {:>2}: {:>5.0}s {:>6.1}m", i, sample.elapsed_seconds, sample.cumulative_distance);
    }

    println!("\nPointer over the chart:");
    for sample in build_profile(&track).iter().step_by(3) {
        backend.pointer_move(sample.elapsed_seconds + 2.0, sample.cumulative_distance);
    }

    println!("\nPointer over the map:");
    let probe = GpsPoint::new(51.5110, -0.1266);
    match overlay.highlight_position(&probe, 100.0) {
        Some(index) => println!("   nearest point {} marked on chart", index),
        None => println!("   no point within 100m"),
    }

    overlay.detach(&mut map);
    println!("\nDetached, {} overlays left on the map", map.len());

    // A failing backend leaves the map usable
    let mut broken = ChartOverlay::new(HeadlessBackend::failing("no canvas"), OverlayConfig::default());
    broken.attach(&mut map);
    broken.set_track((*track).clone());
    println!("Broken backend: attached={}, chart={}", map.len() == 1, broken.has_chart());
}
