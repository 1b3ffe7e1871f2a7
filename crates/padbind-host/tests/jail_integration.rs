//! Integration tests for the mouse jail service.
//!
//! These tests exercise `MouseJailService` the way the host wires it up:
//! settings loaded from an `InputConfig`, window geometry pushed in from
//! the windowing layer, and samples locked from a polling loop.

use std::sync::Arc;
use std::thread;

use padbind_core::jail::{Compass, ExtendedWindowInfo, Octagon, Point};
use padbind_host::application::jail_service::{FixedHostSignals, MouseJailService};
use padbind_host::infrastructure::storage::config::InputConfig;

fn window_800x600() -> ExtendedWindowInfo {
    // try_init inside makes repeat calls across tests harmless.
    padbind_host::logging::init("debug");
    ExtendedWindowInfo::from_bounds(1, 0.0, 0.0, 800.0, 600.0)
}

fn enabled_config(snapping_distance: f64) -> InputConfig {
    InputConfig {
        mouse_sensitivity: 1.0,
        snapping_distance,
        octagonal_mouse_jail_enabled: true,
    }
}

#[test]
fn test_config_to_lock_pipeline_clamps_outside_sample() {
    let service = MouseJailService::new(Arc::new(FixedHostSignals::all_clear()));
    service.refresh_config_values(enabled_config(0.0).jail_settings());
    service.update_render_window_info(window_800x600());

    let inside = Point::new(410.0, 295.0);
    assert_eq!(service.lock_mouse_in_jail(inside), inside);

    let outside = Point::new(2_000.0, 300.0);
    let locked = service.lock_mouse_in_jail(outside);
    let east = Octagon::generate(&window_800x600(), 1.0).vertex(Compass::East);
    assert!(locked.distance_to(east) < 1e-6, "got {locked:?}");
}

#[test]
fn test_snapping_distance_from_config_hard_locks_near_vertices() {
    let service = MouseJailService::new(Arc::new(FixedHostSignals::all_clear()));
    service.refresh_config_values(enabled_config(10.0).jail_settings());
    service.update_render_window_info(window_800x600());

    let east = Octagon::generate(&window_800x600(), 1.0).vertex(Compass::East);
    let near = Point::new(east.x + 5.94, east.y + 7.92);
    assert_eq!(service.lock_mouse_in_jail(near), east);
}

#[test]
fn test_window_resize_moves_the_gate() {
    let service = MouseJailService::new(Arc::new(FixedHostSignals::all_clear()));
    service.refresh_config_values(enabled_config(0.0).jail_settings());
    service.update_render_window_info(window_800x600());

    // Well outside the 800x600 gate.
    let sample = Point::new(1_500.0, 450.0);
    let locked_small = service.lock_mouse_in_jail(sample);
    assert_ne!(locked_small, sample);

    // After resizing to 3200x1800 the same sample is inside and untouched.
    service.update_render_window_info(ExtendedWindowInfo::from_bounds(
        1, 0.0, 0.0, 3_200.0, 1_800.0,
    ));
    assert_eq!(service.lock_mouse_in_jail(sample), sample);
}

#[test]
fn test_concurrent_locking_and_refresh_never_panics() {
    // The polling thread locks samples while the UI thread refreshes
    // geometry; readers must never observe a half-updated octagon, and
    // every locked point must stay finite.
    let service = Arc::new(MouseJailService::new(Arc::new(
        FixedHostSignals::all_clear(),
    )));
    service.refresh_config_values(enabled_config(5.0).jail_settings());
    service.update_render_window_info(window_800x600());

    let poller = {
        let service = service.clone();
        thread::spawn(move || {
            for i in 0..2_000 {
                let p = Point::new((i * 7 % 3_000) as f64, (i * 13 % 2_000) as f64 - 500.0);
                let locked = service.lock_mouse_in_jail(p);
                assert!(locked.x.is_finite() && locked.y.is_finite());
            }
        })
    };

    let resizer = {
        let service = service.clone();
        thread::spawn(move || {
            for i in 0..200 {
                let w = 400.0 + (i % 10) as f64 * 200.0;
                service.update_render_window_info(ExtendedWindowInfo::from_bounds(
                    1,
                    0.0,
                    0.0,
                    w,
                    w * 0.75,
                ));
            }
        })
    };

    poller.join().unwrap();
    resizer.join().unwrap();
}
