//! The clamp/snap engine constraining a mouse sample to the octagonal gate.
//!
//! Every call to [`OctagonalMouseJail::lock`] is an independent, stateless
//! decision over the current settings, window snapshot, and cached octagon —
//! there is no locked/unlocked state to get out of sync with the polling
//! loop. Host-environment gating (emulation active, window focus, non-client
//! drags) lives in the host's jail service; this type only knows geometry.

use tracing::debug;

use super::geometry::{ExtendedWindowInfo, Point};
use super::octagon::{Compass, Octagon};

/// When the line from window center to the mouse is within this many units
/// of vertical, its slope is not computed; the sample snaps straight to the
/// NORTH or SOUTH vertex instead.
const VERTICAL_CENTER_RAY_GUARD: f64 = 1.0;

/// Slope denominators below this are treated as zero.
const PARALLEL_EPSILON: f64 = 1e-9;

/// Process-wide jail settings, loaded from persisted configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JailSettings {
    /// Gate shrink factor; 1.0 fills the window. Clamped to ≥ 1.0.
    pub sensitivity: f64,
    /// Distance within which an out-of-gate sample hard-locks to the
    /// nearest vertex, letting players reliably hit full diagonals.
    pub snapping_distance: f64,
    /// Master enable; when false the jail passes every sample through.
    pub enabled: bool,
}

impl JailSettings {
    /// Clamps out-of-range values to their documented minima.
    pub fn sanitized(self) -> Self {
        Self {
            sensitivity: if self.sensitivity.is_finite() {
                self.sensitivity.max(1.0)
            } else {
                1.0
            },
            snapping_distance: if self.snapping_distance.is_finite() {
                self.snapping_distance.max(0.0)
            } else {
                0.0
            },
            enabled: self.enabled,
        }
    }
}

impl Default for JailSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1.0,
            snapping_distance: 0.0,
            enabled: false,
        }
    }
}

/// The octagonal mouse jail.
///
/// Starts uninitialised (no window handle, zeroed octagon) and becomes ready
/// on the first [`update_render_window_info`](Self::update_render_window_info);
/// both update paths are idempotent recomputations with no accumulated state.
#[derive(Debug, Clone)]
pub struct OctagonalMouseJail {
    settings: JailSettings,
    window: ExtendedWindowInfo,
    octagon: Octagon,
}

impl OctagonalMouseJail {
    /// An uninitialised jail with default (disabled) settings.
    pub fn new() -> Self {
        Self {
            settings: JailSettings::default(),
            window: ExtendedWindowInfo::default(),
            octagon: Octagon::default(),
        }
    }

    pub fn settings(&self) -> JailSettings {
        self.settings
    }

    pub fn window(&self) -> ExtendedWindowInfo {
        self.window
    }

    pub fn octagon(&self) -> &Octagon {
        &self.octagon
    }

    /// Re-snapshots the render window geometry and regenerates the octagon.
    /// Safe to call redundantly.
    pub fn update_render_window_info(&mut self, window: ExtendedWindowInfo) {
        self.window = window;
        self.octagon = Octagon::generate(&window, self.settings.sensitivity);
        debug!(
            width = window.width(),
            height = window.height(),
            "render window info updated, octagon regenerated"
        );
    }

    /// Installs freshly loaded settings and regenerates the octagon (the
    /// sensitivity scalar shapes it).
    pub fn refresh_settings(&mut self, settings: JailSettings) {
        self.settings = settings.sanitized();
        self.octagon = Octagon::generate(&self.window, self.settings.sensitivity);
    }

    /// Constrains one mouse sample to the gate.
    ///
    /// Passes the sample through unchanged when the jail is disabled or the
    /// window snapshot is degenerate (zero area, no handle) — malformed
    /// geometry degrades to "unclamped", never to a division by zero. A
    /// sample already inside the gate is returned as-is; anything else is
    /// snapped to the gate boundary.
    pub fn lock(&self, p: Point) -> Point {
        if !self.settings.enabled || self.window.is_degenerate() {
            return p;
        }
        if self.octagon.contains(p) {
            return p;
        }
        self.snap_to_jail(p)
    }

    /// Snaps an out-of-gate sample onto the gate boundary.
    ///
    /// Nearest vertex first: within `snapping_distance` the sample
    /// hard-locks to that vertex. Otherwise the result is the intersection
    /// of the facing gate edge's line with the line from window center
    /// through the sample — unless that center ray is near-vertical, in
    /// which case the sample snaps to the NORTH or SOUTH vertex outright.
    pub fn snap_to_jail(&self, p: Point) -> Point {
        let nearest = self.octagon.nearest_vertex(p);
        let vertex = self.octagon.vertex(nearest);

        if p.distance_to(vertex) < self.settings.snapping_distance {
            return vertex;
        }

        let center = self.window.center();
        let run = p.x - center.x;
        if run.abs() < VERTICAL_CENTER_RAY_GUARD {
            // Near-vertical center ray: no finite slope to intersect with.
            return if p.y < center.y {
                self.octagon.vertex(Compass::North)
            } else {
                self.octagon.vertex(Compass::South)
            };
        }

        let ray_slope = (p.y - center.y) / run;
        let ray_intercept = center.y - ray_slope * center.x;

        let neighbor = self.octagon.edge_neighbor(nearest, p);
        let second = self.octagon.vertex(neighbor);

        let edge_run = second.x - vertex.x;
        if edge_run.abs() < PARALLEL_EPSILON {
            // Degenerate vertical edge line: intersect at its x directly.
            return Point::new(vertex.x, ray_slope * vertex.x + ray_intercept);
        }

        let edge_slope = (second.y - vertex.y) / edge_run;
        let edge_intercept = vertex.y - edge_slope * vertex.x;

        if (edge_slope - ray_slope).abs() < PARALLEL_EPSILON {
            // Parallel lines cannot intersect; fall back to the vertex.
            return vertex;
        }

        let x = (ray_intercept - edge_intercept) / (edge_slope - ray_slope);
        Point::new(x, edge_slope * x + edge_intercept)
    }
}

impl Default for OctagonalMouseJail {
    fn default() -> Self {
        Self::new()
    }
}
