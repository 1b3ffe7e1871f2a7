//! MouseJailService: host-side gating and locking around the mouse jail.
//!
//! The jail geometry in `padbind-core` is a pure per-sample computation; this
//! service adds everything it deliberately does not know about the host:
//!
//! - whether emulation is currently running or paused,
//! - whether the render window has input focus,
//! - whether the pointer is interacting with a non-client area (title bar,
//!   menu), where clamping would fight the window manager,
//! - the reader/writer lock that lets the UI thread refresh configuration
//!   while the input thread locks samples, without the input thread ever
//!   observing a half-regenerated octagon.

use std::sync::{Arc, RwLock};

use tracing::debug;

use padbind_core::jail::{ExtendedWindowInfo, JailSettings, OctagonalMouseJail, Point};

/// Host state the jail gating consults once per sample.
///
/// The production implementation reads emulator and window-system state;
/// tests use [`FixedHostSignals`].
pub trait HostSignals: Send + Sync {
    /// Emulation is running or paused (not stopped).
    fn emulation_active(&self) -> bool;
    /// The render window currently has input focus.
    fn render_window_focused(&self) -> bool;
    /// The pointer is over a non-client area such as the title bar.
    fn pointer_in_nonclient_area(&self) -> bool;
}

/// Wraps an [`OctagonalMouseJail`] with host gating and interior locking.
pub struct MouseJailService {
    signals: Arc<dyn HostSignals>,
    jail: RwLock<OctagonalMouseJail>,
}

impl MouseJailService {
    pub fn new(signals: Arc<dyn HostSignals>) -> Self {
        Self {
            signals,
            jail: RwLock::new(OctagonalMouseJail::new()),
        }
    }

    /// Constrains one polled mouse sample.
    ///
    /// Pass-through unless all of: emulation is running or paused, the
    /// render window has focus, the jail is enabled, and the pointer is in
    /// the client area.  Called from the input-polling thread at sample
    /// rate; takes the read lock only.
    pub fn lock_mouse_in_jail(&self, p: Point) -> Point {
        if !self.signals.emulation_active()
            || !self.signals.render_window_focused()
            || self.signals.pointer_in_nonclient_area()
        {
            return p;
        }
        match self.jail.read() {
            Ok(jail) => jail.lock(p),
            // A poisoned lock means a writer panicked mid-update; fail open.
            Err(_) => p,
        }
    }

    /// Re-snapshots the render window geometry.  Called from the UI thread
    /// on window move/resize; safe to call redundantly.
    pub fn update_render_window_info(&self, window: ExtendedWindowInfo) {
        if let Ok(mut jail) = self.jail.write() {
            jail.update_render_window_info(window);
        }
    }

    /// Installs freshly loaded settings so the next sample uses them, no
    /// restart required.  Called from the settings UI after an edit.
    pub fn refresh_config_values(&self, settings: JailSettings) {
        debug!(?settings, "jail configuration refreshed");
        if let Ok(mut jail) = self.jail.write() {
            jail.refresh_settings(settings);
        }
    }
}

/// Fixed-answer [`HostSignals`] for tests.
pub struct FixedHostSignals {
    pub emulation_active: bool,
    pub render_window_focused: bool,
    pub pointer_in_nonclient_area: bool,
}

impl FixedHostSignals {
    /// Signals under which the jail is allowed to clamp.
    pub fn all_clear() -> Self {
        Self {
            emulation_active: true,
            render_window_focused: true,
            pointer_in_nonclient_area: false,
        }
    }
}

impl HostSignals for FixedHostSignals {
    fn emulation_active(&self) -> bool {
        self.emulation_active
    }

    fn render_window_focused(&self) -> bool {
        self.render_window_focused
    }

    fn pointer_in_nonclient_area(&self) -> bool {
        self.pointer_in_nonclient_area
    }
}
