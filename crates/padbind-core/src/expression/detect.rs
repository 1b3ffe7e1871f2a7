//! Interactive "press a button to bind it" detection.
//!
//! [`detect_input`] is the one deliberately blocking operation in this crate.
//! It polls the instantaneous state of a set of candidate devices at a fixed
//! interval, waiting for the user to actuate something:
//!
//! 1. At arm time the current state of every control is snapshotted so
//!    already-held inputs (a resting axis, a stuck button) are ignored.
//! 2. The first new actuation above the noise threshold must arrive within
//!    `initial_wait`.
//! 3. The actuated control(s) must then stay held for `confirmation_wait`
//!    (debounce against noisy sensors); a release during the confirmation
//!    window re-arms the wait.
//! 4. The whole session is bounded by `max_wait`; timing out returns
//!    whatever was captured — usually an empty vector, which is a normal
//!    outcome, not an error.
//!
//! Callers run this on a background thread; the UI disables further
//! detection attempts while a session is active, so no internal mutual
//! exclusion is needed here.

use std::collections::HashSet;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, trace};

use crate::device::{DeviceQualifier, DeviceRegistry};
use crate::expression::ast::ACTIVATION_THRESHOLD;

/// How often device state is sampled during a detection session.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Wall-clock bounds for one detection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectionTimings {
    /// Maximum wait for the first qualifying actuation.
    pub initial_wait: Duration,
    /// How long the actuation must be held before it is accepted.
    pub confirmation_wait: Duration,
    /// Hard bound on the whole session, including confirmation.
    pub max_wait: Duration,
}

impl Default for DetectionTimings {
    fn default() -> Self {
        Self {
            initial_wait: Duration::from_secs(3),
            confirmation_wait: Duration::from_millis(50),
            max_wait: Duration::from_secs(5),
        }
    }
}

/// One control captured by a detection session.
///
/// Ordered by device then control, the order detection results are
/// returned in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DetectedInput {
    /// The device the control lives on.
    pub device: DeviceQualifier,
    /// The control's name as reported by the device.
    pub control: String,
}

/// Blocks until the user actuates and holds a control on one of the scoped
/// devices, or until the session times out.
///
/// `scopes` selects which attached devices participate; passing every
/// attached qualifier scans all devices, passing one scans just it. Unknown
/// qualifiers are skipped (the device may have been unplugged since the
/// caller enumerated it). Returns one entry per (device, control) pair,
/// sorted by device then control, so chords survive into expression
/// building and the same chord always produces the same result.
pub fn detect_input(
    registry: &DeviceRegistry,
    scopes: &[DeviceQualifier],
    timings: DetectionTimings,
) -> Vec<DetectedInput> {
    let started = Instant::now();
    debug!(?timings, devices = scopes.len(), "detection session armed");

    // Controls already active at arm time are excluded for the whole session.
    let baseline: HashSet<DetectedInput> = sample_active(registry, scopes);

    let mut pending: Vec<DetectedInput> = Vec::new();
    let mut confirm_deadline = Instant::now();

    loop {
        let now = Instant::now();
        if now.duration_since(started) >= timings.max_wait {
            debug!(captured = pending.len(), "detection session hit max wait");
            pending.sort();
            return pending;
        }

        let active: Vec<DetectedInput> = sample_active(registry, scopes)
            .into_iter()
            .filter(|d| !baseline.contains(d))
            .collect();

        if pending.is_empty() {
            if !active.is_empty() {
                trace!(count = active.len(), "first actuation captured");
                pending = active;
                confirm_deadline = now + timings.confirmation_wait;
            } else if now.duration_since(started) >= timings.initial_wait {
                debug!("detection session timed out waiting for first actuation");
                return Vec::new();
            }
        } else {
            // Every pending control must still be held; a release re-arms.
            let all_held = pending.iter().all(|d| active.contains(d));
            if !all_held {
                trace!("actuation released during confirmation, re-arming");
                pending.clear();
            } else if now >= confirm_deadline {
                debug!(captured = pending.len(), "detection confirmed");
                // Samples come out of a set; sort so the same physical chord
                // always builds the same expression text.
                pending.sort();
                return pending;
            }
        }

        thread::sleep(POLL_INTERVAL);
    }
}

/// Samples every scoped device and returns the controls currently above the
/// activation threshold.
fn sample_active(registry: &DeviceRegistry, scopes: &[DeviceQualifier]) -> HashSet<DetectedInput> {
    let mut active = HashSet::new();
    for qualifier in scopes {
        let Some(device) = registry.find_device(qualifier) else {
            continue;
        };
        for name in device.input_names() {
            if let Some(state) = device.input_state(&name) {
                if state.abs() > ACTIVATION_THRESHOLD {
                    active.insert(DetectedInput {
                        device: qualifier.clone(),
                        control: name,
                    });
                }
            }
        }
    }
    active
}
