//! DetectBindingUseCase: "press a button to bind it".
//!
//! A mapping dialog hands this use case a set of device scopes and a target
//! control reference; the use case runs a blocking detection session against
//! the device registry, canonicalises whatever the user pressed into an
//! expression string, and installs it on the reference.  The dialog runs the
//! whole thing on a background thread and keeps its UI responsive.

use std::sync::Arc;

use tracing::info;

use padbind_core::device::{DeviceQualifier, DeviceRegistry};
use padbind_core::expression::builder::build_expression;
use padbind_core::expression::detect::{detect_input, DetectedInput, DetectionTimings};
use padbind_core::expression::reference::ControlReference;

/// Orchestrates input detection and binding construction over an injected
/// device registry.
pub struct DetectBindingUseCase {
    registry: Arc<DeviceRegistry>,
}

impl DetectBindingUseCase {
    pub fn new(registry: Arc<DeviceRegistry>) -> Self {
        Self { registry }
    }

    /// Runs one blocking detection session against `scopes`.
    ///
    /// An empty result means the user pressed nothing before `max_wait`, or
    /// none of the scoped devices were attached; either way the caller just
    /// leaves the existing binding in place.
    pub fn detect(
        &self,
        scopes: &[DeviceQualifier],
        timings: DetectionTimings,
    ) -> Vec<DetectedInput> {
        detect_input(&self.registry, scopes, timings)
    }

    /// Detects input and, on success, installs the built expression on
    /// `reference` and re-resolves it against the registry.
    ///
    /// Returns the installed expression string, or `None` when the session
    /// timed out with nothing detected (the reference is left untouched).
    pub fn detect_and_bind(
        &self,
        scopes: &[DeviceQualifier],
        timings: DetectionTimings,
        default_device: &DeviceQualifier,
        reference: &mut ControlReference,
    ) -> Option<String> {
        let detections = self.detect(scopes, timings);
        if detections.is_empty() {
            return None;
        }

        let expression = build_expression(&detections, default_device);
        info!(%expression, "detected input bound");
        reference.set_expression(expression.clone());
        reference.update(self.registry.as_ref(), default_device);
        Some(expression)
    }
}
