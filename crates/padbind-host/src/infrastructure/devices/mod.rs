//! Input device backends.
//!
//! A backend owns one input API (XInput, evdev, a keyboard hook) and
//! publishes the devices it enumerates into the shared [`DeviceRegistry`],
//! re-publishing on hot-plug so the registry's observers fire.  The core
//! never enumerates hardware itself.
//!
//! # Testability
//!
//! The `DeviceBackend` trait allows unit and integration tests to populate
//! the registry with [`mock::MockDevice`]s instead of real hardware.

use padbind_core::device::DeviceRegistry;
use thiserror::Error;

pub mod mock;

/// Error type for backend enumeration.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("input API unavailable: {0}")]
    ApiUnavailable(String),
    #[error("device enumeration failed: {0}")]
    EnumerationFailed(String),
}

/// Trait abstracting device enumeration.
///
/// Production implementations wrap platform input APIs; tests use
/// [`mock::MockBackend`].
pub trait DeviceBackend: Send {
    /// Enumerates this backend's devices into `registry`, replacing any of
    /// its previously published devices.
    fn populate(&self, registry: &DeviceRegistry) -> Result<(), BackendError>;
}
