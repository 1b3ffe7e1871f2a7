//! Owned, injectable registry of attached input devices.
//!
//! The registry replaces a process-global device list: the host constructs
//! one, platform backends add and remove devices through it (hot-plug), and
//! everything that resolves control references borrows it. Observers
//! registered with [`DeviceRegistry::add_observer`] run synchronously on
//! every change so profile owners can re-resolve their bindings.
//!
//! Resolution returning "device not found" is an ordinary outcome, never an
//! error: an unplugged gamepad leaves its bindings inert until it reappears.

use std::sync::{Arc, RwLock};

use tracing::debug;

use super::qualifier::{ControlQualifier, DeviceQualifier};

/// Instantaneous analog state of a control. Digital inputs report 0.0 or 1.0;
/// axes report their deflection, typically within [-1.0, 1.0].
pub type ControlState = f64;

/// A live input device enumerated by a platform backend.
///
/// Implementations are provided by the host's infrastructure layer; the core
/// only ever reads instantaneous state through this trait.
pub trait InputDevice: Send + Sync {
    /// The qualifier this device answers to.
    fn qualifier(&self) -> DeviceQualifier;

    /// Names of all inputs this device exposes.
    fn input_names(&self) -> Vec<String>;

    /// Instantaneous state of one input, or `None` if the name is unknown.
    fn input_state(&self, name: &str) -> Option<ControlState>;
}

/// Seam between expression evaluation and the device list.
///
/// [`DeviceRegistry`] is the production implementation; tests may substitute
/// a closure-backed stub.
pub trait ControlResolver {
    /// Resolves a control to its instantaneous state, falling back to
    /// `default_device` when the qualifier names no device of its own.
    ///
    /// Returns `None` when the device or control is currently unavailable.
    fn resolve(
        &self,
        qualifier: &ControlQualifier,
        default_device: &DeviceQualifier,
    ) -> Option<ControlState>;
}

type HotplugObserver = Box<dyn Fn() + Send + Sync>;

/// The owned device list plus hot-plug observer callbacks.
pub struct DeviceRegistry {
    devices: RwLock<Vec<Arc<dyn InputDevice>>>,
    observers: RwLock<Vec<HotplugObserver>>,
}

impl DeviceRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            devices: RwLock::new(Vec::new()),
            observers: RwLock::new(Vec::new()),
        }
    }

    /// Adds a device, replacing any existing device with the same qualifier,
    /// and notifies observers.
    pub fn add_device(&self, device: Arc<dyn InputDevice>) {
        let qualifier = device.qualifier();
        {
            let mut devices = self.devices.write().expect("device list lock poisoned");
            devices.retain(|d| d.qualifier() != qualifier);
            devices.push(device);
        }
        debug!(%qualifier, "device attached");
        self.notify_observers();
    }

    /// Removes the device with the given qualifier (if present) and notifies
    /// observers. Removing an unknown qualifier is a no-op.
    pub fn remove_device(&self, qualifier: &DeviceQualifier) {
        let removed = {
            let mut devices = self.devices.write().expect("device list lock poisoned");
            let before = devices.len();
            devices.retain(|d| d.qualifier() != *qualifier);
            devices.len() != before
        };
        if removed {
            debug!(%qualifier, "device detached");
            self.notify_observers();
        }
    }

    /// Qualifiers of all currently attached devices.
    pub fn device_qualifiers(&self) -> Vec<DeviceQualifier> {
        self.devices
            .read()
            .expect("device list lock poisoned")
            .iter()
            .map(|d| d.qualifier())
            .collect()
    }

    /// Looks up a device by qualifier.
    pub fn find_device(&self, qualifier: &DeviceQualifier) -> Option<Arc<dyn InputDevice>> {
        self.devices
            .read()
            .expect("device list lock poisoned")
            .iter()
            .find(|d| d.qualifier() == *qualifier)
            .cloned()
    }

    /// Registers a callback invoked after every add/remove. Callbacks run on
    /// the thread performing the mutation.
    pub fn add_observer(&self, observer: impl Fn() + Send + Sync + 'static) {
        self.observers
            .write()
            .expect("observer lock poisoned")
            .push(Box::new(observer));
    }

    fn notify_observers(&self) {
        let observers = self.observers.read().expect("observer lock poisoned");
        for observer in observers.iter() {
            observer();
        }
    }
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ControlResolver for DeviceRegistry {
    fn resolve(
        &self,
        qualifier: &ControlQualifier,
        default_device: &DeviceQualifier,
    ) -> Option<ControlState> {
        let device_qualifier = qualifier.device.as_ref().unwrap_or(default_device);
        let device = self.find_device(device_qualifier)?;
        device.input_state(&qualifier.control)
    }
}
