//! Mock input devices for unit and integration testing.
//!
//! Allows tests to script control actuations without real hardware: a
//! [`MockDevice`] is published into the registry, then a test thread flips
//! control states while a detection session polls.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use padbind_core::device::{ControlState, DeviceQualifier, DeviceRegistry, InputDevice};

use super::{BackendError, DeviceBackend};

/// An in-memory device whose control states are set directly by tests.
pub struct MockDevice {
    qualifier: DeviceQualifier,
    controls: Vec<String>,
    states: Arc<Mutex<HashMap<String, ControlState>>>,
}

impl MockDevice {
    /// Creates a mock device exposing `controls`, all initially released.
    pub fn new(qualifier: DeviceQualifier, controls: &[&str]) -> Self {
        Self {
            qualifier,
            controls: controls.iter().map(|c| (*c).to_owned()).collect(),
            states: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Sets the instantaneous state of one control, as if actuated by the
    /// user.  Unknown control names are ignored.
    pub fn set_control(&self, name: &str, state: ControlState) {
        if self.controls.iter().any(|c| c == name) {
            let mut states = self.states.lock().expect("lock poisoned");
            states.insert(name.to_owned(), state);
        }
    }

    /// Releases every control back to 0.
    pub fn release_all(&self) {
        self.states.lock().expect("lock poisoned").clear();
    }
}

impl InputDevice for MockDevice {
    fn qualifier(&self) -> DeviceQualifier {
        self.qualifier.clone()
    }

    fn input_names(&self) -> Vec<String> {
        self.controls.clone()
    }

    fn input_state(&self, name: &str) -> Option<ControlState> {
        if !self.controls.iter().any(|c| c == name) {
            return None;
        }
        let states = self.states.lock().expect("lock poisoned");
        Some(states.get(name).copied().unwrap_or(0.0))
    }
}

/// A backend publishing a fixed set of mock devices.
pub struct MockBackend {
    devices: Vec<Arc<MockDevice>>,
}

impl MockBackend {
    pub fn new(devices: Vec<Arc<MockDevice>>) -> Self {
        Self { devices }
    }
}

impl DeviceBackend for MockBackend {
    fn populate(&self, registry: &DeviceRegistry) -> Result<(), BackendError> {
        for device in &self.devices {
            registry.add_device(device.clone());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_device_reports_released_controls_as_zero() {
        // Arrange
        let device = MockDevice::new(DeviceQualifier::bare("Keyboard"), &["A", "B"]);

        // Act / Assert
        assert_eq!(device.input_state("A"), Some(0.0));
        assert_eq!(device.input_state("Missing"), None);
    }

    #[test]
    fn test_set_control_and_release_all() {
        // Arrange
        let device = MockDevice::new(DeviceQualifier::bare("Keyboard"), &["A"]);

        // Act
        device.set_control("A", 1.0);
        assert_eq!(device.input_state("A"), Some(1.0));
        device.release_all();

        // Assert
        assert_eq!(device.input_state("A"), Some(0.0));
    }

    #[test]
    fn test_backend_populates_registry() {
        // Arrange
        let registry = DeviceRegistry::new();
        let backend = MockBackend::new(vec![
            Arc::new(MockDevice::new(DeviceQualifier::bare("Keyboard"), &["A"])),
            Arc::new(MockDevice::new(
                DeviceQualifier::new("XInput", 0, "Gamepad"),
                &["Button A"],
            )),
        ]);

        // Act
        backend.populate(&registry).expect("populate");

        // Assert
        assert_eq!(registry.device_qualifiers().len(), 2);
    }
}
