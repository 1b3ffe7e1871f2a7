//! Mapping profiles: named sets of control bindings with a default device.
//!
//! The contract with the persistence layer is deliberately thin: a profile
//! is built from a key/value string map and serialises back to one. File
//! formats, merge layers, and I/O stay on the host side.

use std::collections::BTreeMap;

use crate::device::{ControlResolver, DeviceQualifier};
use crate::expression::reference::ControlReference;

/// Reserved profile key holding the default device qualifier string.
pub const DEVICE_KEY: &str = "Device";

/// One controller profile: a default device plus expression bindings keyed
/// by control name.
#[derive(Debug, Default)]
pub struct MappingProfile {
    default_device: DeviceQualifier,
    bindings: BTreeMap<String, ControlReference>,
}

impl MappingProfile {
    pub fn new(default_device: DeviceQualifier) -> Self {
        Self {
            default_device,
            bindings: BTreeMap::new(),
        }
    }

    /// Builds a profile from a persisted key/value map.
    ///
    /// The `Device` key sets the default device (a malformed qualifier
    /// degrades to the empty default, it is never a hard failure); every
    /// other key becomes a binding whose expression is parsed immediately,
    /// so syntax errors surface as per-reference parse status rather than
    /// tearing down the whole profile.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let mut default_device = DeviceQualifier::default();
        let mut bindings = BTreeMap::new();
        for (key, value) in entries {
            let key = key.into();
            if key == DEVICE_KEY {
                default_device = value.as_ref().parse().unwrap_or_default();
            } else {
                bindings.insert(key, ControlReference::from_expression(value.as_ref()));
            }
        }
        Self {
            default_device,
            bindings,
        }
    }

    /// Serialises the profile back to a key/value map, including the
    /// `Device` key. Empty bindings are kept so a deliberately cleared
    /// control round-trips as cleared.
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        let mut entries = BTreeMap::new();
        entries.insert(DEVICE_KEY.to_owned(), self.default_device.to_string());
        for (control, reference) in &self.bindings {
            entries.insert(control.clone(), reference.expression().to_owned());
        }
        entries
    }

    pub fn default_device(&self) -> &DeviceQualifier {
        &self.default_device
    }

    pub fn set_default_device(&mut self, device: DeviceQualifier) {
        self.default_device = device;
    }

    pub fn binding(&self, control: &str) -> Option<&ControlReference> {
        self.bindings.get(control)
    }

    pub fn binding_mut(&mut self, control: &str) -> Option<&mut ControlReference> {
        self.bindings.get_mut(control)
    }

    /// Installs or replaces the binding for `control`.
    pub fn set_binding(&mut self, control: impl Into<String>, reference: ControlReference) {
        self.bindings.insert(control.into(), reference);
    }

    pub fn controls(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(String::as_str)
    }

    /// Re-resolves every binding's devices against the current device list.
    /// Called from the hot-plug observer so `NoDevice` references recover
    /// automatically when their device reappears.
    pub fn update_references(&mut self, resolver: &dyn ControlResolver) {
        for reference in self.bindings.values_mut() {
            reference.update(resolver, &self.default_device);
        }
    }
}
