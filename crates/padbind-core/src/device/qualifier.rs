//! Structured, serialisable identifiers for input devices and controls.
//!
//! A [`DeviceQualifier`] names a device by backend source, enumeration index,
//! and device name, and round-trips through the canonical string form
//! `"Source/Index/Name"` used in saved profiles and expression text. A bare
//! `"Name"` (no slashes) is accepted as shorthand for a device with an empty
//! source and index 0, so expressions can say `` `Keyboard:A` `` without
//! spelling out the full triple.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error returned when a qualifier string has neither the `Source/Index/Name`
/// shape nor the bare `Name` shape.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QualifierParseError {
    /// The string contains a single slash: too many parts for a bare name,
    /// too few for the full triple.
    #[error("device qualifier must be \"Source/Index/Name\" or a bare name, got {0:?}")]
    Malformed(String),

    /// The index component is not a non-negative integer.
    #[error("device index is not a number: {0:?}")]
    BadIndex(String),
}

/// Identifies an input device by `{source, index, name}`.
///
/// `source` is the platform backend that enumerated the device (e.g.
/// `XInput`, `evdev`, `Keyboard`), `index` disambiguates multiple devices of
/// the same kind, and `name` is the backend-reported device name.
///
/// Equality compares all three fields. The canonical textual form is
/// `Source/Index/Name`; names may contain further slashes, so parsing splits
/// on the first two separators only.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DeviceQualifier {
    pub source: String,
    pub index: u32,
    pub name: String,
}

impl DeviceQualifier {
    /// Creates a qualifier from its three components.
    pub fn new(source: impl Into<String>, index: u32, name: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            index,
            name: name.into(),
        }
    }

    /// Creates a bare-name qualifier (empty source, index 0).
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            source: String::new(),
            index: 0,
            name: name.into(),
        }
    }

    /// `true` when all components are empty/zero (the "no device" value).
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.index == 0 && self.name.is_empty()
    }

    fn is_bare(&self) -> bool {
        self.source.is_empty() && self.index == 0 && !self.name.is_empty()
    }
}

impl fmt::Display for DeviceQualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bare() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}/{}/{}", self.source, self.index, self.name)
        }
    }
}

impl FromStr for DeviceQualifier {
    type Err = QualifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((source, rest)) = s.split_once('/') else {
            return Ok(Self::bare(s));
        };
        let (index, name) = rest
            .split_once('/')
            .ok_or_else(|| QualifierParseError::Malformed(s.to_string()))?;
        let index: u32 = index
            .parse()
            .map_err(|_| QualifierParseError::BadIndex(index.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            index,
            name: name.to_string(),
        })
    }
}

// Serialise as the canonical string so profiles stay human-editable.
impl Serialize for DeviceQualifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceQualifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A control named inside an expression, optionally pinned to a device.
///
/// `device` is `None` when the token names a control on the *default* device
/// of the binding's owner (an unqualified `` `Button` `` or bare atom).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControlQualifier {
    pub device: Option<DeviceQualifier>,
    pub control: String,
}

impl ControlQualifier {
    /// A control on the owner's default device.
    pub fn unqualified(control: impl Into<String>) -> Self {
        Self {
            device: None,
            control: control.into(),
        }
    }

    /// A control pinned to a specific device.
    pub fn qualified(device: DeviceQualifier, control: impl Into<String>) -> Self {
        Self {
            device: Some(device),
            control: control.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualifier_round_trips_through_canonical_string() {
        let q = DeviceQualifier::new("XInput", 0, "Gamepad");
        let text = q.to_string();
        assert_eq!(text, "XInput/0/Gamepad");
        assert_eq!(text.parse::<DeviceQualifier>().unwrap(), q);
    }

    #[test]
    fn test_qualifier_name_may_contain_slashes() {
        let q: DeviceQualifier = "evdev/2/USB/HID Pad".parse().unwrap();
        assert_eq!(q.source, "evdev");
        assert_eq!(q.index, 2);
        assert_eq!(q.name, "USB/HID Pad");
    }

    #[test]
    fn test_bare_name_round_trips() {
        let q: DeviceQualifier = "Keyboard".parse().unwrap();
        assert_eq!(q, DeviceQualifier::bare("Keyboard"));
        assert_eq!(q.to_string(), "Keyboard");
    }

    #[test]
    fn test_qualifier_rejects_single_separator() {
        let err = "XInput/Gamepad".parse::<DeviceQualifier>().unwrap_err();
        assert!(matches!(err, QualifierParseError::Malformed(_)));
    }

    #[test]
    fn test_qualifier_rejects_non_numeric_index() {
        let err = "XInput/first/Gamepad".parse::<DeviceQualifier>().unwrap_err();
        assert_eq!(err, QualifierParseError::BadIndex("first".to_string()));
    }

    #[test]
    fn test_equality_compares_all_three_fields() {
        let a = DeviceQualifier::new("XInput", 0, "Gamepad");
        let b = DeviceQualifier::new("XInput", 1, "Gamepad");
        assert_ne!(a, b);
        assert_eq!(a, DeviceQualifier::new("XInput", 0, "Gamepad"));
    }
}
