//! Device model: qualifiers identifying input devices and the registry that
//! owns the live device list.
//!
//! The registry is an explicitly owned, injectable object. Nothing in this
//! crate reaches for process-global state; the host constructs one
//! [`DeviceRegistry`], hands it to whatever needs device resolution, and
//! delivers hot-plug events through it.

pub mod qualifier;
pub mod registry;

pub use qualifier::{ControlQualifier, DeviceQualifier, QualifierParseError};
pub use registry::{ControlResolver, ControlState, DeviceRegistry, InputDevice};
