//! # padbind-core
//!
//! Shared library for padbind containing the control-binding expression
//! engine, the octagonal mouse jail, and the device/profile domain model.
//!
//! This crate is used by the host-integration layer and by any frontend.
//! It has zero dependencies on OS APIs, UI frameworks, or input hardware.
//!
//! # Architecture overview (for beginners)
//!
//! padbind maps physical input devices onto emulated game controllers.  A
//! binding is a small textual expression (for example
//! `` `Keyboard:A` | `XInput/0/Gamepad:Button A` ``) evaluated once per
//! input-poll tick against the live device list.
//!
//! This crate (`padbind-core`) is the pure foundation.  It defines:
//!
//! - **`expression`** – Parsing, evaluation, and serialisation of binding
//!   expressions, plus the blocking "press a button to bind it" detection
//!   protocol every mapping dialog drives.
//!
//! - **`jail`** – The octagonal mouse jail: geometry that constrains mouse
//!   samples to an analog-stick gate inscribed in the render window.
//!
//! - **`device`** – Device and control qualifiers, and the registry the
//!   host's platform backends publish devices into.
//!
//! - **`profile`** – Named binding sets with the thin key/value contract
//!   the persistence layer speaks.

// Declare the top-level modules.  Rust will look for each in a
// subdirectory with the same name (e.g., src/expression/mod.rs).
pub mod device;
pub mod expression;
pub mod jail;
pub mod profile;

// Re-export the most-used types at the crate root so callers can write
// `padbind_core::ControlReference` instead of the full module path.
pub use device::{
    ControlQualifier, ControlResolver, ControlState, DeviceQualifier, DeviceRegistry, InputDevice,
    QualifierParseError,
};
pub use expression::ast::{Evaluation, Expr};
pub use expression::builder::build_expression;
pub use expression::detect::{detect_input, DetectedInput, DetectionTimings};
pub use expression::parser::ParseError;
pub use expression::reference::{ControlReference, ParseStatus};
pub use jail::{ExtendedWindowInfo, JailSettings, Octagon, OctagonalMouseJail, Point};
pub use profile::MappingProfile;
