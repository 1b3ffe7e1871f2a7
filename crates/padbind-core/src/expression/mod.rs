//! The input-binding expression engine.
//!
//! Translates between human-editable binding text like
//! `` `Keyboard:A` | `XInput/0/Gamepad:Button A` `` and a live, evaluatable
//! binding, and drives the interactive "detect next input" workflow every
//! mapping dialog uses.
//!
//! Parsing and evaluation are synchronous and non-blocking, safe to run on
//! the input-polling thread each tick. [`detect::detect_input`] is the one
//! blocking call and is expected to run on a background thread.

pub mod ast;
pub mod builder;
pub mod detect;
pub mod parser;
pub mod reference;

pub use ast::{BinaryOp, Evaluation, Expr, ACTIVATION_THRESHOLD};
pub use builder::{build_expression, expression_for_control, remove_spurious_trigger_combinations};
pub use detect::{detect_input, DetectedInput, DetectionTimings};
pub use parser::{parse, ParseError};
pub use reference::{ControlReference, ParseStatus};
