//! Live binding slots: expression text plus cached parse/resolution state.
//!
//! A [`ControlReference`] is created per mapped control when a profile is
//! built. Its status is recomputed on every text edit and whenever the
//! device list changes; a syntactically valid expression whose device is
//! unplugged stays in [`ParseStatus::NoDevice`] and recovers automatically
//! when the device reappears.

use tracing::warn;

use crate::device::{ControlResolver, ControlState, DeviceQualifier};
use crate::expression::ast::Expr;
use crate::expression::parser::{parse, ParseError};

/// Cached outcome of parsing and resolving a reference's expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStatus {
    /// No binding; a valid state, not an error.
    EmptyExpression,
    /// Parsed and all referenced devices are currently attached.
    Successful,
    /// Parsed, but at least one referenced device/control is unavailable.
    /// Transient; cleared by the next hot-plug update.
    NoDevice,
    /// The expression text is malformed. The reference is inert until the
    /// user supplies a new valid expression.
    SyntaxError,
}

/// A binding from one logical control slot to an expression.
#[derive(Debug, Clone)]
pub struct ControlReference {
    expression: String,
    range: ControlState,
    status: ParseStatus,
    ast: Option<Expr>,
}

impl ControlReference {
    /// An unbound reference (empty expression, default range 1.0).
    pub fn new() -> Self {
        Self {
            expression: String::new(),
            range: 1.0,
            status: ParseStatus::EmptyExpression,
            ast: None,
        }
    }

    /// Creates a reference from saved expression text, parsing immediately.
    pub fn from_expression(expression: impl Into<String>) -> Self {
        let mut reference = Self::new();
        reference.set_expression(expression);
        reference
    }

    /// The current expression text, exactly as entered/saved.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Analog scale applied to the evaluated state.
    pub fn range(&self) -> ControlState {
        self.range
    }

    /// Sets the analog scale (1.0 = full deflection).
    pub fn set_range(&mut self, range: ControlState) {
        self.range = range;
    }

    /// The cached parse status; refresh with [`update`](Self::update).
    pub fn status(&self) -> ParseStatus {
        self.status
    }

    /// The parsed tree, when the expression parses.
    pub fn ast(&self) -> Option<&Expr> {
        self.ast.as_ref()
    }

    /// Replaces the expression text and reparses.
    ///
    /// A parse failure leaves the reference inert ([`ParseStatus::SyntaxError`],
    /// no tree) but keeps the text so the user can correct it. Returns the
    /// parse error, if any, for UI display.
    pub fn set_expression(&mut self, expression: impl Into<String>) -> Option<ParseError> {
        self.expression = expression.into();
        if self.expression.trim().is_empty() {
            self.status = ParseStatus::EmptyExpression;
            self.ast = None;
            return None;
        }
        match parse(&self.expression) {
            Ok(ast) => {
                self.ast = Some(ast);
                // Device availability is unknown until the next update().
                self.status = ParseStatus::Successful;
                None
            }
            Err(err) => {
                warn!(expression = %self.expression, %err, "expression failed to parse");
                self.ast = None;
                self.status = ParseStatus::SyntaxError;
                Some(err)
            }
        }
    }

    /// Recomputes device resolution against the current device list.
    ///
    /// Call on every hot-plug notification. Flips `Successful` ⇄ `NoDevice`;
    /// `SyntaxError` and `EmptyExpression` are sticky until the text changes.
    pub fn update(&mut self, resolver: &dyn ControlResolver, default_device: &DeviceQualifier) {
        let Some(ast) = &self.ast else {
            return;
        };
        let all_resolved = ast
            .controls()
            .iter()
            .all(|q| resolver.resolve(q, default_device).is_some());
        self.status = if all_resolved {
            ParseStatus::Successful
        } else {
            ParseStatus::NoDevice
        };
    }

    /// Evaluates the binding, scaled by `range` and clamped to [-1, 1].
    ///
    /// Safe to call every input-poll tick; unresolved atoms read 0.0.
    pub fn state(
        &self,
        resolver: &dyn ControlResolver,
        default_device: &DeviceQualifier,
    ) -> ControlState {
        match &self.ast {
            Some(ast) => {
                let eval = ast.evaluate(resolver, default_device);
                (eval.value * self.range).clamp(-1.0, 1.0)
            }
            None => 0.0,
        }
    }
}

impl Default for ControlReference {
    fn default() -> Self {
        Self::new()
    }
}
