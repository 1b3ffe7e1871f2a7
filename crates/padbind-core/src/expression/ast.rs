//! Parsed form of a binding expression and its evaluation semantics.
//!
//! Operator semantics over analog control states:
//!
//! - `|` (OR) takes the maximum of its operands, so either of two buttons
//!   drives the binding.
//! - `&` (AND) takes the minimum, so both must be held.
//! - `+` (ADD) sums the operands and clamps to [-1.0, 1.0], for combining
//!   half-axes into one analog value.
//! - `!` (NOT) inverts a boolean reading: an operand above the activation
//!   threshold becomes 0.0, anything else 1.0.
//!
//! An atom whose device is currently unplugged contributes 0.0 and marks the
//! evaluation as missing a device; evaluation itself never fails.

use std::fmt;

use crate::device::{ControlQualifier, ControlResolver, ControlState, DeviceQualifier};
use crate::expression::builder::needs_quoting;

/// Activation threshold shared by `!` and input detection: a control above
/// this state counts as "pressed".
pub const ACTIVATION_THRESHOLD: ControlState = 0.5;

/// Binary combinators, in the order of the grammar's precedence climb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    /// `|` — maximum of both operands.
    Or,
    /// `&` — minimum of both operands.
    And,
    /// `+` — clamped sum of both operands.
    Add,
}

impl BinaryOp {
    fn symbol(self) -> char {
        match self {
            BinaryOp::Or => '|',
            BinaryOp::And => '&',
            BinaryOp::Add => '+',
        }
    }

    /// Binding strength, low to high. Used by [`fmt::Display`] to emit the
    /// minimal parentheses that re-parse to the same tree.
    fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => 1,
            BinaryOp::And => 2,
            BinaryOp::Add => 3,
        }
    }
}

/// A parsed binding expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant, e.g. the `0.5` in `` `Axis X+` + 0.5 ``.
    Literal(f64),
    /// A control reference, optionally pinned to a device.
    Control(ControlQualifier),
    /// Unary boolean negation.
    Not(Box<Expr>),
    /// A binary combinator node.
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

/// Outcome of evaluating an expression against the current device list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Evaluation {
    /// The combined control state.
    pub value: ControlState,
    /// `true` if any atom referenced a device or control that could not be
    /// resolved. Such atoms contribute 0.0 to `value`.
    pub missing_device: bool,
}

impl Expr {
    /// Evaluates the expression, resolving each control atom through
    /// `resolver` (unqualified atoms resolve against `default_device`).
    pub fn evaluate(
        &self,
        resolver: &dyn ControlResolver,
        default_device: &DeviceQualifier,
    ) -> Evaluation {
        match self {
            Expr::Literal(v) => Evaluation {
                value: *v,
                missing_device: false,
            },
            Expr::Control(qualifier) => match resolver.resolve(qualifier, default_device) {
                Some(value) => Evaluation {
                    value,
                    missing_device: false,
                },
                None => Evaluation {
                    value: 0.0,
                    missing_device: true,
                },
            },
            Expr::Not(inner) => {
                let inner = inner.evaluate(resolver, default_device);
                Evaluation {
                    value: if inner.value > ACTIVATION_THRESHOLD {
                        0.0
                    } else {
                        1.0
                    },
                    missing_device: inner.missing_device,
                }
            }
            Expr::Binary { op, lhs, rhs } => {
                let l = lhs.evaluate(resolver, default_device);
                let r = rhs.evaluate(resolver, default_device);
                let value = match op {
                    BinaryOp::Or => l.value.max(r.value),
                    BinaryOp::And => l.value.min(r.value),
                    BinaryOp::Add => (l.value + r.value).clamp(-1.0, 1.0),
                };
                Evaluation {
                    value,
                    missing_device: l.missing_device || r.missing_device,
                }
            }
        }
    }

    /// Collects every control qualifier in the tree, in source order.
    pub fn controls(&self) -> Vec<&ControlQualifier> {
        let mut out = Vec::new();
        self.collect_controls(&mut out);
        out
    }

    fn collect_controls<'a>(&'a self, out: &mut Vec<&'a ControlQualifier>) {
        match self {
            Expr::Literal(_) => {}
            Expr::Control(q) => out.push(q),
            Expr::Not(inner) => inner.collect_controls(out),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_controls(out);
                rhs.collect_controls(out);
            }
        }
    }

    fn precedence(&self) -> u8 {
        match self {
            Expr::Binary { op, .. } => op.precedence(),
            // Unary and atoms bind tighter than any binary operator.
            _ => 4,
        }
    }

    /// `parenthesize_equal` is set for right operands: a right-nested chain
    /// of the same operator must keep its parentheses, because re-parsing
    /// without them produces a left-associated tree and ADD's per-node clamp
    /// makes that a different value.
    fn fmt_child(
        child: &Expr,
        parent_prec: u8,
        parenthesize_equal: bool,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let prec = child.precedence();
        if prec < parent_prec || (parenthesize_equal && prec == parent_prec) {
            write!(f, "({child})")
        } else {
            write!(f, "{child}")
        }
    }
}

impl fmt::Display for Expr {
    /// Canonical serialisation. Re-parsing the output yields an equivalent
    /// tree (round-trip invariant).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal(v) => write!(f, "{v}"),
            Expr::Control(q) => match &q.device {
                Some(device) => write!(f, "`{}:{}`", device, q.control),
                None if needs_quoting(&q.control) => write!(f, "`{}`", q.control),
                None => write!(f, "{}", q.control),
            },
            Expr::Not(inner) => {
                write!(f, "!")?;
                Expr::fmt_child(inner, 4, false, f)
            }
            Expr::Binary { op, lhs, rhs } => {
                Expr::fmt_child(lhs, op.precedence(), false, f)?;
                write!(f, " {} ", op.symbol())?;
                Expr::fmt_child(rhs, op.precedence(), true, f)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closure-backed resolver stub for evaluation tests.
    struct MapResolver(Vec<(ControlQualifier, ControlState)>);

    impl ControlResolver for MapResolver {
        fn resolve(
            &self,
            qualifier: &ControlQualifier,
            _default_device: &DeviceQualifier,
        ) -> Option<ControlState> {
            self.0
                .iter()
                .find(|(q, _)| q == qualifier)
                .map(|(_, v)| *v)
        }
    }

    fn ctl(name: &str) -> Expr {
        Expr::Control(ControlQualifier::unqualified(name))
    }

    fn default_dev() -> DeviceQualifier {
        DeviceQualifier::bare("Keyboard")
    }

    #[test]
    fn test_or_takes_maximum() {
        let expr = Expr::Binary {
            op: BinaryOp::Or,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("B")),
        };
        let resolver = MapResolver(vec![
            (ControlQualifier::unqualified("A"), 0.3),
            (ControlQualifier::unqualified("B"), 0.9),
        ]);
        let eval = expr.evaluate(&resolver, &default_dev());
        assert_eq!(eval.value, 0.9);
        assert!(!eval.missing_device);
    }

    #[test]
    fn test_and_takes_minimum() {
        let expr = Expr::Binary {
            op: BinaryOp::And,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("B")),
        };
        let resolver = MapResolver(vec![
            (ControlQualifier::unqualified("A"), 0.3),
            (ControlQualifier::unqualified("B"), 0.9),
        ]);
        assert_eq!(expr.evaluate(&resolver, &default_dev()).value, 0.3);
    }

    #[test]
    fn test_add_clamps_to_analog_range() {
        let expr = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("B")),
        };
        let resolver = MapResolver(vec![
            (ControlQualifier::unqualified("A"), 0.8),
            (ControlQualifier::unqualified("B"), 0.8),
        ]);
        assert_eq!(expr.evaluate(&resolver, &default_dev()).value, 1.0);
    }

    #[test]
    fn test_not_inverts_around_activation_threshold() {
        let resolver = MapResolver(vec![(ControlQualifier::unqualified("A"), 1.0)]);
        let pressed = Expr::Not(Box::new(ctl("A")));
        assert_eq!(pressed.evaluate(&resolver, &default_dev()).value, 0.0);

        let resolver = MapResolver(vec![(ControlQualifier::unqualified("A"), 0.2)]);
        assert_eq!(pressed.evaluate(&resolver, &default_dev()).value, 1.0);
    }

    #[test]
    fn test_missing_device_contributes_zero_and_flags() {
        let expr = Expr::Binary {
            op: BinaryOp::Or,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("Missing")),
        };
        let resolver = MapResolver(vec![(ControlQualifier::unqualified("A"), 0.7)]);
        let eval = expr.evaluate(&resolver, &default_dev());
        assert_eq!(eval.value, 0.7);
        assert!(eval.missing_device);
    }

    #[test]
    fn test_display_emits_minimal_parentheses() {
        // (A | B) & C needs parens; A | (B & C) does not (precedence already
        // binds & tighter).
        let or = Expr::Binary {
            op: BinaryOp::Or,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("B")),
        };
        let and = Expr::Binary {
            op: BinaryOp::And,
            lhs: Box::new(or),
            rhs: Box::new(ctl("C")),
        };
        assert_eq!(and.to_string(), "(A | B) & C");

        let not = Expr::Not(Box::new(Expr::Binary {
            op: BinaryOp::And,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(ctl("B")),
        }));
        assert_eq!(not.to_string(), "!(A & B)");
    }

    #[test]
    fn test_right_nested_add_keeps_parentheses_and_value() {
        // ADD clamps per node, so it is not associative: 0.8 + (0.8 + -0.8)
        // is 0.8, but left-associated ((0.8 + 0.8) + -0.8) is 0.2. The
        // serialised form must preserve the right nesting.
        let expr = Expr::Binary {
            op: BinaryOp::Add,
            lhs: Box::new(ctl("A")),
            rhs: Box::new(Expr::Binary {
                op: BinaryOp::Add,
                lhs: Box::new(ctl("B")),
                rhs: Box::new(ctl("C")),
            }),
        };
        assert_eq!(expr.to_string(), "A + (B + C)");

        let resolver = MapResolver(vec![
            (ControlQualifier::unqualified("A"), 0.8),
            (ControlQualifier::unqualified("B"), 0.8),
            (ControlQualifier::unqualified("C"), -0.8),
        ]);
        let reparsed = crate::expression::parser::parse(&expr.to_string()).unwrap();
        assert_eq!(reparsed, expr);
        let before = expr.evaluate(&resolver, &default_dev()).value;
        let after = reparsed.evaluate(&resolver, &default_dev()).value;
        assert_eq!(before, 0.8);
        assert_eq!(after, before);
    }

    #[test]
    fn test_display_quotes_device_qualified_controls() {
        let expr = Expr::Control(ControlQualifier::qualified(
            DeviceQualifier::new("XInput", 0, "Gamepad"),
            "Button A",
        ));
        assert_eq!(expr.to_string(), "`XInput/0/Gamepad:Button A`");
    }
}
