//! Construction of canonical expression text from detected inputs.
//!
//! These helpers are the write side of the expression grammar: given the
//! controls an interactive detection pass captured, they emit the exact text
//! the parser accepts, applying the quoting rules and the spurious
//! trigger-combination policy.

use crate::device::DeviceQualifier;
use crate::expression::detect::DetectedInput;
use crate::expression::parser::is_bare_name;

/// `true` when a control name cannot be written as a bare atom and must be
/// backtick-quoted (spaces, punctuation, leading digit, empty name).
pub fn needs_quoting(name: &str) -> bool {
    !is_bare_name(name)
}

/// Formats a single control for inclusion in an expression.
///
/// Controls on a device other than `default_device` are always emitted as a
/// quoted `` `Device:Name` `` token; controls on the default device are bare
/// when the name allows it and quoted otherwise.
pub fn expression_for_control(
    control: &str,
    device: &DeviceQualifier,
    default_device: &DeviceQualifier,
) -> String {
    if device != default_device {
        format!("`{device}:{control}`")
    } else if needs_quoting(control) {
        format!("`{control}`")
    } else {
        control.to_string()
    }
}

/// Builds the canonical expression for a set of simultaneously detected
/// inputs: single input becomes one atom, several are joined with `&`.
///
/// Applies [`remove_spurious_trigger_combinations`] first, so a digital
/// trigger bit and its parent analog axis collapse to the axis alone.
pub fn build_expression(detections: &[DetectedInput], default_device: &DeviceQualifier) -> String {
    let detections = remove_spurious_trigger_combinations(detections);
    detections
        .iter()
        .map(|d| expression_for_control(&d.control, &d.device, default_device))
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Drops redundant digital halves of trigger pairs.
///
/// Some backends report one physical trigger pull as both a digital button
/// (`Trigger L`) and its analog axis (`Trigger L (axis)`). When both fire in
/// the same detection window on the same device, the analog control is the
/// canonical one and the digital entry is removed.
pub fn remove_spurious_trigger_combinations(detections: &[DetectedInput]) -> Vec<DetectedInput> {
    detections
        .iter()
        .filter(|d| {
            let axis_twin = format!("{} (axis)", d.control);
            !detections
                .iter()
                .any(|other| other.device == d.device && other.control == axis_twin)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyboard() -> DeviceQualifier {
        DeviceQualifier::bare("Keyboard")
    }

    fn gamepad() -> DeviceQualifier {
        DeviceQualifier::new("XInput", 0, "Gamepad")
    }

    fn detected(device: &DeviceQualifier, control: &str) -> DetectedInput {
        DetectedInput {
            device: device.clone(),
            control: control.to_string(),
        }
    }

    #[test]
    fn test_bare_names_are_never_quoted() {
        assert_eq!(expression_for_control("A", &keyboard(), &keyboard()), "A");
        assert_eq!(
            expression_for_control("Button_2", &keyboard(), &keyboard()),
            "Button_2"
        );
    }

    #[test]
    fn test_names_with_spaces_or_symbols_are_quoted() {
        assert_eq!(
            expression_for_control("Left Trigger", &keyboard(), &keyboard()),
            "`Left Trigger`"
        );
        assert_eq!(
            expression_for_control("Axis X+", &keyboard(), &keyboard()),
            "`Axis X+`"
        );
        assert_eq!(
            expression_for_control("2nd Button", &keyboard(), &keyboard()),
            "`2nd Button`"
        );
    }

    #[test]
    fn test_non_default_device_forces_device_prefix() {
        assert_eq!(
            expression_for_control("Button A", &gamepad(), &keyboard()),
            "`XInput/0/Gamepad:Button A`"
        );
        // Even a bare-safe name gets quoted when the device differs.
        assert_eq!(
            expression_for_control("A", &gamepad(), &keyboard()),
            "`XInput/0/Gamepad:A`"
        );
    }

    #[test]
    fn test_single_detection_builds_bare_atom() {
        let out = build_expression(&[detected(&keyboard(), "A")], &keyboard());
        assert_eq!(out, "A");
    }

    #[test]
    fn test_multiple_detections_join_with_and() {
        let out = build_expression(
            &[detected(&keyboard(), "A"), detected(&keyboard(), "B")],
            &keyboard(),
        );
        assert_eq!(out, "A & B");
    }

    #[test]
    fn test_no_detections_build_empty_expression() {
        assert_eq!(build_expression(&[], &keyboard()), "");
    }

    #[test]
    fn test_spurious_trigger_pair_keeps_only_the_axis() {
        let out = remove_spurious_trigger_combinations(&[
            detected(&gamepad(), "Button A"),
            detected(&gamepad(), "Button A (axis)"),
        ]);
        assert_eq!(out, vec![detected(&gamepad(), "Button A (axis)")]);
    }

    #[test]
    fn test_axis_twin_on_other_device_is_not_spurious() {
        let input = vec![
            detected(&gamepad(), "Button A"),
            detected(&keyboard(), "Button A (axis)"),
        ];
        let out = remove_spurious_trigger_combinations(&input);
        assert_eq!(out, input);
    }
}
