//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifiers accepted for the submit shortcut
/// - macOS: CONTROL or SUPER (Cmd key, when the terminal forwards it)
/// - Linux/Windows: CONTROL
#[cfg(target_os = "macos")]
pub const SUBMIT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL.union(KeyModifiers::SUPER);

#[cfg(not(target_os = "macos"))]
pub const SUBMIT_MODIFIERS: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for help text
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Whether `modifiers` trigger the submit shortcut together with `s`
pub fn is_submit_modifier(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(SUBMIT_MODIFIERS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_submits_everywhere() {
        assert!(is_submit_modifier(KeyModifiers::CONTROL));
    }

    #[test]
    fn test_plain_key_does_not_submit() {
        assert!(!is_submit_modifier(KeyModifiers::NONE));
        assert!(!is_submit_modifier(KeyModifiers::SHIFT));
    }
}
