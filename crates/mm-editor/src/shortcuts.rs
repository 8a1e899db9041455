//! Keyboard shortcut mapping.
//!
//! Maps key + modifier combos to semantic `ShortcutAction`s.
//! The shortcut map lives in Rust so it's shared across WASM and native.

use crate::input::Modifiers;

/// Actions that keyboard shortcuts can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    // ── View ──
    ZoomIn,
    ZoomOut,
    FitToView,
    ResetView,

    // ── Tree ──
    ToggleSelected,
    Deselect,

    // ── Edit ──
    BeginEdit,
    SaveEdit,
    CancelEdit,

    // ── Export ──
    ExportJson,
    ExportImage,
}

/// Resolves key events into shortcut actions.
///
/// Uses platform-aware modifier detection: on macOS `meta` is ⌘,
/// on other platforms `ctrl` serves the same role.
pub struct ShortcutMap;

impl ShortcutMap {
    /// Resolve a key event to an action.
    ///
    /// `key` is the `KeyboardEvent.key` value (e.g. `"f"`, `"Escape"`).
    /// `editing` selects the edit-form bindings, where plain keys are text.
    pub fn resolve(key: &str, mods: Modifiers, editing: bool) -> Option<ShortcutAction> {
        let cmd = mods.cmd();

        if editing {
            return match key {
                "Escape" => Some(ShortcutAction::CancelEdit),
                "Enter" if cmd => Some(ShortcutAction::SaveEdit),
                _ => None,
            };
        }

        // ── Modifier combos first (most specific) ──
        if cmd && mods.shift {
            return match key {
                "s" | "S" | "e" | "E" => Some(ShortcutAction::ExportImage),
                // `+` is shifted `=` on US layouts.
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "_" => Some(ShortcutAction::ZoomOut),
                _ => None,
            };
        }

        if cmd {
            return match key {
                "s" | "S" | "e" | "E" => Some(ShortcutAction::ExportJson),
                "=" | "+" => Some(ShortcutAction::ZoomIn),
                "-" | "_" => Some(ShortcutAction::ZoomOut),
                "0" => Some(ShortcutAction::ResetView),
                _ => None,
            };
        }

        // ── Single keys ──
        match key {
            "=" | "+" => Some(ShortcutAction::ZoomIn),
            "-" | "_" => Some(ShortcutAction::ZoomOut),
            "f" | "F" => Some(ShortcutAction::FitToView),
            "0" => Some(ShortcutAction::ResetView),
            " " => Some(ShortcutAction::ToggleSelected),
            "Enter" => Some(ShortcutAction::BeginEdit),
            "Escape" => Some(ShortcutAction::Deselect),
            _ => None,
        }
    }
}
