//! Built-in design tokens for field chrome and validation feedback.

use formview_core::{TokenKey, TokenTable, ValidationState};

/// Base field tokens plus the feedback tokens for `state`.
///
/// [`ValidationState::Idle`] carries no feedback tokens.
pub fn validation_tokens(state: ValidationState, dark_mode: bool) -> TokenTable {
    let pick = |light: &'static str, dark: &'static str| if dark_mode { dark } else { light };

    let mut tokens = TokenTable::new();
    tokens.set(TokenKey::FieldBackground, pick("#ffffff", "#111827"));
    tokens.set(TokenKey::FieldBorder, pick("#e5e7eb", "#374151"));
    tokens.set(TokenKey::FieldText, pick("#111827", "#f9fafb"));
    tokens.set(TokenKey::FieldRadius, "0.375rem");
    tokens.set(TokenKey::FieldSpacing, "0.75rem");
    tokens.set(
        TokenKey::FieldShadow,
        pick(
            "0 1px 2px 0 rgb(0 0 0 / 0.05)",
            "0 1px 2px 0 rgb(0 0 0 / 0.25)",
        ),
    );

    let feedback = match state {
        ValidationState::Idle => None,
        ValidationState::Validating => Some((pick("#f59e0b", "#fbbf24"), "Validating...", "⟳")),
        ValidationState::Valid => Some((pick("#16a34a", "#22c55e"), "Valid", "✓")),
        ValidationState::Invalid => Some((pick("#dc2626", "#ef4444"), "Invalid", "✗")),
        ValidationState::Warning => Some((pick("#d97706", "#f59e0b"), "Warning", "⚠")),
    };
    if let Some((color, message, icon)) = feedback {
        tokens.set(TokenKey::FieldBorder, color);
        tokens.set(TokenKey::ValidationColor, color);
        tokens.set(TokenKey::ValidationMessage, message);
        tokens.set(TokenKey::ValidationIcon, icon);
    }
    tokens
}
