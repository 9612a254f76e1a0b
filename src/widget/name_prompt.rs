//! Blocking display-name prompt.

use super::input::{InputBuffer, KeyInput};
use crate::domain::DisplayName;

/// Result of feeding a key to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Still editing; nothing to do.
    Editing,
    /// The user submitted a valid name.
    Submitted(DisplayName),
}

/// Overlay asking for a display name before chatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePrompt {
    field: InputBuffer,
    hint: Option<&'static str>,
}

impl NamePrompt {
    /// Creates an empty prompt.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The name field.
    #[must_use]
    pub const fn field(&self) -> &InputBuffer {
        &self.field
    }

    /// Validation hint from the last failed submit.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.hint
    }

    /// Edits the field, or submits it on Enter.
    pub fn key(&mut self, key: KeyInput) -> PromptOutcome {
        if matches!(key, KeyInput::Enter | KeyInput::Send) {
            return match DisplayName::parse(self.field.text()) {
                Ok(name) => PromptOutcome::Submitted(name),
                Err(_) => {
                    self.hint = Some("a name is required");
                    PromptOutcome::Editing
                }
            };
        }
        if self.field.edit(key) {
            self.hint = None;
        }
        PromptOutcome::Editing
    }
}
