use crate::ui::components::common::TextInputState;

/// Matches the longest value a quest ID or duration realistically needs.
const INPUT_CHAR_LIMIT: usize = 10;

/// State of the parameter prompt.
#[derive(Debug, Clone)]
pub struct PromptState {
    pub input: TextInputState,
    /// Validation message shown under the input
    pub message: Option<String>,
    /// Dry run toggle, only offered for the process action
    pub dry_run: bool,
}

impl Default for PromptState {
    fn default() -> Self {
        Self {
            input: TextInputState::with_char_limit(INPUT_CHAR_LIMIT),
            message: None,
            dry_run: false,
        }
    }
}

impl PromptState {
    /// Forget input, message and toggle.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
