//! Numeric parameter prompt.

mod prompt_component;
mod state;

pub use prompt_component::PromptComponent;
pub use state::PromptState;
