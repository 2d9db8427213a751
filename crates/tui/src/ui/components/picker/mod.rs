//! Filterable list used by the environment and action screens.

mod picker_component;
mod state;

pub use picker_component::PickerComponent;
pub use state::{PickerItem, PickerState};
