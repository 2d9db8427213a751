//! Invocation result screen.

mod result_component;
mod state;

pub use result_component::ResultComponent;
pub use state::ResultScroll;
