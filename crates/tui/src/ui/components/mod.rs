pub mod common;
pub mod component;
pub mod hint_bar;
pub mod loading;
pub mod picker;
pub mod prompt;
pub mod result;

pub(crate) use component::Component;
pub use hint_bar::HintBarComponent;
pub use loading::LoadingComponent;
pub use picker::PickerComponent;
pub use prompt::PromptComponent;
pub use result::ResultComponent;
