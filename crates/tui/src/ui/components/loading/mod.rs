mod loading_component;

pub use loading_component::LoadingComponent;
