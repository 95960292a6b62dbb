//! Citation graph viewer: the interaction core plus the Leptos component and
//! renderer glue around it.

pub mod adjacency;
mod bindings;
pub mod camera;
mod component;
pub mod config;
pub mod debounce;
pub mod highlight;
pub mod panel;
mod scene;
pub mod search;
pub mod session;
pub mod types;

pub use component::EpigraphGraph;
pub use config::ViewerConfig;
pub use session::GraphSession;
pub use types::{GraphData, LoadError};
