pub mod camera;
pub mod cli;
pub mod config;
pub mod dialog;
pub mod editor;
pub mod generator;
pub mod geometry;
pub mod list_view;
pub mod math;
pub mod renderer;
pub mod selection;
pub mod store;
pub mod types;
pub mod viewport;

pub use editor::{EditorAction, SceneEditor};
pub use store::{ObjectStore, StoreEvent};
pub use types::{PrimitiveKind, PrimitiveRecord};
