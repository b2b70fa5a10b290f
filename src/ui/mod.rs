// Terminal form: layout tree, panels and key-driven state

pub mod app;
pub mod node;
pub mod panels;
pub mod state;

pub use app::run;
pub use node::{group, leaf, Node, Panel};
pub use state::{AppState, Focus, Status, StatusKind};
