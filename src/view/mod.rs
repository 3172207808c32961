//! Dashboard view layer
//!
//! - [`model`] - what is on screen (section, sub-view, fetch state)
//! - [`render`] - pure functions from the model to a [`Node`] tree
//! - [`node`] - the render tree and its HTML/text serializers
//! - [`format`] - count, date and truncation helpers

pub mod format;
pub mod model;
pub mod node;
pub mod render;

pub use model::{ContentKind, DashboardContent, Loadable, Screen, Section, ViewState};
pub use node::{Action, Element, Node};
pub use render::render_screen;
