//! Native scene objects bound into the scripting runtime.
//!
//! These are the engine-side classes the binders wrap:
//!
//! - [`Sprite`]: base node with position, visibility and children
//! - [`Viewport`]: a sprite that draws another sprite through its own matrices
//! - [`Matrix`]: a 2D transform backed by a `glam` 4x4 matrix
//! - [`Application`]: the host object constructors are created against

mod application;
mod matrix;
mod sprite;
mod viewport;

pub use application::{AppSettings, Application, Orientation, ScaleMode};
pub use matrix::Matrix;
pub use sprite::Sprite;
pub use viewport::Viewport;
