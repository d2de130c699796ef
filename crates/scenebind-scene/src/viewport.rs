//! A sprite that renders another sprite through its own transform and
//! projection.

use std::any::Any;

use glam::Mat4;
use scenebind_core::{NativeClass, NativeObject, ObjectHandle};

use crate::{Application, Sprite};

/// Native viewport node.
///
/// The content sprite is observed, not owned: the viewport keeps its handle
/// but holds no reference to it. If the content is destroyed while still
/// set, the handle goes stale and lookups through it fail.
///
/// Transform and projection are copied in on set. `None` restores the
/// default (identity) behaviour.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    sprite: Sprite,
    width: u32,
    height: u32,
    content: Option<ObjectHandle>,
    transform: Option<Mat4>,
    projection: Option<Mat4>,
    changes: u64,
}

impl Viewport {
    /// Create a viewport covering the application's logical canvas.
    pub fn new(application: &Application) -> Self {
        let (width, height) = application.content_size();
        Self {
            sprite: Sprite::new(),
            width,
            height,
            content: None,
            transform: None,
            projection: None,
            changes: 0,
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprite
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn content(&self) -> Option<ObjectHandle> {
        self.content
    }

    pub fn set_content(&mut self, content: Option<ObjectHandle>) {
        self.content = content;
        self.changes += 1;
    }

    pub fn transform(&self) -> Option<&Mat4> {
        self.transform.as_ref()
    }

    pub fn set_transform(&mut self, transform: Option<&Mat4>) {
        self.transform = transform.copied();
        self.changes += 1;
    }

    pub fn projection(&self) -> Option<&Mat4> {
        self.projection.as_ref()
    }

    pub fn set_projection(&mut self, projection: Option<&Mat4>) {
        self.projection = projection.copied();
        self.changes += 1;
    }

    /// Combined matrix applied to the content when drawn.
    pub fn effective_matrix(&self) -> Mat4 {
        self.projection.unwrap_or(Mat4::IDENTITY) * self.transform.unwrap_or(Mat4::IDENTITY)
    }

    /// Number of setter calls that reached this viewport.
    pub fn changes(&self) -> u64 {
        self.changes
    }
}

impl NativeObject for Viewport {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn base(&self) -> Option<&(dyn NativeObject + 'static)> {
        Some(&self.sprite)
    }

    fn base_mut(&mut self) -> Option<&mut (dyn NativeObject + 'static)> {
        Some(&mut self.sprite)
    }
}

impl NativeClass for Viewport {
    const CLASS_NAME: &'static str = "Viewport";
}
