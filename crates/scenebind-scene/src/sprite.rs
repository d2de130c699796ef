//! Base scene-graph node.

use std::any::Any;

use scenebind_core::{NativeClass, NativeObject, ObjectHandle};

/// A positioned node that can hold child nodes.
///
/// Children are stored as handles the sprite holds a counted reference to;
/// taking and giving back those references is the binder's job, since only
/// it has the heap at hand.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    x: f32,
    y: f32,
    visible: bool,
    parent: Option<ObjectHandle>,
    children: Vec<ObjectHandle>,
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

impl Sprite {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            visible: true,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn parent(&self) -> Option<ObjectHandle> {
        self.parent
    }

    pub fn set_parent(&mut self, parent: Option<ObjectHandle>) {
        self.parent = parent;
    }

    pub fn children(&self) -> &[ObjectHandle] {
        &self.children
    }

    pub fn contains_child(&self, child: ObjectHandle) -> bool {
        self.children.contains(&child)
    }

    /// Append a child. Returns false if it is already a child.
    pub fn add_child(&mut self, child: ObjectHandle) -> bool {
        if self.contains_child(child) {
            return false;
        }
        self.children.push(child);
        true
    }

    /// Remove a child. Returns false if it was not a child.
    pub fn remove_child(&mut self, child: ObjectHandle) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(index) => {
                self.children.remove(index);
                true
            }
            None => false,
        }
    }
}

impl NativeObject for Sprite {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn retained_handles(&self) -> Vec<ObjectHandle> {
        self.children.clone()
    }
}

impl NativeClass for Sprite {
    const CLASS_NAME: &'static str = "Sprite";
}
