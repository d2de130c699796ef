//! 2D transform wrapper exposed to scripts as `Matrix`.

use std::any::Any;

use glam::{Mat4, Vec3};
use scenebind_core::{NativeClass, NativeObject};

/// A 2D affine transform stored as a 4x4 matrix.
///
/// The matrix is rebuilt from translation, rotation and scale whenever one of
/// them changes, as `T * R * S`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    x: f32,
    y: f32,
    rotation: f32,
    scale_x: f32,
    scale_y: f32,
    matrix: Mat4,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::new()
    }
}

impl Matrix {
    pub fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            matrix: Mat4::IDENTITY,
        }
    }

    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.rebuild();
    }

    /// Set the rotation around the z axis, in degrees.
    pub fn set_rotation(&mut self, degrees: f32) {
        self.rotation = degrees;
        self.rebuild();
    }

    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.rebuild();
    }

    /// Column-major element, `index` in `0..16`.
    pub fn element(&self, index: usize) -> Option<f32> {
        self.matrix.to_cols_array().get(index).copied()
    }

    fn rebuild(&mut self) {
        self.matrix = Mat4::from_translation(Vec3::new(self.x, self.y, 0.0))
            * Mat4::from_rotation_z(self.rotation.to_radians())
            * Mat4::from_scale(Vec3::new(self.scale_x, self.scale_y, 1.0));
    }
}

impl NativeObject for Matrix {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl NativeClass for Matrix {
    const CLASS_NAME: &'static str = "Matrix";
}
