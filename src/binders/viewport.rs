//! `Viewport` bindings.
//!
//! `Viewport` derives from `Sprite`; the sprite methods are reached through
//! the registry's base-class fallback and are not repeated here.
//!
//! Argument handling differs between the setters:
//!
//! - `setContent(sprite)` requires a sprite. Anything else is a type error
//!   and the viewport is left untouched.
//! - `setTransform(matrix)` and `setProjection(matrix)` take an optional
//!   matrix. A missing argument, `nil`, or a value that is not a matrix all
//!   reset to the default.

use glam::Mat4;
use scenebind_core::{Arg, CallContext, NativeClass, NativeError};
use scenebind_registry::ClassDef;
use scenebind_scene::{Application, Matrix, Sprite, Viewport};

/// Class definition for `Viewport`.
pub fn class() -> ClassDef {
    ClassDef::new(Viewport::CLASS_NAME)
        .with_base(Sprite::CLASS_NAME)
        .with_constructor(create)
        .with_destructor(super::release)
        .with_method("setContent", 0, set_content)
        .with_method("setTransform", 0, set_transform)
        .with_method("setProjection", 0, set_projection)
}

fn create(ctx: &mut CallContext) -> Result<(), NativeError> {
    let viewport = Viewport::new(ctx.host::<Application>()?);
    ctx.push_instance(viewport);
    Ok(())
}

fn set_content(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Viewport>()?;
    let content = ctx.instance_handle::<Sprite>(2)?;
    ctx.get_mut::<Viewport>(this)?.set_content(Some(content));
    Ok(())
}

fn set_transform(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Viewport>()?;
    let transform = optional_matrix(ctx, 2);
    ctx.get_mut::<Viewport>(this)?.set_transform(transform.as_ref());
    Ok(())
}

fn set_projection(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Viewport>()?;
    let projection = optional_matrix(ctx, 2);
    ctx.get_mut::<Viewport>(this)?.set_projection(projection.as_ref());
    Ok(())
}

/// Copy the matrix out of an optional `Matrix` argument.
fn optional_matrix(ctx: &CallContext, index: usize) -> Option<Mat4> {
    match ctx.opt_instance::<Matrix>(index) {
        Arg::Value(matrix) => Some(*matrix.matrix()),
        Arg::Missing => None,
        Arg::WrongType => {
            tracing::trace!(index, "non-matrix argument treated as nil");
            None
        }
    }
}
