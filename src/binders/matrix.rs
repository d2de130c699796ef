//! `Matrix` bindings.

use scenebind_core::{CallContext, NativeClass, NativeError};
use scenebind_registry::ClassDef;
use scenebind_scene::Matrix;

/// Class definition for `Matrix`.
pub fn class() -> ClassDef {
    ClassDef::new(Matrix::CLASS_NAME)
        .with_constructor(create)
        .with_destructor(super::release)
        .with_method("setPosition", 0, set_position)
        .with_method("setRotation", 0, set_rotation)
        .with_method("setScale", 0, set_scale)
        .with_method("getM", 1, get_m)
}

fn create(ctx: &mut CallContext) -> Result<(), NativeError> {
    ctx.push_instance(Matrix::new());
    Ok(())
}

fn set_position(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Matrix>()?;
    let x: f32 = ctx.arg(2)?;
    let y: f32 = ctx.arg(3)?;
    ctx.get_mut::<Matrix>(this)?.set_position(x, y);
    Ok(())
}

fn set_rotation(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Matrix>()?;
    let degrees: f32 = ctx.arg(2)?;
    ctx.get_mut::<Matrix>(this)?.set_rotation(degrees);
    Ok(())
}

fn set_scale(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Matrix>()?;
    let scale_x: f32 = ctx.arg(2)?;
    // A single argument scales both axes.
    let scale_y = ctx.opt_arg::<f32>(3).value().unwrap_or(scale_x);
    ctx.get_mut::<Matrix>(this)?.set_scale(scale_x, scale_y);
    Ok(())
}

/// `getM(i)`: column-major element, 1-based.
fn get_m(ctx: &mut CallContext) -> Result<(), NativeError> {
    let matrix = ctx.instance::<Matrix>(1)?;
    let index: usize = ctx.arg(2)?;
    let value = index
        .checked_sub(1)
        .and_then(|i| matrix.element(i))
        .ok_or_else(|| NativeError::other(format!("matrix index {index} out of range 1..=16")))?;
    ctx.push(value);
    Ok(())
}
