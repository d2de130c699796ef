//! `Sprite` bindings.
//!
//! Every adapter resolves its receiver first, so a wrong receiver is
//! reported before any argument is read or any native state changes.

use scenebind_core::{CallContext, NativeClass, NativeError, ObjectHandle, ObjectHeap};
use scenebind_registry::ClassDef;
use scenebind_scene::Sprite;

/// Class definition for `Sprite`.
pub fn class() -> ClassDef {
    ClassDef::new(Sprite::CLASS_NAME)
        .with_constructor(create)
        .with_destructor(super::release)
        .with_method("setPosition", 0, set_position)
        .with_method("getPosition", 2, get_position)
        .with_method("setVisible", 0, set_visible)
        .with_method("isVisible", 1, is_visible)
        .with_method("addChild", 0, add_child)
        .with_method("removeChild", 0, remove_child)
        .with_method("getNumChildren", 1, get_num_children)
}

fn create(ctx: &mut CallContext) -> Result<(), NativeError> {
    ctx.push_instance(Sprite::new());
    Ok(())
}

fn set_position(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Sprite>()?;
    let x: f32 = ctx.arg(2)?;
    let y: f32 = ctx.arg(3)?;
    ctx.get_mut::<Sprite>(this)?.set_position(x, y);
    Ok(())
}

fn get_position(ctx: &mut CallContext) -> Result<(), NativeError> {
    let (x, y) = ctx.instance::<Sprite>(1)?.position();
    ctx.push(x);
    ctx.push(y);
    Ok(())
}

fn set_visible(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Sprite>()?;
    let visible: bool = ctx.arg(2)?;
    ctx.get_mut::<Sprite>(this)?.set_visible(visible);
    Ok(())
}

fn is_visible(ctx: &mut CallContext) -> Result<(), NativeError> {
    let visible = ctx.instance::<Sprite>(1)?.is_visible();
    ctx.push(visible);
    Ok(())
}

/// The live parent of a sprite. A parent that has been freed counts as none.
fn live_parent(heap: &ObjectHeap, sprite: ObjectHandle) -> Option<ObjectHandle> {
    heap.get::<Sprite>(sprite)?
        .parent()
        .filter(|parent| heap.contains(*parent))
}

fn add_child(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Sprite>()?;
    let child = ctx.instance_handle::<Sprite>(2)?;
    if child == this {
        return Err(NativeError::other("a sprite cannot be added to itself"));
    }

    let heap = ctx.heap();
    match live_parent(heap, child) {
        Some(parent) if parent == this => return Ok(()),
        Some(_) => return Err(NativeError::other("sprite already has a parent")),
        None => {}
    }
    let mut ancestor = live_parent(heap, this);
    while let Some(handle) = ancestor {
        if handle == child {
            return Err(NativeError::other("a sprite cannot be added to its own descendant"));
        }
        ancestor = live_parent(heap, handle);
    }

    ctx.get_mut::<Sprite>(this)?.add_child(child);
    ctx.get_mut::<Sprite>(child)?.set_parent(Some(this));
    ctx.heap_mut().add_ref(child);
    Ok(())
}

fn remove_child(ctx: &mut CallContext) -> Result<(), NativeError> {
    let this = ctx.this_handle::<Sprite>()?;
    let child = ctx.instance_handle::<Sprite>(2)?;
    if !ctx.get_mut::<Sprite>(this)?.remove_child(child) {
        return Err(NativeError::other("supplied sprite must be a child of the caller"));
    }
    ctx.get_mut::<Sprite>(child)?.set_parent(None);
    ctx.heap_mut().release(child);
    Ok(())
}

fn get_num_children(ctx: &mut CallContext) -> Result<(), NativeError> {
    let count = ctx.instance::<Sprite>(1)?.children().len();
    ctx.push(count);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenebind_core::Dynamic;

    struct Call {
        heap: ObjectHeap,
    }

    impl Call {
        fn new() -> Self {
            Self {
                heap: ObjectHeap::new(),
            }
        }

        fn run(
            &mut self,
            f: fn(&mut CallContext) -> Result<(), NativeError>,
            args: &[Dynamic],
        ) -> Result<Vec<Dynamic>, NativeError> {
            let mut results = Vec::new();
            let mut ctx = CallContext::new(args, &mut results, &mut self.heap, &());
            f(&mut ctx)?;
            Ok(results)
        }
    }

    #[test]
    fn create_pushes_one_instance() {
        let mut call = Call::new();
        let results = call.run(create, &[]).unwrap();
        assert_eq!(results.len(), 1);
        let handle = results[0].as_object().unwrap();
        assert_eq!(call.heap.ref_count(handle), Some(1));
    }

    #[test]
    fn position_round_trip() {
        let mut call = Call::new();
        let sprite = Dynamic::Object(call.heap.allocate(Sprite::new()));

        call.run(
            set_position,
            &[sprite.clone(), Dynamic::Float(1.5), Dynamic::Int(2)],
        )
        .unwrap();
        let results = call.run(get_position, &[sprite]).unwrap();
        assert_eq!(results, vec![Dynamic::Float(1.5), Dynamic::Float(2.0)]);
    }

    #[test]
    fn set_position_requires_numbers() {
        let mut call = Call::new();
        let sprite = Dynamic::Object(call.heap.allocate(Sprite::new()));
        let err = call
            .run(set_position, &[sprite, Dynamic::String("x".to_string())])
            .unwrap_err();
        assert!(matches!(err, NativeError::Conversion { index: 2, .. }));
    }

    #[test]
    fn add_and_remove_child_adjusts_references() {
        let mut call = Call::new();
        let parent = call.heap.allocate(Sprite::new());
        let child = call.heap.allocate(Sprite::new());
        let args = [Dynamic::Object(parent), Dynamic::Object(child)];

        call.run(add_child, &args).unwrap();
        assert_eq!(call.heap.ref_count(child), Some(2));
        assert_eq!(call.heap.get::<Sprite>(child).unwrap().parent(), Some(parent));

        // Adding again is a no-op.
        call.run(add_child, &args).unwrap();
        assert_eq!(call.heap.ref_count(child), Some(2));

        call.run(remove_child, &args).unwrap();
        assert_eq!(call.heap.ref_count(child), Some(1));
        assert!(call.heap.get::<Sprite>(child).unwrap().parent().is_none());

        assert!(call.run(remove_child, &args).is_err());
    }

    #[test]
    fn add_child_rejects_cycles() {
        let mut call = Call::new();
        let a = call.heap.allocate(Sprite::new());
        let b = call.heap.allocate(Sprite::new());

        assert!(
            call.run(add_child, &[Dynamic::Object(a), Dynamic::Object(a)])
                .is_err()
        );

        call.run(add_child, &[Dynamic::Object(a), Dynamic::Object(b)])
            .unwrap();
        assert!(
            call.run(add_child, &[Dynamic::Object(b), Dynamic::Object(a)])
                .is_err()
        );
        assert_eq!(call.heap.ref_count(a), Some(1));
    }

    #[test]
    fn child_with_another_parent_is_rejected() {
        let mut call = Call::new();
        let first = call.heap.allocate(Sprite::new());
        let second = call.heap.allocate(Sprite::new());
        let child = call.heap.allocate(Sprite::new());

        call.run(add_child, &[Dynamic::Object(first), Dynamic::Object(child)])
            .unwrap();
        let err = call
            .run(add_child, &[Dynamic::Object(second), Dynamic::Object(child)])
            .unwrap_err();
        assert_eq!(err, NativeError::other("sprite already has a parent"));
    }

    #[test]
    fn freeing_parent_releases_children() {
        let mut call = Call::new();
        let parent = call.heap.allocate(Sprite::new());
        let child = call.heap.allocate(Sprite::new());
        call.run(add_child, &[Dynamic::Object(parent), Dynamic::Object(child)])
            .unwrap();

        call.heap.release(parent);
        assert_eq!(call.heap.ref_count(child), Some(1));
        assert!(live_parent(&call.heap, child).is_none());

        let results = call
            .run(get_num_children, &[Dynamic::Object(child)])
            .unwrap();
        assert_eq!(results, vec![Dynamic::Int(0)]);
    }
}
