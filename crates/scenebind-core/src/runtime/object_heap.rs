//! Generational arena for reference-counted native objects.

use std::fmt;

use crate::TypeHash;

use super::{NativeClass, NativeObject};

/// Handle to a heap-allocated object.
///
/// This is a copyable reference to an object in the `ObjectHeap`. Copying a
/// handle does not add a reference; only [`ObjectHeap::add_ref`] does. The
/// generational index turns use-after-free into a failed lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    /// Index into ObjectHeap.slots
    pub index: u32,
    /// Generation for use-after-free detection
    pub generation: u32,
    /// Hash of the registered class the object was allocated as
    pub class: TypeHash,
}

impl ObjectHandle {
    /// Create a new object handle.
    pub fn new(index: u32, generation: u32, class: TypeHash) -> Self {
        Self {
            index,
            generation,
            class,
        }
    }
}

/// Heap storage for native objects with generational indices.
///
/// Objects are stored in a Vec with generation tracking. When an object is
/// freed, its slot is reused but the generation is incremented, so stale
/// handles are detected at lookup time.
pub struct ObjectHeap {
    slots: Vec<HeapSlot>,
    free_list: Vec<u32>,
}

struct HeapSlot {
    generation: u32,
    value: Option<Box<dyn NativeObject>>,
    class_name: &'static str,
    ref_count: u32,
}

impl ObjectHeap {
    /// Create a new empty object heap.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Allocate a new object on the heap with a reference count of 1.
    pub fn allocate<T: NativeClass>(&mut self, value: T) -> ObjectHandle {
        let class = TypeHash::from_name(T::CLASS_NAME);
        let boxed: Box<dyn NativeObject> = Box::new(value);

        if let Some(index) = self.free_list.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(boxed);
            slot.class_name = T::CLASS_NAME;
            slot.ref_count = 1;
            ObjectHandle::new(index, slot.generation, class)
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(HeapSlot {
                generation: 0,
                value: Some(boxed),
                class_name: T::CLASS_NAME,
                ref_count: 1,
            });
            ObjectHandle::new(index, 0, class)
        }
    }

    fn live_slot(&self, handle: ObjectHandle) -> Option<&HeapSlot> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.value.is_some())
    }

    fn live_slot_mut(&mut self, handle: ObjectHandle) -> Option<&mut HeapSlot> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == handle.generation && slot.value.is_some())
    }

    /// Check whether the handle still refers to a live object.
    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.live_slot(handle).is_some()
    }

    /// Get immutable reference to an object, or to its `T` base part.
    ///
    /// Returns None if the handle is stale or the object is not a `T`.
    pub fn get<T: NativeObject>(&self, handle: ObjectHandle) -> Option<&T> {
        self.live_slot(handle)?.value.as_deref()?.downcast_ref::<T>()
    }

    /// Get mutable reference to an object, or to its `T` base part.
    ///
    /// Returns None if the handle is stale or the object is not a `T`.
    pub fn get_mut<T: NativeObject>(&mut self, handle: ObjectHandle) -> Option<&mut T> {
        self.live_slot_mut(handle)?
            .value
            .as_deref_mut()?
            .downcast_mut::<T>()
    }

    /// Get the untyped object behind a handle.
    pub fn get_object(&self, handle: ObjectHandle) -> Option<&(dyn NativeObject + 'static)> {
        self.live_slot(handle)?.value.as_deref()
    }

    /// Class name the object was allocated as.
    pub fn class_name(&self, handle: ObjectHandle) -> Option<&'static str> {
        self.live_slot(handle).map(|slot| slot.class_name)
    }

    /// Increment reference count.
    ///
    /// Returns false if the handle is stale.
    pub fn add_ref(&mut self, handle: ObjectHandle) -> bool {
        match self.live_slot_mut(handle) {
            Some(slot) => {
                slot.ref_count = slot.ref_count.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Decrement reference count, free if zero.
    ///
    /// Returns true if the object was freed. Freeing an object releases every
    /// handle it reported through [`NativeObject::retained_handles`].
    pub fn release(&mut self, handle: ObjectHandle) -> bool {
        let Some(slot) = self.live_slot_mut(handle) else {
            return false;
        };
        slot.ref_count = slot.ref_count.saturating_sub(1);
        if slot.ref_count > 0 {
            return false;
        }

        let mut pending = self.take(handle);
        while let Some(next) = pending.pop() {
            if let Some(slot) = self.live_slot_mut(next) {
                slot.ref_count = slot.ref_count.saturating_sub(1);
                if slot.ref_count == 0 {
                    pending.extend(self.take(next));
                }
            }
        }
        true
    }

    /// Empty a live slot and return the handles its object retained.
    fn take(&mut self, handle: ObjectHandle) -> Vec<ObjectHandle> {
        let slot = &mut self.slots[handle.index as usize];
        let retained = slot
            .value
            .take()
            .map(|value| value.retained_handles())
            .unwrap_or_default();
        slot.ref_count = 0;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.index);
        retained
    }

    /// Get the reference count for an object.
    pub fn ref_count(&self, handle: ObjectHandle) -> Option<u32> {
        self.live_slot(handle).map(|slot| slot.ref_count)
    }

    /// Number of live objects.
    pub fn live_count(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }
}

impl Default for ObjectHeap {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ObjectHeap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectHeap")
            .field("slot_count", &self.slots.len())
            .field("free_count", &self.free_list.len())
            .finish()
    }
}
