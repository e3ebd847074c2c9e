pub use gc_arena::Mutation as MutationContext;
pub use gc_arena::collect::Trace as GcTrace;
pub use gc_arena::lock::RefLock as GcCell;
pub use gc_arena::{Collect, Gc};

pub type GcPtr<'gc, T> = Gc<'gc, GcCell<T>>;

#[inline]
pub fn new_gc_cell_ptr<'gc, T: 'gc + Collect<'gc>>(mc: &MutationContext<'gc>, value: T) -> GcPtr<'gc, T> {
    Gc::new(mc, GcCell::new(value))
}

mod property_key;
pub use property_key::*;

mod value;
pub use value::*;

#[derive(Collect)]
#[collect(no_drop)]
pub struct BridgeRoot<'gc> {
    pub global_env: JSObjectDataPtr<'gc>,
}

pub type BridgeArena = gc_arena::Arena<gc_arena::Rootable!['gc => BridgeRoot<'gc>]>;
