pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod host_array;
pub(crate) mod host_convert;
pub(crate) mod host_search;
pub(crate) mod host_value;
pub(crate) mod realm;
pub(crate) mod unicode;

pub use crate::core::{
    BridgeArena, BridgeRoot, Collect, Gc, GcCell, GcPtr, JSObjectData, JSObjectDataPtr, MutationContext, PropertyKey, SymbolData, Value,
    get_own_property, new_gc_cell_ptr, new_js_object_data, object_get_key_value, object_set_key_value, value_to_string, values_equal,
};
pub use error::JSError;
pub use host_array::{
    NativeHostArray, NativeHostArrayPtr, ToPrimitiveHint, default_value, get_index, get_property, has_property, resolve_prototype,
};
pub use host_convert::{CoercionEngine, Converters, ElementWrapper, ScopeResolver, StandardCoercion, StandardScopeResolver, StandardWrapper};
pub use host_search::{ArrayIncludes, ArrayIndexOf, HostArrayMethod};
pub use host_value::{HostArray, HostType, HostValue};
pub use realm::{initialize_standard_scope, new_bridge_arena, well_known_symbol};
pub use unicode::{utf8_to_utf16, utf16_to_utf8};
