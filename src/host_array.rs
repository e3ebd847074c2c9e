use crate::core::{Collect, Gc, GcPtr, GcTrace, JSObjectDataPtr, MutationContext, PropertyKey, SymbolData, Value, new_gc_cell_ptr, object_get_key_value};
use crate::error::JSError;
use crate::host_convert::Converters;
use crate::host_search::{ArrayIncludes, ArrayIndexOf, HostArrayMethod};
use crate::host_value::{HostArray, HostType, HostValue};
use crate::realm::well_known_symbol;
use crate::unicode::utf8_to_utf16;

pub type NativeHostArrayPtr<'gc> = GcPtr<'gc, NativeHostArray<'gc>>;

/// Hint for reducing the bridge to a primitive value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToPrimitiveHint {
    Default,
    String,
    Number,
    Boolean,
    Object,
}

/// Reflects a fixed-size, statically typed host array into script space.
///
/// The bridge aliases the backing storage (it never clones it), captures the
/// length once at construction, and dispatches the dynamic object protocol
/// through three separate paths: named properties, integer indices, and
/// symbol keys. Out-of-range reads yield `undefined`; out-of-range writes
/// are errors.
pub struct NativeHostArray<'gc> {
    array: HostArray,
    element_type: HostType,
    length: usize,
    scope: JSObjectDataPtr<'gc>,
    converters: Converters,
    prototype: Option<JSObjectDataPtr<'gc>>,
    prototype_resolved: bool,
}

unsafe impl<'gc> Collect<'gc> for NativeHostArray<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        self.scope.trace(cc);
        if let Some(p) = &self.prototype {
            p.trace(cc);
        }
    }
}

impl<'gc> NativeHostArray<'gc> {
    /// Wrap a host value that must be an array; anything else fails fast.
    pub fn new(
        mc: &MutationContext<'gc>,
        scope: &JSObjectDataPtr<'gc>,
        value: HostValue,
        converters: Converters,
    ) -> Result<NativeHostArrayPtr<'gc>, JSError> {
        let HostValue::Array(array) = value else {
            return Err(JSError::InvalidArgument {
                message: "array expected".to_string(),
            });
        };
        let element_type = array.element_type().clone();
        let length = array.len();
        log::debug!("NativeHostArray::new: type={} length={}", array.type_name(), length);
        Ok(new_gc_cell_ptr(
            mc,
            NativeHostArray {
                array,
                element_type,
                length,
                scope: *scope,
                converters,
                prototype: None,
                prototype_resolved: false,
            },
        ))
    }

    pub fn class_name(&self) -> &'static str {
        "HostArray"
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn element_type(&self) -> &HostType {
        &self.element_type
    }

    pub fn type_name(&self) -> String {
        self.array.type_name()
    }

    pub fn storage(&self) -> &HostArray {
        &self.array
    }

    /// The backing host value, shared with every other alias.
    pub fn unwrap(&self) -> HostValue {
        HostValue::Array(self.array.clone())
    }

    pub fn to_display_string(&self) -> String {
        self.array.to_display_string()
    }

    pub fn has_index(&self, index: isize) -> bool {
        0 <= index && (index as usize) < self.length
    }

    pub fn has_symbol_key(&self, key: Gc<'gc, SymbolData>) -> bool {
        match well_known_symbol(&self.scope, "isConcatSpreadable") {
            Some(sym) => Gc::ptr_eq(sym, key),
            None => false,
        }
    }

    pub fn get_symbol_key(&self, key: Gc<'gc, SymbolData>) -> Option<Value<'gc>> {
        if self.has_symbol_key(key) { Some(Value::Boolean(true)) } else { None }
    }

    pub fn delete_symbol_key(&self, _key: Gc<'gc, SymbolData>) {
        // Protocol keys are read-only; deletion is silently ignored.
    }

    /// Named writes: `length` is read-only and silently ignored; the bridge
    /// is not extensible, so every other name is an error.
    pub fn set_property(&self, name: &str, _value: &Value<'gc>) -> Result<(), JSError> {
        if name == "length" {
            return Ok(());
        }
        Err(JSError::UnsupportedMember { name: name.to_string() })
    }

    pub fn set_index(&self, index: isize, value: &Value<'gc>) -> Result<(), JSError> {
        if !self.has_index(index) {
            return Err(JSError::IndexOutOfBounds {
                index,
                max: self.length as isize - 1,
            });
        }
        let host = self.converters.coercion.coerce(value, &self.element_type)?;
        log::trace!("set_index: [{index}] = {host:?}");
        self.array.set(index as usize, host);
        Ok(())
    }

    /// Own keys are exactly the indices `[0, length)`, ascending.
    pub fn own_keys(&self) -> Vec<PropertyKey<'gc>> {
        (0..self.length as u32).map(PropertyKey::Index).collect()
    }

    /// True iff the candidate is itself a reflected host value assignable to
    /// this bridge's element type.
    pub fn has_instance(&self, candidate: &Value<'gc>) -> bool {
        let Value::HostArray(wrapped) = candidate else {
            return false;
        };
        let instance = wrapped.borrow().unwrap();
        self.element_type.is_instance(&instance)
    }
}

/// Resolve the shared array prototype on first use and memoize the outcome,
/// including a miss: a scope with no `Array` constructor is walked once, not
/// on every lookup.
pub fn resolve_prototype<'gc>(mc: &MutationContext<'gc>, this: &NativeHostArrayPtr<'gc>) -> Option<JSObjectDataPtr<'gc>> {
    if this.borrow().prototype_resolved {
        return this.borrow().prototype;
    }
    let resolved = {
        let bridge = this.borrow();
        bridge.converters.scopes.lookup_array_prototype(&bridge.scope)
    };
    log::debug!("resolve_prototype: hit={}", resolved.is_some());
    let mut bridge = this.borrow_mut(mc);
    bridge.prototype = resolved;
    bridge.prototype_resolved = true;
    resolved
}

pub fn has_property<'gc>(mc: &MutationContext<'gc>, this: &NativeHostArrayPtr<'gc>, name: &str) -> bool {
    if matches!(name, "length" | "indexOf" | "includes") {
        return true;
    }
    match resolve_prototype(mc, this) {
        Some(proto) => object_get_key_value(&proto, name).is_some(),
        None => false,
    }
}

pub fn get_property<'gc>(mc: &MutationContext<'gc>, this: &NativeHostArrayPtr<'gc>, name: &str) -> Result<Value<'gc>, JSError> {
    match name {
        "length" => return Ok(Value::Number(this.borrow().length as f64)),
        "indexOf" => {
            let method = HostArrayMethod::IndexOf(ArrayIndexOf::new(this.borrow().array.clone()));
            return Ok(Value::HostMethod(Gc::new(mc, method)));
        }
        "includes" => {
            let method = HostArrayMethod::Includes(ArrayIncludes::new(this.borrow().array.clone()));
            return Ok(Value::HostMethod(Gc::new(mc, method)));
        }
        _ => {}
    }
    if let Some(proto) = resolve_prototype(mc, this)
        && let Some(val) = object_get_key_value(&proto, name)
    {
        return Ok(val.borrow().clone());
    }
    Err(JSError::MemberNotFound {
        type_name: this.borrow().array.type_name(),
        name: name.to_string(),
    })
}

/// In-range reads wrap the element; out-of-range reads yield `undefined`,
/// never an error.
pub fn get_index<'gc>(mc: &MutationContext<'gc>, this: &NativeHostArrayPtr<'gc>, index: isize) -> Result<Value<'gc>, JSError> {
    let (elem, element_type, scope, converters) = {
        let bridge = this.borrow();
        if !bridge.has_index(index) {
            log::trace!("get_index: [{index}] out of range, undefined");
            return Ok(Value::Undefined);
        }
        (
            bridge.array.get(index as usize),
            bridge.element_type.clone(),
            bridge.scope,
            bridge.converters.clone(),
        )
    };
    converters.wrapper.wrap(mc, &scope, &converters, &elem, &element_type)
}

/// The bridge never reduces to a numeric primitive: the number hint yields
/// NaN and any non-primitive hint yields the bridge itself.
pub fn default_value<'gc>(this: &NativeHostArrayPtr<'gc>, hint: ToPrimitiveHint) -> Value<'gc> {
    match hint {
        ToPrimitiveHint::Default | ToPrimitiveHint::String => Value::String(utf8_to_utf16(&this.borrow().to_display_string())),
        ToPrimitiveHint::Boolean => Value::Boolean(true),
        ToPrimitiveHint::Number => Value::Number(f64::NAN),
        ToPrimitiveHint::Object => Value::HostArray(*this),
    }
}
