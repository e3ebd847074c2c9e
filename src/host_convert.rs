use crate::core::{JSObjectDataPtr, MutationContext, Value, object_get_key_value, value_to_string};
use crate::error::JSError;
use crate::host_array::NativeHostArray;
use crate::host_value::{HostType, HostValue};
use crate::unicode::{utf8_to_utf16, utf16_to_utf8};
use gc_arena::Collect;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use std::sync::Arc;

/// Largest integer exactly representable as f64.
const MAX_SAFE_INTEGER: i64 = 9_007_199_254_740_991;

/// Converts a script value into a host value of the target element type.
/// Invoked on every index write.
pub trait CoercionEngine {
    fn coerce(&self, value: &Value<'_>, target: &HostType) -> Result<HostValue, JSError>;
}

/// Converts a host value into a script value. Invoked on every index read;
/// nested arrays are wrapped into fresh bridges by the same rule, which is
/// why the converter bundle is threaded through.
pub trait ElementWrapper {
    fn wrap<'gc>(
        &self,
        mc: &MutationContext<'gc>,
        scope: &JSObjectDataPtr<'gc>,
        converters: &Converters,
        value: &HostValue,
        static_type: &HostType,
    ) -> Result<Value<'gc>, JSError>;
}

/// Finds the shared array prototype in an enclosing scope. Invoked at most
/// once per bridge.
pub trait ScopeResolver {
    fn lookup_array_prototype<'gc>(&self, scope: &JSObjectDataPtr<'gc>) -> Option<JSObjectDataPtr<'gc>>;
}

/// Cloneable bundle of conversion strategies injected at bridge construction.
#[derive(Clone, Collect)]
#[collect(require_static)]
pub struct Converters {
    pub coercion: Arc<dyn CoercionEngine>,
    pub wrapper: Arc<dyn ElementWrapper>,
    pub scopes: Arc<dyn ScopeResolver>,
}

impl Converters {
    pub fn standard() -> Self {
        Converters {
            coercion: Arc::new(StandardCoercion),
            wrapper: Arc::new(StandardWrapper),
            scopes: Arc::new(StandardScopeResolver),
        }
    }
}

impl Default for Converters {
    fn default() -> Self {
        Converters::standard()
    }
}

pub struct StandardCoercion;

impl CoercionEngine for StandardCoercion {
    fn coerce(&self, value: &Value<'_>, target: &HostType) -> Result<HostValue, JSError> {
        let incompatible = || JSError::CoercionError {
            value: value_to_string(value),
            target: target.to_string(),
        };
        let result = match (value, target) {
            (Value::Number(n), HostType::Int) => {
                if !n.is_finite() {
                    return Err(incompatible());
                }
                let t = n.trunc();
                if !(i32::MIN as f64..=i32::MAX as f64).contains(&t) {
                    return Err(incompatible());
                }
                HostValue::Int(t as i32)
            }
            (Value::Number(n), HostType::Long) => {
                if !n.is_finite() {
                    return Err(incompatible());
                }
                let t = n.trunc();
                if t < i64::MIN as f64 || t >= i64::MAX as f64 {
                    return Err(incompatible());
                }
                HostValue::Long(t as i64)
            }
            (Value::Number(n), HostType::Double) => HostValue::Double(*n),
            (Value::BigInt(b), HostType::Int) => HostValue::Int(b.to_i32().ok_or_else(incompatible)?),
            (Value::BigInt(b), HostType::Long) => HostValue::Long(b.to_i64().ok_or_else(incompatible)?),
            (Value::BigInt(b), HostType::Double) => HostValue::Double(b.to_f64().ok_or_else(incompatible)?),
            (Value::Boolean(b), HostType::Bool) => HostValue::Bool(*b),
            (Value::String(s), HostType::Str) => HostValue::Str(utf16_to_utf8(s)),
            (Value::Null, t) if t.is_reference() => HostValue::Null,
            (Value::HostArray(wrapped), t) => {
                let unwrapped = wrapped.borrow().unwrap();
                if !t.is_instance(&unwrapped) {
                    return Err(incompatible());
                }
                unwrapped
            }
            _ => return Err(incompatible()),
        };
        log::trace!("coerce: {:?} -> {} = {:?}", value, target, result);
        Ok(result)
    }
}

pub struct StandardWrapper;

impl ElementWrapper for StandardWrapper {
    fn wrap<'gc>(
        &self,
        mc: &MutationContext<'gc>,
        scope: &JSObjectDataPtr<'gc>,
        converters: &Converters,
        value: &HostValue,
        static_type: &HostType,
    ) -> Result<Value<'gc>, JSError> {
        log::trace!("wrap: {:?} as {}", value, static_type);
        match value {
            HostValue::Null => Ok(Value::Null),
            HostValue::Bool(b) => Ok(Value::Boolean(*b)),
            HostValue::Int(v) => Ok(Value::Number(*v as f64)),
            HostValue::Long(v) => {
                // f64 cannot represent every i64 exactly; fall back to BigInt
                // beyond the safe-integer range.
                if v.unsigned_abs() <= MAX_SAFE_INTEGER as u64 {
                    Ok(Value::Number(*v as f64))
                } else {
                    Ok(Value::BigInt(BigInt::from(*v)))
                }
            }
            HostValue::Double(v) => Ok(Value::Number(*v)),
            HostValue::Str(s) => Ok(Value::String(utf8_to_utf16(s))),
            HostValue::Array(arr) => {
                let bridge = NativeHostArray::new(mc, scope, HostValue::Array(arr.clone()), converters.clone())?;
                Ok(Value::HostArray(bridge))
            }
        }
    }
}

pub struct StandardScopeResolver;

impl ScopeResolver for StandardScopeResolver {
    fn lookup_array_prototype<'gc>(&self, scope: &JSObjectDataPtr<'gc>) -> Option<JSObjectDataPtr<'gc>> {
        let ctor_val = object_get_key_value(scope, "Array")?;
        let ctor = match &*ctor_val.borrow() {
            Value::Object(o) => *o,
            _ => return None,
        };
        let proto_val = object_get_key_value(&ctor, "prototype")?;
        match &*proto_val.borrow() {
            Value::Object(p) => Some(*p),
            _ => None,
        }
    }
}
