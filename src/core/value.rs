use crate::core::{Collect, Gc, GcPtr, GcTrace, MutationContext, PropertyKey, new_gc_cell_ptr};
use crate::host_array::NativeHostArrayPtr;
use crate::host_search::HostArrayMethod;
use crate::unicode::utf16_to_utf8;
use num_bigint::BigInt;

#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub struct SymbolData {
    pub description: Option<String>,
}

pub type JSObjectDataPtr<'gc> = GcPtr<'gc, JSObjectData<'gc>>;

#[inline]
pub fn new_js_object_data<'gc>(mc: &MutationContext<'gc>) -> JSObjectDataPtr<'gc> {
    new_gc_cell_ptr(mc, JSObjectData::new())
}

/// Plain dynamic object: string/index/symbol keyed properties in insertion
/// order plus an internal prototype pointer. Scopes are the same structure
/// with the prototype slot doubling as the parent link.
#[derive(Clone, Default)]
pub struct JSObjectData<'gc> {
    pub properties: indexmap::IndexMap<PropertyKey<'gc>, GcPtr<'gc, Value<'gc>>>,
    pub prototype: Option<JSObjectDataPtr<'gc>>,
}

unsafe impl<'gc> Collect<'gc> for JSObjectData<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        for (k, v) in &self.properties {
            k.trace(cc);
            v.trace(cc);
        }
        if let Some(p) = &self.prototype {
            p.trace(cc);
        }
    }
}

impl<'gc> JSObjectData<'gc> {
    pub fn new() -> Self {
        JSObjectData::default()
    }

    pub fn insert(&mut self, key: PropertyKey<'gc>, val: GcPtr<'gc, Value<'gc>>) {
        self.properties.insert(key, val);
    }
}

#[derive(Clone)]
pub enum Value<'gc> {
    Number(f64),
    BigInt(BigInt),
    String(Vec<u16>),
    Boolean(bool),
    Undefined,
    Null,
    Object(JSObjectDataPtr<'gc>),
    Function(String),
    Symbol(Gc<'gc, SymbolData>),
    /// A host array reflected into script space.
    HostArray(NativeHostArrayPtr<'gc>),
    /// A search method bound to one host array (`indexOf` / `includes`).
    HostMethod(Gc<'gc, HostArrayMethod>),
}

impl Value<'_> {
    pub fn is_null_or_undefined(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<&str> for Value<'_> {
    fn from(s: &str) -> Self {
        Value::String(crate::unicode::utf8_to_utf16(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(crate::unicode::utf8_to_utf16(&s))
    }
}

unsafe impl<'gc> Collect<'gc> for Value<'gc> {
    fn trace<T: GcTrace<'gc>>(&self, cc: &mut T) {
        match self {
            Value::Object(obj) => obj.trace(cc),
            Value::Symbol(sym) => sym.trace(cc),
            Value::HostArray(arr) => arr.trace(cc),
            Value::HostMethod(m) => m.trace(cc),
            _ => {}
        }
    }
}

impl<'gc> std::fmt::Debug for Value<'gc> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(n) => write!(f, "Number({})", n),
            Value::BigInt(b) => write!(f, "BigInt({})", b),
            Value::String(s) => write!(f, "String({:?})", utf16_to_utf8(s)),
            Value::Boolean(b) => write!(f, "Boolean({})", b),
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Object(_) => write!(f, "Object"),
            Value::Function(s) => write!(f, "Function({})", s),
            Value::Symbol(sym) => write!(f, "Symbol({:?})", sym.description),
            Value::HostArray(arr) => write!(f, "HostArray({})", arr.borrow().type_name()),
            Value::HostMethod(m) => write!(f, "HostMethod({})", m.name()),
        }
    }
}

pub fn value_to_string<'gc>(val: &Value<'gc>) -> String {
    match val {
        Value::Number(n) => {
            if n.is_nan() {
                "NaN".to_string()
            } else if n.is_infinite() {
                if n.is_sign_negative() {
                    "-Infinity".to_string()
                } else {
                    "Infinity".to_string()
                }
            } else {
                format_js_number(*n)
            }
        }
        Value::BigInt(b) => b.to_string(),
        Value::String(s) => utf16_to_utf8(s),
        Value::Boolean(b) => b.to_string(),
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Object(_) => "[object Object]".to_string(),
        Value::Function(name) => format!("function {}", name),
        Value::Symbol(sym) => {
            if let Some(desc) = &sym.description {
                format!("Symbol({desc})")
            } else {
                "Symbol()".to_string()
            }
        }
        Value::HostArray(arr) => arr.borrow().to_display_string(),
        Value::HostMethod(m) => format!("function {}", m.name()),
    }
}

pub fn format_js_number(n: f64) -> String {
    // ECMAScript ToString(-0) produces "0"
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    // Exponential form for very large or very small magnitudes (ECMAScript style)
    if !(1e-6..1e21).contains(&abs) {
        let s = format!("{:e}", n);
        if let Some((mant, exp)) = s.split_once('e') {
            let mant = mant.trim_end_matches('0').trim_end_matches('.');
            if let Ok(exp_int) = exp.parse::<i32>() {
                return format!("{}e{:+}", mant, exp_int);
            }
        }
        return s;
    }
    let mut s = format!("{}", n);
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    s
}

pub fn values_equal<'gc>(v1: &Value<'gc>, v2: &Value<'gc>) -> bool {
    match (v1, v2) {
        (Value::Number(n1), Value::Number(n2)) => {
            if n1.is_nan() && n2.is_nan() {
                true
            } else {
                n1 == n2
            }
        }
        (Value::BigInt(b1), Value::BigInt(b2)) => b1 == b2,
        (Value::String(s1), Value::String(s2)) => s1 == s2,
        (Value::Boolean(b1), Value::Boolean(b2)) => b1 == b2,
        (Value::Undefined, Value::Undefined) => true,
        (Value::Null, Value::Null) => true,
        (Value::Object(o1), Value::Object(o2)) => Gc::ptr_eq(*o1, *o2),
        (Value::Symbol(s1), Value::Symbol(s2)) => Gc::ptr_eq(*s1, *s2),
        // Host arrays compare by backing storage identity: any two bridges
        // over the same host array alias the same elements.
        (Value::HostArray(a1), Value::HostArray(a2)) => a1.borrow().storage().ptr_eq(a2.borrow().storage()),
        (Value::HostMethod(m1), Value::HostMethod(m2)) => Gc::ptr_eq(*m1, *m2),
        _ => false,
    }
}

pub fn object_get_key_value<'gc>(obj: &JSObjectDataPtr<'gc>, key: impl Into<PropertyKey<'gc>>) -> Option<GcPtr<'gc, Value<'gc>>> {
    let key = key.into();
    let mut current = Some(*obj);
    while let Some(cur) = current {
        if let Some(val) = cur.borrow().properties.get(&key) {
            return Some(*val);
        }
        current = cur.borrow().prototype;
    }
    None
}

pub fn get_own_property<'gc>(obj: &JSObjectDataPtr<'gc>, key: &PropertyKey<'gc>) -> Option<GcPtr<'gc, Value<'gc>>> {
    obj.borrow().properties.get(key).cloned()
}

pub fn object_set_key_value<'gc>(
    mc: &MutationContext<'gc>,
    obj: &JSObjectDataPtr<'gc>,
    key: impl Into<PropertyKey<'gc>>,
    val: Value<'gc>,
) {
    let val_ptr = new_gc_cell_ptr(mc, val);
    obj.borrow_mut(mc).insert(key.into(), val_ptr);
}
