use crate::error::JSError;
use gc_arena::Collect;
use std::sync::{Arc, Mutex};

/// Static element-type descriptor for host arrays.
#[derive(Clone, Debug, PartialEq, Eq, Collect)]
#[collect(require_static)]
pub enum HostType {
    Bool,
    Int,
    Long,
    Double,
    Str,
    Array(Box<HostType>),
}

impl HostType {
    /// Reference types admit `Null`; the primitive kinds do not.
    pub fn is_reference(&self) -> bool {
        matches!(self, HostType::Str | HostType::Array(_))
    }

    pub fn is_instance(&self, value: &HostValue) -> bool {
        match (self, value) {
            (t, HostValue::Null) => t.is_reference(),
            (HostType::Bool, HostValue::Bool(_)) => true,
            (HostType::Int, HostValue::Int(_)) => true,
            (HostType::Long, HostValue::Long(_)) => true,
            (HostType::Double, HostValue::Double(_)) => true,
            (HostType::Str, HostValue::Str(_)) => true,
            (HostType::Array(elem), HostValue::Array(arr)) => arr.element_type() == &**elem,
            _ => false,
        }
    }
}

impl std::fmt::Display for HostType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HostType::Bool => write!(f, "boolean"),
            HostType::Int => write!(f, "int"),
            HostType::Long => write!(f, "long"),
            HostType::Double => write!(f, "double"),
            HostType::Str => write!(f, "string"),
            HostType::Array(elem) => write!(f, "{}[]", elem),
        }
    }
}

/// A statically typed value living on the host side of the bridge.
#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub enum HostValue {
    Null,
    Bool(bool),
    Int(i32),
    Long(i64),
    Double(f64),
    Str(String),
    Array(HostArray),
}

impl HostValue {
    /// Deep structural equality. Scalars compare within their own kind only;
    /// `Double` treats NaN as equal to NaN, matching boxed equality in the
    /// host environment. Arrays compare element-wise with an identity fast
    /// path.
    pub fn deep_eq(&self, other: &HostValue) -> bool {
        match (self, other) {
            (HostValue::Null, HostValue::Null) => true,
            (HostValue::Bool(a), HostValue::Bool(b)) => a == b,
            (HostValue::Int(a), HostValue::Int(b)) => a == b,
            (HostValue::Long(a), HostValue::Long(b)) => a == b,
            (HostValue::Double(a), HostValue::Double(b)) => a == b || (a.is_nan() && b.is_nan()),
            (HostValue::Str(a), HostValue::Str(b)) => a == b,
            (HostValue::Array(a), HostValue::Array(b)) => {
                if a.ptr_eq(b) {
                    return true;
                }
                if a.element_type() != b.element_type() || a.len() != b.len() {
                    return false;
                }
                let xs = a.snapshot();
                let ys = b.snapshot();
                xs.iter().zip(ys.iter()).all(|(x, y)| x.deep_eq(y))
            }
            _ => false,
        }
    }

    pub fn type_name(&self) -> String {
        match self {
            HostValue::Null => "null".to_string(),
            HostValue::Bool(_) => HostType::Bool.to_string(),
            HostValue::Int(_) => HostType::Int.to_string(),
            HostValue::Long(_) => HostType::Long.to_string(),
            HostValue::Double(_) => HostType::Double.to_string(),
            HostValue::Str(_) => HostType::Str.to_string(),
            HostValue::Array(arr) => arr.type_name(),
        }
    }
}

/// Opaque handle to a fixed-size, statically typed host array. Cloning the
/// handle aliases the same storage; the element count never changes after
/// construction, only elements are overwritten in place. Host code may write
/// through another alias at any time with no coordination beyond the
/// per-element lock.
#[derive(Clone, Debug, Collect)]
#[collect(require_static)]
pub struct HostArray {
    element_type: HostType,
    elements: Arc<Mutex<Vec<HostValue>>>,
}

impl HostArray {
    pub fn new(element_type: HostType, elements: Vec<HostValue>) -> Result<Self, JSError> {
        if let Some(bad) = elements.iter().find(|v| !element_type.is_instance(v)) {
            return Err(JSError::InvalidArgument {
                message: format!("{} value is not assignable to element type {}", bad.type_name(), element_type),
            });
        }
        Ok(HostArray {
            element_type,
            elements: Arc::new(Mutex::new(elements)),
        })
    }

    pub fn of_bools(values: &[bool]) -> HostArray {
        HostArray {
            element_type: HostType::Bool,
            elements: Arc::new(Mutex::new(values.iter().map(|v| HostValue::Bool(*v)).collect())),
        }
    }

    pub fn of_ints(values: &[i32]) -> HostArray {
        HostArray {
            element_type: HostType::Int,
            elements: Arc::new(Mutex::new(values.iter().map(|v| HostValue::Int(*v)).collect())),
        }
    }

    pub fn of_longs(values: &[i64]) -> HostArray {
        HostArray {
            element_type: HostType::Long,
            elements: Arc::new(Mutex::new(values.iter().map(|v| HostValue::Long(*v)).collect())),
        }
    }

    pub fn of_doubles(values: &[f64]) -> HostArray {
        HostArray {
            element_type: HostType::Double,
            elements: Arc::new(Mutex::new(values.iter().map(|v| HostValue::Double(*v)).collect())),
        }
    }

    pub fn of_strings(values: &[&str]) -> HostArray {
        HostArray {
            element_type: HostType::Str,
            elements: Arc::new(Mutex::new(values.iter().map(|v| HostValue::Str(v.to_string())).collect())),
        }
    }

    pub fn element_type(&self) -> &HostType {
        &self.element_type
    }

    pub fn len(&self) -> usize {
        self.elements.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy out one element. The caller is responsible for bounds.
    pub fn get(&self, index: usize) -> HostValue {
        self.elements.lock().unwrap()[index].clone()
    }

    /// Overwrite one element in place, visibly to every alias of the storage.
    pub fn set(&self, index: usize, value: HostValue) {
        debug_assert!(self.element_type.is_instance(&value), "element type mismatch");
        self.elements.lock().unwrap()[index] = value;
    }

    /// Copy of the whole element vector under a single lock acquisition.
    pub fn snapshot(&self) -> Vec<HostValue> {
        self.elements.lock().unwrap().clone()
    }

    pub fn ptr_eq(&self, other: &HostArray) -> bool {
        Arc::ptr_eq(&self.elements, &other.elements)
    }

    pub fn handle_addr(&self) -> usize {
        Arc::as_ptr(&self.elements) as *const () as usize
    }

    pub fn type_name(&self) -> String {
        format!("{}[]", self.element_type)
    }

    pub fn to_display_string(&self) -> String {
        format!("{}[{}]@{:x}", self.element_type, self.len(), self.handle_addr())
    }
}
