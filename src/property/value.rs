use std::ffi::c_void;
use std::fmt;

use super::PropType;

/// An untyped pointer stored in a property.
///
/// The bag never dereferences it; it only carries the address between host
/// and plugin.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawPointer(*mut c_void);

// The pointer is opaque payload, never dereferenced on this side.
unsafe impl Send for RawPointer {}
unsafe impl Sync for RawPointer {}

impl RawPointer {
    pub fn new(ptr: *mut c_void) -> Self {
        Self(ptr)
    }

    pub fn null() -> Self {
        Self(std::ptr::null_mut())
    }

    pub fn as_ptr(&self) -> *mut c_void {
        self.0
    }

    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

impl Default for RawPointer {
    fn default() -> Self {
        Self::null()
    }
}

impl fmt::Debug for RawPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:p}", self.0)
    }
}

impl<T> From<*mut T> for RawPointer {
    fn from(ptr: *mut T) -> Self {
        Self(ptr.cast())
    }
}

/// A single property value
///
/// Every slot of a property holds one of these; all slots of one property
/// share the same variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i32),
    Double(f64),
    Pointer(RawPointer),
}

impl Value {
    /// The zero value for a property type
    pub fn zero(prop_type: PropType) -> Self {
        match prop_type {
            PropType::String => Value::String(String::new()),
            PropType::Int => Value::Int(0),
            PropType::Double => Value::Double(0.0),
            PropType::Pointer => Value::Pointer(RawPointer::null()),
        }
    }

    /// Parse a textual schema default into a value of the given type
    pub fn parse(prop_type: PropType, text: &str) -> Option<Self> {
        match prop_type {
            PropType::String => Some(Value::String(text.to_string())),
            PropType::Int => text.trim().parse().ok().map(Value::Int),
            PropType::Double => text.trim().parse().ok().map(Value::Double),
            // Pointers can only default to null
            PropType::Pointer => Some(Value::Pointer(RawPointer::null())),
        }
    }

    pub fn prop_type(&self) -> PropType {
        match self {
            Value::String(_) => PropType::String,
            Value::Int(_) => PropType::Int,
            Value::Double(_) => PropType::Double,
            Value::Pointer(_) => PropType::Pointer,
        }
    }

    pub fn as_string(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<RawPointer> {
        match self {
            Value::Pointer(p) => Some(*p),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Int(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::Pointer(p) => write!(f, "{:?}", p),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<RawPointer> for Value {
    fn from(value: RawPointer) -> Self {
        Value::Pointer(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        assert_eq!(Value::parse(PropType::Int, "1"), Some(Value::Int(1)));
        assert_eq!(Value::parse(PropType::Double, "25.0"), Some(Value::Double(25.0)));
        assert_eq!(Value::parse(PropType::Double, "0"), Some(Value::Double(0.0)));
        assert_eq!(
            Value::parse(PropType::String, "OfxFieldDoubled"),
            Some(Value::String("OfxFieldDoubled".to_string()))
        );
        assert_eq!(Value::parse(PropType::Int, "not a number"), None);
        assert!(Value::parse(PropType::Pointer, "").unwrap().as_pointer().unwrap().is_null());
    }

    #[test]
    fn test_typed_accessors() {
        assert_eq!(Value::from(3).as_i32(), Some(3));
        assert_eq!(Value::from(3).as_f64(), Some(3.0));
        assert_eq!(Value::from("abc").as_string(), Some("abc"));
        assert_eq!(Value::from(1.5).as_i32(), None);
        assert_eq!(Value::from(1.5).prop_type(), PropType::Double);
    }
}
