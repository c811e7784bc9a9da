//! # Property Bags
//!
//! Typed, ordered key/value stores shared with plugins through the property
//! suite. Bags are built from static schema tables ([`PropSpec`]) that fix
//! each key's type, cardinality, plugin writability and default.
//!
//! Keys may have a [`GetHook`] registered, in which case reads are computed by
//! the hook on demand instead of coming from stored slots.
//!
//! ## Usage
//!
//! ```rust
//! use ofx_clip_host::property::{PropSpec, PropType, PropertySet};
//!
//! const SCHEMA: &[PropSpec] = &[
//!     PropSpec::new("OfxPropTime", PropType::Double, 1, true, "0"),
//! ];
//!
//! let mut props = PropertySet::new(SCHEMA);
//! props.set_double("OfxPropTime", 0, 12.0).unwrap();
//! assert_eq!(props.get_double("OfxPropTime", 0).unwrap(), 12.0);
//! ```

pub mod set;
pub mod spec;
pub mod value;

pub use set::{GetHook, Property, PropertySet};
pub use spec::{PropSpec, PropType};
pub use value::{RawPointer, Value};

/// Opaque property set handle handed across the C boundary
///
/// This is the identity of the bag, nothing more. Resolving it back to a bag
/// is the job of the boundary layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PropertySetHandle(usize);

impl PropertySetHandle {
    pub(crate) fn from_ref<T>(record: &T) -> Self {
        Self(record as *const T as usize)
    }

    pub fn as_raw(self) -> usize {
        self.0
    }
}
