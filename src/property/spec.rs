use std::fmt;

use super::Value;

/// Storage type of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropType {
    String,
    Int,
    Double,
    Pointer,
}

impl PropType {
    pub fn name(self) -> &'static str {
        match self {
            PropType::String => "string",
            PropType::Int => "int",
            PropType::Double => "double",
            PropType::Pointer => "pointer",
        }
    }
}

impl fmt::Display for PropType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of a schema table
///
/// A `dimension` of zero declares a variable length property, which starts
/// out empty and grows as values are set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpec {
    pub name: &'static str,
    pub prop_type: PropType,
    pub dimension: usize,
    pub plugin_read_only: bool,
    pub default: &'static str,
}

impl PropSpec {
    pub const fn new(
        name: &'static str,
        prop_type: PropType,
        dimension: usize,
        plugin_read_only: bool,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            prop_type,
            dimension,
            plugin_read_only,
            default,
        }
    }

    pub fn is_variable(&self) -> bool {
        self.dimension == 0
    }

    /// Initial slot values described by this row
    pub fn default_values(&self) -> Vec<Value> {
        if self.is_variable() {
            return Vec::new();
        }

        let value = Value::parse(self.prop_type, self.default).unwrap_or_else(|| {
            tracing::warn!(
                "Default {:?} does not parse as {} for {}, using zero",
                self.default,
                self.prop_type,
                self.name
            );
            Value::zero(self.prop_type)
        });
        vec![value; self.dimension]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_dimension_defaults() {
        let spec = PropSpec::new("range", PropType::Double, 2, true, "0");
        assert_eq!(spec.default_values(), vec![Value::Double(0.0), Value::Double(0.0)]);
    }

    #[test]
    fn test_variable_dimension_starts_empty() {
        let spec = PropSpec::new("comps", PropType::String, 0, false, "");
        assert!(spec.is_variable());
        assert!(spec.default_values().is_empty());
    }

    #[test]
    fn test_unparsable_default_falls_back_to_zero() {
        let spec = PropSpec::new("broken", PropType::Int, 1, false, "yes");
        assert_eq!(spec.default_values(), vec![Value::Int(0)]);
    }
}
