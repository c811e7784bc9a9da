use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{PropResult, PropertyError};

use super::{PropSpec, PropType, PropertySetHandle, RawPointer, Value};

/// Lazily computes the values of hooked properties.
///
/// When a key has a hook registered, reads never see the stored slots; the
/// bag forwards them here instead. One method per value shape, matching the
/// property suite's get calls.
pub trait GetHook: Send + Sync {
    fn get_double(&self, name: &str, _index: usize) -> PropResult<f64> {
        Err(PropertyError::unknown(name))
    }

    fn get_double_n(&self, name: &str, _count: usize) -> PropResult<Vec<f64>> {
        Err(PropertyError::unknown(name))
    }

    fn get_int(&self, name: &str, _index: usize) -> PropResult<i32> {
        Err(PropertyError::unknown(name))
    }

    fn get_int_n(&self, name: &str, _count: usize) -> PropResult<Vec<i32>> {
        Err(PropertyError::unknown(name))
    }

    fn get_string(&self, name: &str, _index: usize) -> PropResult<String> {
        Err(PropertyError::unknown(name))
    }

    fn get_string_n(&self, name: &str, _count: usize) -> PropResult<Vec<String>> {
        Err(PropertyError::unknown(name))
    }

    /// Number of values the hooked property currently has
    fn get_dimension(&self, name: &str) -> usize;

    /// Reset the hooked property to its default
    fn reset(&self, name: &str) -> PropResult<()> {
        Err(PropertyError::missing_host_feature(name))
    }

    /// Called after every hooked read. Must not change what was returned.
    fn notify(&self, _name: &str, _is_single: bool, _index_or_n: usize) {}
}

/// One named, typed property in a bag
#[derive(Clone)]
pub struct Property {
    name: String,
    prop_type: PropType,
    dimension: usize,
    plugin_read_only: bool,
    values: Vec<Value>,
    defaults: Vec<Value>,
    hook: Option<Arc<dyn GetHook>>,
}

impl Property {
    fn from_spec(spec: &PropSpec) -> Self {
        let defaults = spec.default_values();
        Self {
            name: spec.name.to_string(),
            prop_type: spec.prop_type,
            dimension: spec.dimension,
            plugin_read_only: spec.plugin_read_only,
            values: defaults.clone(),
            defaults,
            hook: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prop_type(&self) -> PropType {
        self.prop_type
    }

    /// Declared cardinality, zero for variable length properties
    pub fn declared_dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_variable(&self) -> bool {
        self.dimension == 0
    }

    pub fn plugin_read_only(&self) -> bool {
        self.plugin_read_only
    }

    pub fn has_get_hook(&self) -> bool {
        self.hook.is_some()
    }

    /// Stored slots, ignoring any get hook
    pub fn stored_values(&self) -> &[Value] {
        &self.values
    }

    fn slot(&self, index: usize) -> PropResult<&Value> {
        self.values
            .get(index)
            .ok_or_else(|| PropertyError::value_range(self.name.as_str(), index))
    }

    fn first(&self, count: usize) -> PropResult<&[Value]> {
        if count > self.values.len() {
            return Err(PropertyError::value_range(self.name.as_str(), count));
        }
        Ok(&self.values[..count])
    }

    fn store(&mut self, index: usize, value: Value) -> PropResult<()> {
        if index >= self.values.len() {
            if !self.is_variable() {
                return Err(PropertyError::value_range(self.name.as_str(), index));
            }
            self.values.resize(index + 1, Value::zero(self.prop_type));
        }
        self.values[index] = value;
        Ok(())
    }

    fn store_all(&mut self, values: Vec<Value>) -> PropResult<()> {
        if self.is_variable() {
            self.values = values;
            return Ok(());
        }
        if values.len() > self.dimension {
            return Err(PropertyError::value_range(self.name.as_str(), values.len()));
        }
        for (slot, value) in self.values.iter_mut().zip(values) {
            *slot = value;
        }
        Ok(())
    }
}

impl fmt::Debug for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("name", &self.name)
            .field("type", &self.prop_type)
            .field("dimension", &self.dimension)
            .field("plugin_read_only", &self.plugin_read_only)
            .field("values", &self.values)
            .field("hooked", &self.hook.is_some())
            .finish()
    }
}

/// A typed, ordered property bag built from schema tables
///
/// Host side setters ignore the plugin read-only flag; [`PropertySet::set_by_plugin`]
/// enforces it.
#[derive(Clone, Default)]
pub struct PropertySet {
    properties: Vec<Property>,
    index: HashMap<String, usize>,
}

impl PropertySet {
    /// Build a bag from a schema table
    pub fn new(specs: &[PropSpec]) -> Self {
        let mut set = Self::default();
        set.add_properties(specs);
        set
    }

    /// Layer more schema rows on top of the bag
    ///
    /// A row naming a key that already exists redeclares it in place.
    pub fn add_properties(&mut self, specs: &[PropSpec]) {
        for spec in specs {
            let property = Property::from_spec(spec);
            match self.index.get(spec.name) {
                Some(&i) => self.properties[i] = property,
                None => {
                    self.index.insert(spec.name.to_string(), self.properties.len());
                    self.properties.push(property);
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Properties in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter()
    }

    pub fn property(&self, name: &str) -> PropResult<&Property> {
        self.index
            .get(name)
            .map(|&i| &self.properties[i])
            .ok_or_else(|| PropertyError::unknown(name))
    }

    fn property_mut(&mut self, name: &str) -> PropResult<&mut Property> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.properties[i]),
            None => Err(PropertyError::unknown(name)),
        }
    }

    fn typed(&self, name: &str, expected: PropType) -> PropResult<&Property> {
        let property = self.property(name)?;
        if property.prop_type != expected {
            return Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: expected.name(),
            });
        }
        Ok(property)
    }

    fn typed_mut(&mut self, name: &str, expected: PropType) -> PropResult<&mut Property> {
        let property = self.property_mut(name)?;
        if property.prop_type != expected {
            return Err(PropertyError::TypeMismatch {
                name: name.to_string(),
                expected: expected.name(),
            });
        }
        Ok(property)
    }

    // ==========================================
    // GETTERS
    // ==========================================

    pub fn get_string(&self, name: &str, index: usize) -> PropResult<String> {
        let property = self.typed(name, PropType::String)?;
        if let Some(hook) = &property.hook {
            let value = hook.get_string(name, index)?;
            hook.notify(name, true, index);
            return Ok(value);
        }
        Ok(property.slot(index)?.as_string().unwrap_or_default().to_string())
    }

    pub fn get_string_n(&self, name: &str, count: usize) -> PropResult<Vec<String>> {
        let property = self.typed(name, PropType::String)?;
        if let Some(hook) = &property.hook {
            let values = hook.get_string_n(name, count)?;
            hook.notify(name, false, count);
            return Ok(values);
        }
        Ok(property
            .first(count)?
            .iter()
            .map(|v| v.as_string().unwrap_or_default().to_string())
            .collect())
    }

    pub fn get_int(&self, name: &str, index: usize) -> PropResult<i32> {
        let property = self.typed(name, PropType::Int)?;
        if let Some(hook) = &property.hook {
            let value = hook.get_int(name, index)?;
            hook.notify(name, true, index);
            return Ok(value);
        }
        Ok(property.slot(index)?.as_i32().unwrap_or_default())
    }

    pub fn get_int_n(&self, name: &str, count: usize) -> PropResult<Vec<i32>> {
        let property = self.typed(name, PropType::Int)?;
        if let Some(hook) = &property.hook {
            let values = hook.get_int_n(name, count)?;
            hook.notify(name, false, count);
            return Ok(values);
        }
        Ok(property
            .first(count)?
            .iter()
            .map(|v| v.as_i32().unwrap_or_default())
            .collect())
    }

    pub fn get_double(&self, name: &str, index: usize) -> PropResult<f64> {
        let property = self.typed(name, PropType::Double)?;
        if let Some(hook) = &property.hook {
            let value = hook.get_double(name, index)?;
            hook.notify(name, true, index);
            return Ok(value);
        }
        Ok(property.slot(index)?.as_f64().unwrap_or_default())
    }

    pub fn get_double_n(&self, name: &str, count: usize) -> PropResult<Vec<f64>> {
        let property = self.typed(name, PropType::Double)?;
        if let Some(hook) = &property.hook {
            let values = hook.get_double_n(name, count)?;
            hook.notify(name, false, count);
            return Ok(values);
        }
        Ok(property
            .first(count)?
            .iter()
            .map(|v| v.as_f64().unwrap_or_default())
            .collect())
    }

    pub fn get_pointer(&self, name: &str, index: usize) -> PropResult<RawPointer> {
        let property = self.typed(name, PropType::Pointer)?;
        Ok(property.slot(index)?.as_pointer().unwrap_or_default())
    }

    /// Every current value of a property, read through its hook if any
    pub fn get_values(&self, name: &str) -> PropResult<Vec<Value>> {
        let property = self.property(name)?;
        let count = self.get_dimension(name)?;
        let values = match property.prop_type {
            PropType::String => self
                .get_string_n(name, count)?
                .into_iter()
                .map(Value::String)
                .collect(),
            PropType::Int => self.get_int_n(name, count)?.into_iter().map(Value::Int).collect(),
            PropType::Double => self
                .get_double_n(name, count)?
                .into_iter()
                .map(Value::Double)
                .collect(),
            PropType::Pointer => property.first(count)?.to_vec(),
        };
        Ok(values)
    }

    /// Current number of values of a property
    pub fn get_dimension(&self, name: &str) -> PropResult<usize> {
        let property = self.property(name)?;
        match &property.hook {
            Some(hook) => Ok(hook.get_dimension(name)),
            None => Ok(property.values.len()),
        }
    }

    /// Position of `value` in a string property, if present
    pub fn find_string_value_index(&self, name: &str, value: &str) -> PropResult<Option<usize>> {
        let property = self.typed(name, PropType::String)?;
        Ok(property
            .values
            .iter()
            .position(|v| v.as_string() == Some(value)))
    }

    // ==========================================
    // SETTERS
    // ==========================================

    pub fn set_string(&mut self, name: &str, index: usize, value: &str) -> PropResult<()> {
        self.typed_mut(name, PropType::String)?
            .store(index, Value::String(value.to_string()))
    }

    pub fn set_string_n(&mut self, name: &str, values: &[&str]) -> PropResult<()> {
        let values = values.iter().map(|s| Value::from(*s)).collect();
        self.typed_mut(name, PropType::String)?.store_all(values)
    }

    pub fn set_int(&mut self, name: &str, index: usize, value: i32) -> PropResult<()> {
        self.typed_mut(name, PropType::Int)?.store(index, Value::Int(value))
    }

    pub fn set_int_n(&mut self, name: &str, values: &[i32]) -> PropResult<()> {
        let values = values.iter().copied().map(Value::Int).collect();
        self.typed_mut(name, PropType::Int)?.store_all(values)
    }

    pub fn set_double(&mut self, name: &str, index: usize, value: f64) -> PropResult<()> {
        self.typed_mut(name, PropType::Double)?
            .store(index, Value::Double(value))
    }

    pub fn set_double_n(&mut self, name: &str, values: &[f64]) -> PropResult<()> {
        let values = values.iter().copied().map(Value::Double).collect();
        self.typed_mut(name, PropType::Double)?.store_all(values)
    }

    pub fn set_pointer(&mut self, name: &str, index: usize, value: RawPointer) -> PropResult<()> {
        self.typed_mut(name, PropType::Pointer)?
            .store(index, Value::Pointer(value))
    }

    /// Plugin facing set: refuses read-only keys
    pub fn set_by_plugin<V: Into<Value>>(&mut self, name: &str, index: usize, value: V) -> PropResult<()> {
        let value = value.into();
        let property = self.typed_mut(name, value.prop_type())?;
        if property.plugin_read_only {
            return Err(PropertyError::ReadOnly {
                name: name.to_string(),
            });
        }
        property.store(index, value)
    }

    /// Restore a property to its schema default
    pub fn reset(&mut self, name: &str) -> PropResult<()> {
        let property = self.property_mut(name)?;
        if let Some(hook) = &property.hook {
            return hook.reset(name);
        }
        property.values = property.defaults.clone();
        Ok(())
    }

    // ==========================================
    // FLAGS AND HOOKS
    // ==========================================

    pub fn plugin_read_only(&self, name: &str) -> PropResult<bool> {
        Ok(self.property(name)?.plugin_read_only)
    }

    pub fn set_plugin_read_only(&mut self, name: &str, read_only: bool) -> PropResult<()> {
        self.property_mut(name)?.plugin_read_only = read_only;
        Ok(())
    }

    /// Clear or set the plugin read-only flag on every key at once
    pub fn set_all_plugin_read_only(&mut self, read_only: bool) {
        for property in &mut self.properties {
            property.plugin_read_only = read_only;
        }
    }

    /// Route reads of `name` through `hook`
    pub fn set_get_hook(&mut self, name: &str, hook: Arc<dyn GetHook>) -> PropResult<()> {
        self.property_mut(name)?.hook = Some(hook);
        Ok(())
    }

    /// Opaque handle for the C boundary
    pub fn handle(&self) -> PropertySetHandle {
        PropertySetHandle::from_ref(self)
    }
}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.properties.iter()).finish()
    }
}
