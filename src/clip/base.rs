use std::ops::Deref;

use crate::{
    error::{ClipError, PropResult},
    ofx::*,
    property::{PropertySet, PropertySetHandle},
};

use super::schema::{self, CLIP_DESCRIPTOR_SCHEMA};

/// Which side of the describe/instantiate split a clip record is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipRole {
    /// Plugin authored declaration, writable while describing
    Descriptor,
    /// Live clip of one effect instance
    Instance,
}

/// Opaque clip handle handed across the C boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClipHandle(usize);

impl ClipHandle {
    pub fn as_raw(self) -> usize {
        self.0
    }
}

/// State and accessors shared by clip descriptors and clip instances
#[derive(Debug, Clone)]
pub struct ClipBase {
    role: ClipRole,
    pub(crate) properties: PropertySet,
}

impl ClipBase {
    fn new_descriptor() -> Self {
        Self {
            role: ClipRole::Descriptor,
            properties: PropertySet::new(CLIP_DESCRIPTOR_SCHEMA),
        }
    }

    /// Copy a descriptor's properties for an instance, relaxing every
    /// read-only flag the descriptor carried
    pub(crate) fn instance_of(descriptor: &ClipBase) -> Self {
        let mut properties = descriptor.properties.clone();
        properties.set_all_plugin_read_only(false);
        Self {
            role: ClipRole::Instance,
            properties,
        }
    }

    fn string_prop(&self, key: &str) -> String {
        self.properties.get_string(key, 0).unwrap_or_default()
    }

    fn flag(&self, key: &str) -> bool {
        self.properties.get_int(key, 0).unwrap_or_default() != 0
    }

    pub fn role(&self) -> ClipRole {
        self.role
    }

    pub fn name(&self) -> String {
        self.string_prop(PROP_NAME)
    }

    /// Whether this is the effect's single output clip
    pub fn is_output(&self) -> bool {
        self.name() == OUTPUT_CLIP_NAME
    }

    /// Label, falling back to the name when unset
    pub fn label(&self) -> String {
        let label = self.string_prop(PROP_LABEL);
        if label.is_empty() {
            return self.name();
        }
        label
    }

    /// Short label, falling back to the label when unset
    pub fn short_label(&self) -> String {
        let label = self.string_prop(PROP_SHORT_LABEL);
        if label.is_empty() {
            return self.label();
        }
        label
    }

    /// Long label, falling back to the label when unset
    pub fn long_label(&self) -> String {
        let label = self.string_prop(PROP_LONG_LABEL);
        if label.is_empty() {
            return self.label();
        }
        label
    }

    /// Supported component layouts in declaration order
    pub fn supported_components(&self) -> Vec<String> {
        let count = self
            .properties
            .get_dimension(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS)
            .unwrap_or_default();
        self.properties
            .get_string_n(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS, count)
            .unwrap_or_default()
    }

    pub fn is_supported_component(&self, components: &str) -> bool {
        matches!(
            self.properties
                .find_string_value_index(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS, components),
            Ok(Some(_))
        )
    }

    /// Does the clip do random temporal access
    pub fn temporal_access(&self) -> bool {
        self.flag(IMAGE_EFFECT_PROP_TEMPORAL_CLIP_ACCESS)
    }

    pub fn is_optional(&self) -> bool {
        self.flag(IMAGE_CLIP_PROP_OPTIONAL)
    }

    /// Is the clip a nominal mask clip
    pub fn is_mask(&self) -> bool {
        self.flag(IMAGE_CLIP_PROP_IS_MASK)
    }

    /// How the clip wants fielded images presented to it
    pub fn field_extraction(&self) -> String {
        self.string_prop(IMAGE_CLIP_PROP_FIELD_EXTRACTION)
    }

    pub fn supports_tiles(&self) -> bool {
        self.flag(IMAGE_EFFECT_PROP_SUPPORTS_TILES)
    }

    /// Whether the plugin may write `key` on this clip, resolved from the
    /// schema and this clip's role. `None` for keys clips do not have.
    pub fn is_plugin_writable(&self, key: &str) -> Option<bool> {
        schema::plugin_read_only(key, self.role).map(|read_only| !read_only)
    }

    pub fn props(&self) -> &PropertySet {
        &self.properties
    }

    pub fn prop_handle(&self) -> PropertySetHandle {
        self.properties.handle()
    }

    pub fn handle(&self) -> ClipHandle {
        ClipHandle(self as *const Self as usize)
    }
}

/// A clip as declared by the plugin while describing an effect
#[derive(Debug, Clone)]
pub struct ClipDescriptor {
    base: ClipBase,
}

impl ClipDescriptor {
    pub fn new(name: &str) -> Self {
        let mut base = ClipBase::new_descriptor();
        // the key comes from the schema we just built from
        let _ = base.properties.set_string(PROP_NAME, 0, name);
        tracing::debug!("Described clip {}", name);
        Self { base }
    }

    pub fn base(&self) -> &ClipBase {
        &self.base
    }

    pub fn set_label(&mut self, label: &str) -> PropResult<()> {
        self.base.properties.set_string(PROP_LABEL, 0, label)
    }

    pub fn set_short_label(&mut self, label: &str) -> PropResult<()> {
        self.base.properties.set_string(PROP_SHORT_LABEL, 0, label)
    }

    pub fn set_long_label(&mut self, label: &str) -> PropResult<()> {
        self.base.properties.set_string(PROP_LONG_LABEL, 0, label)
    }

    /// Append a component layout to the supported list, once
    pub fn add_supported_component(&mut self, components: &str) -> PropResult<()> {
        if self.base.is_supported_component(components) {
            return Ok(());
        }
        let count = self
            .base
            .properties
            .get_dimension(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS)?;
        self.base
            .properties
            .set_string(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS, count, components)
    }

    pub fn set_temporal_access(&mut self, on: bool) -> PropResult<()> {
        self.base
            .properties
            .set_int(IMAGE_EFFECT_PROP_TEMPORAL_CLIP_ACCESS, 0, on as i32)
    }

    pub fn set_optional(&mut self, on: bool) -> PropResult<()> {
        self.base.properties.set_int(IMAGE_CLIP_PROP_OPTIONAL, 0, on as i32)
    }

    pub fn set_is_mask(&mut self, on: bool) -> PropResult<()> {
        self.base.properties.set_int(IMAGE_CLIP_PROP_IS_MASK, 0, on as i32)
    }

    pub fn set_field_extraction(&mut self, mode: &str) -> PropResult<()> {
        self.base
            .properties
            .set_string(IMAGE_CLIP_PROP_FIELD_EXTRACTION, 0, mode)
    }

    pub fn set_supports_tiles(&mut self, on: bool) -> PropResult<()> {
        self.base
            .properties
            .set_int(IMAGE_EFFECT_PROP_SUPPORTS_TILES, 0, on as i32)
    }

    /// Plugin side access to the descriptor's properties
    pub fn props_mut(&mut self) -> &mut PropertySet {
        &mut self.base.properties
    }

    /// Check the descriptor is usable for instantiation
    pub fn validate(&self) -> Result<(), ClipError> {
        if self.base.supported_components().is_empty() {
            return Err(ClipError::NoSupportedComponents { name: self.base.name() });
        }
        Ok(())
    }
}

impl Deref for ClipDescriptor {
    type Target = ClipBase;

    fn deref(&self) -> &ClipBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PropertyError;

    #[test]
    fn test_descriptor_defaults() {
        let desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        assert_eq!(desc.role(), ClipRole::Descriptor);
        assert_eq!(desc.name(), SOURCE_CLIP_NAME);
        assert!(!desc.is_output());
        assert!(!desc.temporal_access());
        assert!(!desc.is_optional());
        assert!(!desc.is_mask());
        assert!(desc.supports_tiles());
        assert_eq!(desc.field_extraction(), IMAGE_FIELD_DOUBLED);
        assert!(desc.supported_components().is_empty());
        assert_eq!(desc.props().get_string(PROP_TYPE, 0).unwrap(), TYPE_CLIP);
    }

    #[test]
    fn test_output_clip() {
        assert!(ClipDescriptor::new(OUTPUT_CLIP_NAME).is_output());
    }

    #[test]
    fn test_label_fallbacks() {
        let mut desc = ClipDescriptor::new("Matte");
        assert_eq!(desc.label(), "Matte");
        assert_eq!(desc.short_label(), "Matte");
        assert_eq!(desc.long_label(), "Matte");

        desc.set_label("Matte Input").unwrap();
        assert_eq!(desc.label(), "Matte Input");
        assert_eq!(desc.short_label(), "Matte Input");
        assert_eq!(desc.long_label(), "Matte Input");

        desc.set_short_label("M").unwrap();
        desc.set_long_label("Garbage Matte Input").unwrap();
        assert_eq!(desc.short_label(), "M");
        assert_eq!(desc.long_label(), "Garbage Matte Input");
        assert_eq!(desc.label(), "Matte Input");
    }

    #[test]
    fn test_supported_components_keep_order() {
        let mut desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        desc.add_supported_component(IMAGE_COMPONENT_RGBA).unwrap();
        desc.add_supported_component(IMAGE_COMPONENT_ALPHA).unwrap();
        desc.add_supported_component(IMAGE_COMPONENT_RGBA).unwrap();

        assert_eq!(
            desc.supported_components(),
            vec![IMAGE_COMPONENT_RGBA.to_string(), IMAGE_COMPONENT_ALPHA.to_string()]
        );
        assert!(desc.is_supported_component(IMAGE_COMPONENT_ALPHA));
        assert!(!desc.is_supported_component(IMAGE_COMPONENT_RGB));
        assert!(desc.validate().is_ok());
    }

    #[test]
    fn test_empty_supported_components_is_invalid() {
        let desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        assert!(matches!(
            desc.validate(),
            Err(ClipError::NoSupportedComponents { .. })
        ));
    }

    #[test]
    fn test_flags() {
        let mut desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        desc.set_temporal_access(true).unwrap();
        desc.set_optional(true).unwrap();
        desc.set_is_mask(true).unwrap();
        desc.set_supports_tiles(false).unwrap();
        desc.set_field_extraction(IMAGE_FIELD_SINGLE).unwrap();

        assert!(desc.temporal_access());
        assert!(desc.is_optional());
        assert!(desc.is_mask());
        assert!(!desc.supports_tiles());
        assert_eq!(desc.field_extraction(), IMAGE_FIELD_SINGLE);
    }

    #[test]
    fn test_plugin_cannot_rename_descriptor() {
        let mut desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        assert_eq!(desc.is_plugin_writable(PROP_NAME), Some(false));
        assert!(matches!(
            desc.props_mut().set_by_plugin(PROP_NAME, 0, "Other"),
            Err(PropertyError::ReadOnly { .. })
        ));
        desc.props_mut().set_by_plugin(PROP_LABEL, 0, "Src").unwrap();
        assert_eq!(desc.label(), "Src");
    }
}
