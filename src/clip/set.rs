use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Result;

use super::{ClipDescriptor, ClipInstance, ClipValues, EffectInstance};

/// The clips an effect declares while describing
///
/// Clips keep the order they were defined in, which is the order hosts
/// present them in.
#[derive(Debug, Clone, Default)]
pub struct ClipDescriptorSet {
    clips: Vec<ClipDescriptor>,
    index: HashMap<String, usize>,
}

impl ClipDescriptorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a clip, or fetch it if already defined
    pub fn define_clip(&mut self, name: &str) -> &mut ClipDescriptor {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.clips.push(ClipDescriptor::new(name));
                self.index.insert(name.to_string(), self.clips.len() - 1);
                self.clips.len() - 1
            }
        };
        &mut self.clips[i]
    }

    pub fn get(&self, name: &str) -> Option<&ClipDescriptor> {
        self.index.get(name).map(|&i| &self.clips[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClipDescriptor> {
        match self.index.get(name) {
            Some(&i) => Some(&mut self.clips[i]),
            None => None,
        }
    }

    /// The output clip, if defined
    pub fn output(&self) -> Option<&ClipDescriptor> {
        self.clips.iter().find(|clip| clip.is_output())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipDescriptor> {
        self.clips.iter()
    }

    pub fn names(&self) -> Vec<String> {
        self.clips.iter().map(|clip| clip.name()).collect()
    }

    pub fn has_clip(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// The live clips of one effect instance
#[derive(Debug)]
pub struct ClipInstanceSet {
    clips: Vec<ClipInstance>,
    index: HashMap<String, usize>,
}

impl ClipInstanceSet {
    /// Create one clip instance per descriptor, in declaration order
    ///
    /// # Arguments
    ///
    /// * `effect` - The owning effect instance, shared by every clip
    /// * `descriptors` - The effect's clip declarations
    /// * `values_for` - Supplies the host computed values of each clip
    pub fn instantiate<F>(
        effect: Option<Arc<dyn EffectInstance>>,
        descriptors: &ClipDescriptorSet,
        mut values_for: F,
    ) -> Result<Self>
    where
        F: FnMut(&ClipDescriptor) -> Arc<dyn ClipValues>,
    {
        let mut clips = Vec::with_capacity(descriptors.len());
        let mut index = HashMap::new();

        for descriptor in descriptors.iter() {
            descriptor.validate()?;
            let clip = ClipInstance::new(effect.clone(), values_for(descriptor), descriptor)?;
            index.insert(clip.name(), clips.len());
            clips.push(clip);
        }

        tracing::debug!("Instantiated {} clips", clips.len());
        Ok(Self { clips, index })
    }

    pub fn get(&self, name: &str) -> Option<&ClipInstance> {
        self.index.get(name).map(|&i| &self.clips[i])
    }

    /// The output clip, if the effect defined one
    pub fn output(&self) -> Option<&ClipInstance> {
        self.clips.iter().find(|clip| clip.is_output())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClipInstance> {
        self.clips.iter()
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClipDefaults;
    use crate::error::{ClipError, HostError};
    use crate::ofx::*;

    fn described() -> ClipDescriptorSet {
        let mut set = ClipDescriptorSet::new();
        set.define_clip(SOURCE_CLIP_NAME)
            .add_supported_component(IMAGE_COMPONENT_RGBA)
            .unwrap();
        set.define_clip(OUTPUT_CLIP_NAME)
            .add_supported_component(IMAGE_COMPONENT_RGBA)
            .unwrap();
        set
    }

    #[test]
    fn test_define_clip_is_idempotent() {
        let mut set = described();
        set.define_clip(SOURCE_CLIP_NAME).set_optional(true).unwrap();

        assert_eq!(set.len(), 2);
        assert!(set.has_clip(SOURCE_CLIP_NAME));
        assert!(set.get(SOURCE_CLIP_NAME).unwrap().is_optional());
        assert_eq!(set.names(), vec![SOURCE_CLIP_NAME, OUTPUT_CLIP_NAME]);
        assert_eq!(set.output().unwrap().name(), OUTPUT_CLIP_NAME);
    }

    #[test]
    fn test_instantiate_in_declaration_order() {
        let descriptors = described();
        let clips = ClipInstanceSet::instantiate(None, &descriptors, |_| {
            Arc::new(ClipDefaults::default())
        })
        .unwrap();

        let names: Vec<String> = clips.iter().map(|c| c.name()).collect();
        assert_eq!(names, vec![SOURCE_CLIP_NAME, OUTPUT_CLIP_NAME]);
        assert!(clips.output().unwrap().is_output());
        assert!(clips.get(SOURCE_CLIP_NAME).is_some());
        assert!(clips.get("Matte").is_none());
    }

    #[test]
    fn test_values_are_per_clip() {
        let descriptors = described();
        let clips = ClipInstanceSet::instantiate(None, &descriptors, |desc| {
            let rate = if desc.is_output() { 50.0 } else { 25.0 };
            Arc::new(ClipDefaults {
                frame_rate: rate,
                ..ClipDefaults::default()
            })
        })
        .unwrap();

        let output = clips.output().unwrap();
        assert_eq!(output.get_double_property(IMAGE_EFFECT_PROP_FRAME_RATE, 0).unwrap(), 50.0);
        let source = clips.get(SOURCE_CLIP_NAME).unwrap();
        assert_eq!(source.get_double_property(IMAGE_EFFECT_PROP_FRAME_RATE, 0).unwrap(), 25.0);
    }

    #[test]
    fn test_unusable_descriptor_is_rejected() {
        let mut descriptors = described();
        descriptors.define_clip("Matte");
        let result = ClipInstanceSet::instantiate(None, &descriptors, |_| {
            Arc::new(ClipDefaults::default())
        });
        assert!(matches!(
            result,
            Err(HostError::Clip(ClipError::NoSupportedComponents { .. }))
        ));
    }
}
