use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::{
    error::{PropResult, PropertyError},
    ofx::{self, *},
    property::{GetHook, PropType, PropertySet},
};

use super::{
    negotiate,
    schema::{CLIP_CHANGED_ARGS_SCHEMA, CLIP_INSTANCE_SCHEMA},
    ClipBase, ClipDescriptor, ClipValues, EffectInstance,
};

/// Format chosen for the clip by the clip preferences pass
struct Negotiated {
    pixel_depth: String,
    components: String,
}

/// Answers reads of a clip instance's host computed properties
struct InstanceValues {
    values: Arc<dyn ClipValues>,
    negotiated: RwLock<Negotiated>,
}

impl InstanceValues {
    fn new(values: Arc<dyn ClipValues>) -> Self {
        Self {
            values,
            negotiated: RwLock::new(Negotiated {
                pixel_depth: BIT_DEPTH_NONE.to_string(),
                components: IMAGE_COMPONENT_NONE.to_string(),
            }),
        }
    }

    fn pixel_depth(&self) -> String {
        self.negotiated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .pixel_depth
            .clone()
    }

    fn components(&self) -> String {
        self.negotiated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .components
            .clone()
    }

    fn string_value(&self, name: &str) -> PropResult<String> {
        let value = match name {
            IMAGE_EFFECT_PROP_PIXEL_DEPTH => self.pixel_depth(),
            IMAGE_EFFECT_PROP_COMPONENTS => self.components(),
            IMAGE_CLIP_PROP_UNMAPPED_COMPONENTS => self.values.unmapped_components(),
            IMAGE_CLIP_PROP_UNMAPPED_PIXEL_DEPTH => self.values.unmapped_bit_depth(),
            IMAGE_EFFECT_PROP_PREMULTIPLICATION => self.values.premult(),
            IMAGE_CLIP_PROP_FIELD_ORDER => self.values.field_order(),
            _ => return Err(PropertyError::value_range(name, 0)),
        };
        Ok(value)
    }

    fn double_values(&self, name: &str) -> PropResult<Vec<f64>> {
        let values = match name {
            IMAGE_PROP_PIXEL_ASPECT_RATIO => vec![self.values.aspect_ratio()],
            IMAGE_EFFECT_PROP_FRAME_RATE => vec![self.values.frame_rate()],
            IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RATE => vec![self.values.unmapped_frame_rate()],
            IMAGE_EFFECT_PROP_FRAME_RANGE => {
                let (start, end) = self.values.frame_range();
                vec![start, end]
            }
            IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE => {
                let (start, end) = self.values.unmapped_frame_range();
                vec![start, end]
            }
            _ => return Err(PropertyError::value_range(name, 0)),
        };
        Ok(values)
    }

    fn int_value(&self, name: &str) -> PropResult<i32> {
        match name {
            IMAGE_CLIP_PROP_CONNECTED => Ok(self.values.connected() as i32),
            IMAGE_CLIP_PROP_CONTINUOUS_SAMPLES => Ok(self.values.continuous_samples() as i32),
            _ => Err(PropertyError::value_range(name, 0)),
        }
    }
}

impl GetHook for InstanceValues {
    fn get_double(&self, name: &str, index: usize) -> PropResult<f64> {
        self.double_values(name)?
            .get(index)
            .copied()
            .ok_or_else(|| PropertyError::value_range(name, index))
    }

    fn get_double_n(&self, name: &str, count: usize) -> PropResult<Vec<f64>> {
        let mut values = self.double_values(name)?;
        if count > values.len() {
            return Err(PropertyError::value_range(name, count));
        }
        values.truncate(count);
        Ok(values)
    }

    fn get_int(&self, name: &str, index: usize) -> PropResult<i32> {
        if index != 0 {
            return Err(PropertyError::value_range(name, index));
        }
        self.int_value(name)
    }

    fn get_int_n(&self, name: &str, count: usize) -> PropResult<Vec<i32>> {
        if count > 1 {
            return Err(PropertyError::value_range(name, count));
        }
        let value = self.int_value(name)?;
        Ok(vec![value; count])
    }

    fn get_string(&self, name: &str, index: usize) -> PropResult<String> {
        if index != 0 {
            return Err(PropertyError::value_range(name, index));
        }
        self.string_value(name)
    }

    fn get_string_n(&self, name: &str, count: usize) -> PropResult<Vec<String>> {
        match count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![self.string_value(name)?]),
            _ => Err(PropertyError::value_range(name, count)),
        }
    }

    fn get_dimension(&self, name: &str) -> usize {
        match name {
            IMAGE_EFFECT_PROP_FRAME_RANGE | IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE => 2,
            _ => 1,
        }
    }

    fn reset(&self, name: &str) -> PropResult<()> {
        // host computed, nothing for a plugin to reset
        Err(PropertyError::missing_host_feature(name))
    }

    fn notify(&self, name: &str, is_single: bool, index_or_n: usize) {
        self.values.notify(name, is_single, index_or_n);
    }
}

/// A live clip of one effect instance
///
/// Built from the effect's [`ClipDescriptor`]. The descriptor's properties are
/// copied and made writable, then the host computed keys are layered on top as
/// read-only and served on every read by the clip's [`ClipValues`].
pub struct ClipInstance {
    base: ClipBase,
    effect: Option<Arc<dyn EffectInstance>>,
    source: Arc<InstanceValues>,
}

impl ClipInstance {
    /// Create a clip instance
    ///
    /// # Arguments
    ///
    /// * `effect` - The owning effect instance, if one is bound
    /// * `values` - Source of the clip's host computed values
    /// * `descriptor` - The clip's declaration
    pub fn new(
        effect: Option<Arc<dyn EffectInstance>>,
        values: Arc<dyn ClipValues>,
        descriptor: &ClipDescriptor,
    ) -> PropResult<Self> {
        let mut base = ClipBase::instance_of(descriptor.base());
        // Added after the copy was relaxed so these stay read-only.
        base.properties.add_properties(CLIP_INSTANCE_SCHEMA);

        let source = Arc::new(InstanceValues::new(values));
        for spec in CLIP_INSTANCE_SCHEMA {
            match spec.prop_type {
                PropType::Double | PropType::String | PropType::Int => {
                    base.properties.set_get_hook(spec.name, source.clone())?;
                }
                PropType::Pointer => {}
            }
        }

        debug!("Instantiated clip {}", base.name());
        Ok(Self {
            base,
            effect,
            source,
        })
    }

    pub fn effect(&self) -> Option<&Arc<dyn EffectInstance>> {
        self.effect.as_ref()
    }

    /// Current negotiated component layout
    pub fn components(&self) -> String {
        self.source.components()
    }

    /// Set the negotiated component layout, during clip preferences
    pub fn set_components(&self, components: &str) {
        let mut negotiated = self
            .source
            .negotiated
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        negotiated.components = components.to_string();
    }

    /// Current negotiated pixel depth
    pub fn pixel_depth(&self) -> String {
        self.source.pixel_depth()
    }

    /// Set the negotiated pixel depth, during clip preferences
    pub fn set_pixel_depth(&self, depth: &str) {
        let mut negotiated = self
            .source
            .negotiated
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        negotiated.pixel_depth = depth.to_string();
    }

    /// Number of values a host computed property has: 2 for frame ranges, 1 otherwise
    pub fn get_dimension(&self, name: &str) -> usize {
        self.source.get_dimension(name)
    }

    /// Always fails, instance values are computed by the host
    pub fn reset(&self, name: &str) -> PropResult<()> {
        self.source.reset(name)
    }

    pub fn get_double_property(&self, name: &str, index: usize) -> PropResult<f64> {
        self.source.get_double(name, index)
    }

    pub fn get_double_property_n(&self, name: &str, count: usize) -> PropResult<Vec<f64>> {
        self.source.get_double_n(name, count)
    }

    pub fn get_int_property(&self, name: &str, index: usize) -> PropResult<i32> {
        self.source.get_int(name, index)
    }

    pub fn get_int_property_n(&self, name: &str, count: usize) -> PropResult<Vec<i32>> {
        self.source.get_int_n(name, count)
    }

    pub fn get_string_property(&self, name: &str, index: usize) -> PropResult<String> {
        self.source.get_string(name, index)
    }

    pub fn get_string_property_n(&self, name: &str, count: usize) -> PropResult<Vec<String>> {
        self.source.get_string_n(name, count)
    }

    /// Tell the host a value was just queried
    pub fn notify(&self, name: &str, is_single: bool, index_or_n: usize) {
        self.source.notify(name, is_single, index_or_n);
    }

    fn changed_args(&self, reason: &str, time: f64, render_scale: PointD) -> PropResult<PropertySet> {
        let mut args = PropertySet::new(CLIP_CHANGED_ARGS_SCHEMA);
        args.set_string(PROP_NAME, 0, &self.name())?;
        args.set_string(PROP_CHANGE_REASON, 0, reason)?;
        args.set_double(PROP_TIME, 0, time)?;
        args.set_double_n(IMAGE_EFFECT_PROP_RENDER_SCALE, &[render_scale.x, render_scale.y])?;
        Ok(args)
    }

    /// Tell the plugin this clip changed
    ///
    /// Calls the owning effect's main entry with the instance changed action,
    /// synchronously. Returns the plugin's status, or `kOfxStatFailed` when no
    /// effect is bound.
    pub fn instance_changed_action(&self, reason: &str, time: f64, render_scale: PointD) -> Status {
        let name = self.name();
        let Some(effect) = &self.effect else {
            warn!("Clip {} has no effect instance to notify", name);
            return Status::FAILED;
        };

        let in_args = match self.changed_args(reason, time, render_scale) {
            Ok(args) => args,
            Err(e) => {
                warn!("Could not build instance changed args for clip {}: {}", name, e);
                return Status::FAILED;
            }
        };

        let handle = effect.handle();
        debug!(
            "OFX: {:?}->{}({},{},{},{},({},{}))",
            handle, ACTION_INSTANCE_CHANGED, TYPE_CLIP, name, reason, time, render_scale.x, render_scale.y
        );

        let status = effect.main_entry(ACTION_INSTANCE_CHANGED, handle, Some(&in_args), None);

        debug!("OFX: {:?}->{} on clip {} returned {}", handle, ACTION_INSTANCE_CHANGED, name, status);
        if !status.is_ok() && status != Status::REPLY_DEFAULT {
            warn!("Instance changed action on clip {} returned {}", name, status);
        }
        status
    }

    /// Nearest supported component layout to `requested`
    ///
    /// Custom layouts are returned unchanged. The chromatic layouts are the
    /// owning effect's, or the built-in ones when no effect is bound.
    pub fn find_supported_comp(&self, requested: &str) -> String {
        let supported = self.supported_components();
        let found = match &self.effect {
            Some(effect) => negotiate::find_supported_comp(supported.as_slice(), requested, |c| {
                effect.is_chromatic_component(c)
            }),
            None => negotiate::find_supported_comp(supported.as_slice(), requested, ofx::is_chromatic_component),
        };
        found.to_string()
    }
}

impl Deref for ClipInstance {
    type Target = ClipBase;

    fn deref(&self) -> &ClipBase {
        &self.base
    }
}

impl fmt::Debug for ClipInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipInstance")
            .field("name", &self.name())
            .field("components", &self.components())
            .field("pixel_depth", &self.pixel_depth())
            .field("bound", &self.effect.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::{schema::CLIP_DESCRIPTOR_SCHEMA, EffectHandle};
    use crate::config::ClipDefaults;
    use std::sync::Mutex;

    /// Records every main entry call
    struct RecordingEffect {
        calls: Mutex<Vec<(String, PropertySet)>>,
        reply: Status,
    }

    impl RecordingEffect {
        fn new(reply: Status) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply,
            })
        }
    }

    impl EffectInstance for RecordingEffect {
        fn main_entry(
            &self,
            action: &str,
            _handle: EffectHandle,
            in_args: Option<&PropertySet>,
            _out_args: Option<&mut PropertySet>,
        ) -> Status {
            let args = in_args.cloned().unwrap_or_default();
            self.calls.lock().unwrap().push((action.to_string(), args));
            self.reply
        }

        fn handle(&self) -> EffectHandle {
            EffectHandle(42)
        }
    }

    fn source_descriptor() -> ClipDescriptor {
        let mut desc = ClipDescriptor::new(SOURCE_CLIP_NAME);
        desc.set_label("Source Clip").unwrap();
        desc.add_supported_component(IMAGE_COMPONENT_RGBA).unwrap();
        desc.add_supported_component(IMAGE_COMPONENT_ALPHA).unwrap();
        desc
    }

    fn defaults() -> Arc<ClipDefaults> {
        Arc::new(ClipDefaults {
            frame_rate: 24.0,
            frame_range: [1.0, 100.0],
            unmapped_frame_range: [0.0, 250.0],
            connected: true,
            ..ClipDefaults::default()
        })
    }

    fn instance(effect: Option<Arc<dyn EffectInstance>>) -> ClipInstance {
        ClipInstance::new(effect, defaults(), &source_descriptor()).unwrap()
    }

    #[test]
    fn test_instance_copies_descriptor() {
        let clip = instance(None);
        assert_eq!(clip.role(), crate::clip::ClipRole::Instance);
        assert_eq!(clip.name(), SOURCE_CLIP_NAME);
        assert_eq!(clip.label(), "Source Clip");
        assert_eq!(clip.supported_components().len(), 2);
        assert!(clip.supports_tiles());
    }

    #[test]
    fn test_read_only_flags_after_instantiation() {
        let clip = instance(None);
        for spec in CLIP_DESCRIPTOR_SCHEMA {
            assert!(!clip.props().plugin_read_only(spec.name).unwrap(), "{}", spec.name);
            assert_eq!(clip.is_plugin_writable(spec.name), Some(true));
        }
        for spec in CLIP_INSTANCE_SCHEMA {
            assert!(clip.props().plugin_read_only(spec.name).unwrap(), "{}", spec.name);
            assert_eq!(clip.is_plugin_writable(spec.name), Some(false));
        }
    }

    #[test]
    fn test_descriptor_unchanged_by_instantiation() {
        let desc = source_descriptor();
        let _clip = ClipInstance::new(None, defaults(), &desc).unwrap();
        assert!(desc.props().plugin_read_only(PROP_NAME).unwrap());
        assert!(!desc.props().contains(IMAGE_EFFECT_PROP_FRAME_RATE));
    }

    #[test]
    fn test_plugin_cannot_write_instance_keys() {
        let mut props = instance(None).props().clone();
        assert!(matches!(
            props.set_by_plugin(IMAGE_EFFECT_PROP_FRAME_RATE, 0, 50.0),
            Err(PropertyError::ReadOnly { .. })
        ));
    }

    #[test]
    fn test_reads_are_served_live() {
        let clip = instance(None);
        let props = clip.props();
        assert_eq!(props.get_double(IMAGE_EFFECT_PROP_FRAME_RATE, 0).unwrap(), 24.0);
        assert_eq!(props.get_double_n(IMAGE_EFFECT_PROP_FRAME_RANGE, 2).unwrap(), vec![1.0, 100.0]);
        assert_eq!(props.get_double(IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE, 1).unwrap(), 250.0);
        assert_eq!(props.get_int(IMAGE_CLIP_PROP_CONNECTED, 0).unwrap(), 1);
        assert_eq!(props.get_string(IMAGE_EFFECT_PROP_COMPONENTS, 0).unwrap(), IMAGE_COMPONENT_NONE);

        clip.set_components(IMAGE_COMPONENT_RGBA);
        clip.set_pixel_depth(BIT_DEPTH_FLOAT);
        assert_eq!(props.get_string(IMAGE_EFFECT_PROP_COMPONENTS, 0).unwrap(), IMAGE_COMPONENT_RGBA);
        assert_eq!(props.get_string(IMAGE_EFFECT_PROP_PIXEL_DEPTH, 0).unwrap(), BIT_DEPTH_FLOAT);
        assert_eq!(props.get_dimension(IMAGE_EFFECT_PROP_FRAME_RANGE).unwrap(), 2);
    }

    #[test]
    fn test_dimensions() {
        let clip = instance(None);
        assert_eq!(clip.get_dimension(IMAGE_EFFECT_PROP_FRAME_RANGE), 2);
        assert_eq!(clip.get_dimension(IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE), 2);
        assert_eq!(clip.get_dimension(PROP_NAME), 1);
        assert_eq!(clip.get_dimension(IMAGE_EFFECT_PROP_FRAME_RATE), 1);
    }

    #[test]
    fn test_reset_is_missing_host_feature() {
        let clip = instance(None);
        let err = clip.reset(IMAGE_EFFECT_PROP_FRAME_RATE).unwrap_err();
        assert_eq!(err.status(), Status::ERR_MISSING_HOST_FEATURE);

        let mut props = clip.props().clone();
        assert!(matches!(
            props.reset(IMAGE_CLIP_PROP_CONNECTED),
            Err(PropertyError::MissingHostFeature { .. })
        ));
    }

    #[test]
    fn test_double_cardinality_checks() {
        let clip = instance(None);
        assert_eq!(clip.get_double_property(IMAGE_PROP_PIXEL_ASPECT_RATIO, 0).unwrap(), 1.0);
        assert!(clip.get_double_property(IMAGE_PROP_PIXEL_ASPECT_RATIO, 1).is_err());
        assert_eq!(clip.get_double_property(IMAGE_EFFECT_PROP_FRAME_RANGE, 1).unwrap(), 100.0);
        assert!(clip.get_double_property(IMAGE_EFFECT_PROP_FRAME_RANGE, 2).is_err());

        assert_eq!(clip.get_double_property_n(IMAGE_EFFECT_PROP_FRAME_RANGE, 1).unwrap(), vec![1.0]);
        assert!(clip.get_double_property_n(IMAGE_EFFECT_PROP_FRAME_RANGE, 3).is_err());
        assert!(clip.get_double_property_n(IMAGE_EFFECT_PROP_FRAME_RATE, 2).is_err());

        let err = clip.get_double_property(PROP_LABEL, 0).unwrap_err();
        assert_eq!(err.status(), Status::ERR_VALUE);
    }

    #[test]
    fn test_int_cardinality_checks() {
        let clip = instance(None);
        assert_eq!(clip.get_int_property(IMAGE_CLIP_PROP_CONNECTED, 0).unwrap(), 1);
        assert_eq!(clip.get_int_property(IMAGE_CLIP_PROP_CONTINUOUS_SAMPLES, 0).unwrap(), 0);
        assert!(clip.get_int_property(IMAGE_CLIP_PROP_CONNECTED, 1).is_err());
        assert_eq!(clip.get_int_property_n(IMAGE_CLIP_PROP_CONNECTED, 1).unwrap(), vec![1]);
        assert!(clip.get_int_property_n(IMAGE_CLIP_PROP_CONNECTED, 2).is_err());
        assert!(clip.get_int_property(IMAGE_EFFECT_PROP_SUPPORTS_TILES, 0).is_err());
    }

    #[test]
    fn test_string_cardinality_checks() {
        let clip = instance(None);
        assert_eq!(
            clip.get_string_property(IMAGE_EFFECT_PROP_PREMULTIPLICATION, 0).unwrap(),
            IMAGE_OPAQUE
        );
        assert!(clip.get_string_property(IMAGE_EFFECT_PROP_PREMULTIPLICATION, 1).is_err());
        assert!(clip.get_string_property_n(IMAGE_CLIP_PROP_FIELD_ORDER, 0).unwrap().is_empty());
        assert_eq!(
            clip.get_string_property_n(IMAGE_CLIP_PROP_FIELD_ORDER, 1).unwrap(),
            vec![IMAGE_FIELD_NONE.to_string()]
        );
        assert!(clip.get_string_property_n(IMAGE_CLIP_PROP_FIELD_ORDER, 2).is_err());
        assert!(clip.get_string_property(PROP_NAME, 0).is_err());
    }

    #[test]
    fn test_instance_changed_without_effect() {
        let clip = instance(None);
        let status = clip.instance_changed_action(CHANGE_USER_EDITED, 3.0, PointD::new(1.0, 1.0));
        assert_eq!(status, Status::FAILED);
    }

    #[test]
    fn test_instance_changed_reenters_plugin() {
        let effect = RecordingEffect::new(Status::OK);
        let clip = instance(Some(effect.clone()));

        let status = clip.instance_changed_action(CHANGE_PLUGIN_EDITED, 12.5, PointD::new(0.5, 0.25));
        assert_eq!(status, Status::OK);

        let calls = effect.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (action, args) = &calls[0];
        assert_eq!(action, ACTION_INSTANCE_CHANGED);
        assert_eq!(args.get_string(PROP_TYPE, 0).unwrap(), TYPE_CLIP);
        assert_eq!(args.get_string(PROP_NAME, 0).unwrap(), SOURCE_CLIP_NAME);
        assert_eq!(args.get_string(PROP_CHANGE_REASON, 0).unwrap(), CHANGE_PLUGIN_EDITED);
        assert_eq!(args.get_double(PROP_TIME, 0).unwrap(), 12.5);
        assert_eq!(args.get_double_n(IMAGE_EFFECT_PROP_RENDER_SCALE, 2).unwrap(), vec![0.5, 0.25]);
    }

    #[test]
    fn test_instance_changed_returns_plugin_status() {
        let effect = RecordingEffect::new(Status::ERR_MEMORY);
        let clip = instance(Some(effect));
        let status = clip.instance_changed_action(CHANGE_TIME, 0.0, PointD::default());
        assert_eq!(status, Status::ERR_MEMORY);
    }

    #[test]
    fn test_find_supported_comp() {
        let clip = instance(Some(RecordingEffect::new(Status::OK)));
        assert_eq!(clip.find_supported_comp(IMAGE_COMPONENT_RGBA), IMAGE_COMPONENT_RGBA);
        assert_eq!(clip.find_supported_comp(IMAGE_COMPONENT_RGB), IMAGE_COMPONENT_NONE);

        let mut desc = ClipDescriptor::new(OUTPUT_CLIP_NAME);
        desc.add_supported_component(IMAGE_COMPONENT_RGB).unwrap();
        let output = ClipInstance::new(None, defaults(), &desc).unwrap();
        assert!(output.is_output());
        assert_eq!(output.find_supported_comp(IMAGE_COMPONENT_RGBA), IMAGE_COMPONENT_RGB);
        assert_eq!(output.find_supported_comp(IMAGE_COMPONENT_ALPHA), IMAGE_COMPONENT_RGB);
    }
}
