//! Schema tables for clip property bags.

use crate::ofx::*;
use crate::property::{PropSpec, PropType};

use super::ClipRole;

/// Placeholder name written by the schema, overwritten on construction
pub const UNNAMED_CLIP: &str = "SET ME ON CONSTRUCTION";

/// Properties common to descriptors and instances.
///
/// The plugin sets these while describing; an instance copies them and
/// relaxes the read-only flags.
pub const CLIP_DESCRIPTOR_SCHEMA: &[PropSpec] = &[
    PropSpec::new(PROP_TYPE, PropType::String, 1, true, TYPE_CLIP),
    PropSpec::new(PROP_NAME, PropType::String, 1, true, UNNAMED_CLIP),
    PropSpec::new(PROP_LABEL, PropType::String, 1, false, ""),
    PropSpec::new(PROP_SHORT_LABEL, PropType::String, 1, false, ""),
    PropSpec::new(PROP_LONG_LABEL, PropType::String, 1, false, ""),
    PropSpec::new(IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS, PropType::String, 0, false, ""),
    PropSpec::new(IMAGE_EFFECT_PROP_TEMPORAL_CLIP_ACCESS, PropType::Int, 1, false, "0"),
    PropSpec::new(IMAGE_CLIP_PROP_OPTIONAL, PropType::Int, 1, false, "0"),
    PropSpec::new(IMAGE_CLIP_PROP_IS_MASK, PropType::Int, 1, false, "0"),
    PropSpec::new(IMAGE_CLIP_PROP_FIELD_EXTRACTION, PropType::String, 1, false, IMAGE_FIELD_DOUBLED),
    PropSpec::new(IMAGE_EFFECT_PROP_SUPPORTS_TILES, PropType::Int, 1, false, "1"),
];

/// Instance only properties.
///
/// Always read-only to the plugin; their values come from the host through
/// a get hook rather than from these defaults.
pub const CLIP_INSTANCE_SCHEMA: &[PropSpec] = &[
    PropSpec::new(IMAGE_EFFECT_PROP_PIXEL_DEPTH, PropType::String, 1, true, BIT_DEPTH_NONE),
    PropSpec::new(IMAGE_EFFECT_PROP_COMPONENTS, PropType::String, 1, true, IMAGE_COMPONENT_NONE),
    PropSpec::new(IMAGE_CLIP_PROP_UNMAPPED_PIXEL_DEPTH, PropType::String, 1, true, BIT_DEPTH_NONE),
    PropSpec::new(IMAGE_CLIP_PROP_UNMAPPED_COMPONENTS, PropType::String, 1, true, IMAGE_COMPONENT_NONE),
    PropSpec::new(IMAGE_EFFECT_PROP_PREMULTIPLICATION, PropType::String, 1, true, IMAGE_OPAQUE),
    PropSpec::new(IMAGE_PROP_PIXEL_ASPECT_RATIO, PropType::Double, 1, true, "1.0"),
    PropSpec::new(IMAGE_EFFECT_PROP_FRAME_RATE, PropType::Double, 1, true, "25.0"),
    PropSpec::new(IMAGE_EFFECT_PROP_FRAME_RANGE, PropType::Double, 2, true, "0"),
    PropSpec::new(IMAGE_CLIP_PROP_FIELD_ORDER, PropType::String, 1, true, IMAGE_FIELD_NONE),
    PropSpec::new(IMAGE_CLIP_PROP_CONNECTED, PropType::Int, 1, true, "0"),
    PropSpec::new(IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE, PropType::Double, 2, true, "0"),
    PropSpec::new(IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RATE, PropType::Double, 1, true, "25.0"),
    PropSpec::new(IMAGE_CLIP_PROP_CONTINUOUS_SAMPLES, PropType::Int, 1, true, "0"),
];

/// In-args of the instance changed action when a clip changed
pub const CLIP_CHANGED_ARGS_SCHEMA: &[PropSpec] = &[
    PropSpec::new(PROP_TYPE, PropType::String, 1, true, TYPE_CLIP),
    PropSpec::new(PROP_NAME, PropType::String, 1, true, ""),
    PropSpec::new(PROP_CHANGE_REASON, PropType::String, 1, true, ""),
    PropSpec::new(PROP_TIME, PropType::Double, 1, true, "0"),
    PropSpec::new(IMAGE_EFFECT_PROP_RENDER_SCALE, PropType::Double, 2, true, "0"),
];

fn find(table: &[PropSpec], key: &str) -> Option<PropSpec> {
    table.iter().find(|spec| spec.name == key).copied()
}

/// Whether `key` is read-only to the plugin on a clip of the given role.
///
/// Returns `None` for keys no clip schema declares.
pub fn plugin_read_only(key: &str, role: ClipRole) -> Option<bool> {
    if let Some(spec) = find(CLIP_DESCRIPTOR_SCHEMA, key) {
        return Some(match role {
            ClipRole::Descriptor => spec.plugin_read_only,
            ClipRole::Instance => false,
        });
    }
    match (find(CLIP_INSTANCE_SCHEMA, key), role) {
        (Some(_), ClipRole::Instance) => Some(true),
        _ => None,
    }
}

/// Whether `key` is one of the host computed instance keys
pub fn is_instance_only(key: &str) -> bool {
    find(CLIP_INSTANCE_SCHEMA, key).is_some()
}
