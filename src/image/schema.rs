//! Schema tables for image and texture property bags.

use crate::ofx::*;
use crate::property::{PropSpec, PropType};

/// Properties shared by images and textures
pub const IMAGE_BASE_SCHEMA: &[PropSpec] = &[
    PropSpec::new(PROP_TYPE, PropType::String, 1, false, TYPE_IMAGE),
    PropSpec::new(IMAGE_EFFECT_PROP_PIXEL_DEPTH, PropType::String, 1, true, BIT_DEPTH_NONE),
    PropSpec::new(IMAGE_EFFECT_PROP_COMPONENTS, PropType::String, 1, true, IMAGE_COMPONENT_NONE),
    PropSpec::new(IMAGE_EFFECT_PROP_PREMULTIPLICATION, PropType::String, 1, true, IMAGE_OPAQUE),
    PropSpec::new(IMAGE_EFFECT_PROP_RENDER_SCALE, PropType::Double, 2, true, "1.0"),
    PropSpec::new(IMAGE_PROP_PIXEL_ASPECT_RATIO, PropType::Double, 1, true, "1.0"),
    PropSpec::new(IMAGE_PROP_BOUNDS, PropType::Int, 4, true, "0"),
    PropSpec::new(IMAGE_PROP_REGION_OF_DEFINITION, PropType::Int, 4, true, "0"),
    PropSpec::new(IMAGE_PROP_ROW_BYTES, PropType::Int, 1, true, "0"),
    PropSpec::new(IMAGE_PROP_FIELD, PropType::String, 1, true, ""),
    PropSpec::new(IMAGE_CLIP_PROP_FIELD_ORDER, PropType::String, 1, true, ""),
    PropSpec::new(IMAGE_PROP_UNIQUE_IDENTIFIER, PropType::String, 1, true, ""),
];

/// Extra properties of a CPU image
pub const IMAGE_SCHEMA: &[PropSpec] = &[
    PropSpec::new(IMAGE_PROP_DATA, PropType::Pointer, 1, true, ""),
];

/// Extra properties of an OpenGL texture
#[cfg(feature = "opengl")]
pub const TEXTURE_SCHEMA: &[PropSpec] = &[
    PropSpec::new(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_INDEX, PropType::Int, 1, true, "-1"),
    PropSpec::new(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_TARGET, PropType::Int, 1, true, "-1"),
];
