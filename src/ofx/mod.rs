//! # OFX Vocabulary
//!
//! String constants shared with plugins across the C boundary: property names,
//! component layouts, bit depths, premultiplication states, field modes and
//! action names. Plugins compare these byte for byte, so the values must match
//! the published OpenFX headers exactly.

pub mod status;

pub use status::Status;

// Object types
pub const TYPE_CLIP: &str = "OfxTypeClip";
pub const TYPE_IMAGE: &str = "OfxTypeImage";

// Generic properties
pub const PROP_TYPE: &str = "OfxPropType";
pub const PROP_NAME: &str = "OfxPropName";
pub const PROP_LABEL: &str = "OfxPropLabel";
pub const PROP_SHORT_LABEL: &str = "OfxPropShortLabel";
pub const PROP_LONG_LABEL: &str = "OfxPropLongLabel";
pub const PROP_CHANGE_REASON: &str = "OfxPropChangeReason";
pub const PROP_TIME: &str = "OfxPropTime";

// Clip descriptor properties
pub const IMAGE_EFFECT_PROP_SUPPORTED_COMPONENTS: &str = "OfxImageEffectPropSupportedComponents";
pub const IMAGE_EFFECT_PROP_TEMPORAL_CLIP_ACCESS: &str = "OfxImageEffectPropTemporalClipAccess";
pub const IMAGE_CLIP_PROP_OPTIONAL: &str = "OfxImageClipPropOptional";
pub const IMAGE_CLIP_PROP_IS_MASK: &str = "OfxImageClipPropIsMask";
pub const IMAGE_CLIP_PROP_FIELD_EXTRACTION: &str = "OfxImageClipPropFieldExtraction";
pub const IMAGE_EFFECT_PROP_SUPPORTS_TILES: &str = "OfxImageEffectPropSupportsTiles";

// Clip instance properties
pub const IMAGE_EFFECT_PROP_PIXEL_DEPTH: &str = "OfxImageEffectPropPixelDepth";
pub const IMAGE_EFFECT_PROP_COMPONENTS: &str = "OfxImageEffectPropComponents";
pub const IMAGE_CLIP_PROP_UNMAPPED_PIXEL_DEPTH: &str = "OfxImageClipPropUnmappedPixelDepth";
pub const IMAGE_CLIP_PROP_UNMAPPED_COMPONENTS: &str = "OfxImageClipPropUnmappedComponents";
pub const IMAGE_EFFECT_PROP_PREMULTIPLICATION: &str = "OfxImageEffectPropPreMultiplication";
pub const IMAGE_PROP_PIXEL_ASPECT_RATIO: &str = "OfxImagePropPixelAspectRatio";
pub const IMAGE_EFFECT_PROP_FRAME_RATE: &str = "OfxImageEffectPropFrameRate";
pub const IMAGE_EFFECT_PROP_FRAME_RANGE: &str = "OfxImageEffectPropFrameRange";
pub const IMAGE_CLIP_PROP_FIELD_ORDER: &str = "OfxImageClipPropFieldOrder";
pub const IMAGE_CLIP_PROP_CONNECTED: &str = "OfxImageClipPropConnected";
pub const IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RANGE: &str = "OfxImageEffectPropUnmappedFrameRange";
pub const IMAGE_EFFECT_PROP_UNMAPPED_FRAME_RATE: &str = "OfxImageEffectPropUnmappedFrameRate";
pub const IMAGE_CLIP_PROP_CONTINUOUS_SAMPLES: &str = "OfxImageClipPropContinuousSamples";

// Image properties
pub const IMAGE_EFFECT_PROP_RENDER_SCALE: &str = "OfxImageEffectPropRenderScale";
pub const IMAGE_PROP_BOUNDS: &str = "OfxImagePropBounds";
pub const IMAGE_PROP_REGION_OF_DEFINITION: &str = "OfxImagePropRegionOfDefinition";
pub const IMAGE_PROP_ROW_BYTES: &str = "OfxImagePropRowBytes";
pub const IMAGE_PROP_FIELD: &str = "OfxImagePropField";
pub const IMAGE_PROP_UNIQUE_IDENTIFIER: &str = "OfxImagePropUniqueIdentifier";
pub const IMAGE_PROP_DATA: &str = "OfxImagePropData";
pub const IMAGE_EFFECT_PROP_OPENGL_TEXTURE_INDEX: &str = "OfxImageEffectPropOpenGLTextureIndex";
pub const IMAGE_EFFECT_PROP_OPENGL_TEXTURE_TARGET: &str = "OfxImageEffectPropOpenGLTextureTarget";

// Component layouts
pub const IMAGE_COMPONENT_NONE: &str = "OfxImageComponentNone";
pub const IMAGE_COMPONENT_RGBA: &str = "OfxImageComponentRGBA";
pub const IMAGE_COMPONENT_RGB: &str = "OfxImageComponentRGB";
pub const IMAGE_COMPONENT_ALPHA: &str = "OfxImageComponentAlpha";

// Bit depths
pub const BIT_DEPTH_NONE: &str = "OfxBitDepthNone";
pub const BIT_DEPTH_BYTE: &str = "OfxBitDepthByte";
pub const BIT_DEPTH_SHORT: &str = "OfxBitDepthShort";
pub const BIT_DEPTH_HALF: &str = "OfxBitDepthHalf";
pub const BIT_DEPTH_FLOAT: &str = "OfxBitDepthFloat";

// Premultiplication
pub const IMAGE_OPAQUE: &str = "OfxImageOpaque";
pub const IMAGE_PREMULTIPLIED: &str = "OfxImageAlphaPremultiplied";
pub const IMAGE_UNPREMULTIPLIED: &str = "OfxImageAlphaUnPremultiplied";

// Field modes
pub const IMAGE_FIELD_NONE: &str = "OfxFieldNone";
pub const IMAGE_FIELD_BOTH: &str = "OfxFieldBoth";
pub const IMAGE_FIELD_LOWER: &str = "OfxFieldLower";
pub const IMAGE_FIELD_UPPER: &str = "OfxFieldUpper";
pub const IMAGE_FIELD_SINGLE: &str = "OfxFieldSingle";
pub const IMAGE_FIELD_DOUBLED: &str = "OfxFieldDoubled";

// Change reasons
pub const CHANGE_USER_EDITED: &str = "OfxChangeUserEdited";
pub const CHANGE_PLUGIN_EDITED: &str = "OfxChangePluginEdited";
pub const CHANGE_TIME: &str = "OfxChangeTime";

// Actions
pub const ACTION_INSTANCE_CHANGED: &str = "OfxActionInstanceChanged";

// Well known clip names
pub const OUTPUT_CLIP_NAME: &str = "Output";
pub const SOURCE_CLIP_NAME: &str = "Source";

/// The built-in chromatic component layouts.
///
/// Anything outside this list is a custom layout and is never negotiated.
pub const CHROMATIC_COMPONENTS: [&str; 3] = [
    IMAGE_COMPONENT_RGBA,
    IMAGE_COMPONENT_RGB,
    IMAGE_COMPONENT_ALPHA,
];

/// Whether `components` names one of the built-in chromatic layouts
pub fn is_chromatic_component(components: &str) -> bool {
    CHROMATIC_COMPONENTS.contains(&components)
}

/// A 2D double precision point, used for render scales
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointD {
    pub x: f64,
    pub y: f64,
}

impl PointD {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Default for PointD {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}
