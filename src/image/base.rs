use tracing::{debug, warn};

use crate::{
    clip::ClipInstance,
    error::{ImageError, PropResult},
    ofx::*,
    property::{PropertySet, PropertySetHandle},
};

use super::{
    refcount::{ReferenceCount, Released},
    schema::IMAGE_BASE_SCHEMA,
};

/// Integer pixel rectangle, `x2`/`y2` exclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Rect {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> i32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i32 {
        self.y2 - self.y1
    }

    fn to_array(self) -> [i32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    fn from_slice(values: &[i32]) -> Self {
        match values {
            [x1, y1, x2, y2] => Self::new(*x1, *y1, *x2, *y2),
            _ => Self::default(),
        }
    }
}

/// Per call description of a delivered image
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGeometry {
    pub render_scale: PointD,
    pub bounds: Rect,
    pub rod: Rect,
    pub row_bytes: i32,
    pub field: String,
    pub unique_identifier: String,
}

impl Default for ImageGeometry {
    fn default() -> Self {
        Self {
            render_scale: PointD::default(),
            bounds: Rect::default(),
            rod: Rect::default(),
            row_bytes: 0,
            field: IMAGE_FIELD_NONE.to_string(),
            unique_identifier: String::new(),
        }
    }
}

/// Opaque image or texture handle handed across the C boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(usize);

impl ImageHandle {
    pub fn as_raw(self) -> usize {
        self.0
    }
}

/// Properties and reference count shared by images and textures
///
/// The format fields are copied from the producing clip when the record is
/// built. Later changes to the clip do not reach images already handed out.
#[derive(Debug)]
pub struct ImageBase {
    pub(crate) properties: PropertySet,
    references: ReferenceCount,
}

impl ImageBase {
    /// An image with every property at its default
    pub fn new() -> Self {
        Self {
            properties: PropertySet::new(IMAGE_BASE_SCHEMA),
            references: ReferenceCount::new(),
        }
    }

    /// An image carrying the clip's current format
    pub fn from_clip(clip: &ClipInstance) -> PropResult<Self> {
        let mut image = Self::new();
        image.copy_clip_format(clip)?;
        Ok(image)
    }

    /// An image carrying the clip's current format and the given geometry
    pub fn with_geometry(clip: &ClipInstance, geometry: &ImageGeometry) -> PropResult<Self> {
        let mut image = Self::from_clip(clip)?;
        let props = &mut image.properties;

        props.set_double_n(
            IMAGE_EFFECT_PROP_RENDER_SCALE,
            &[geometry.render_scale.x, geometry.render_scale.y],
        )?;
        props.set_int_n(IMAGE_PROP_BOUNDS, &geometry.bounds.to_array())?;
        props.set_int_n(IMAGE_PROP_REGION_OF_DEFINITION, &geometry.rod.to_array())?;
        props.set_int(IMAGE_PROP_ROW_BYTES, 0, geometry.row_bytes)?;
        props.set_string(IMAGE_PROP_FIELD, 0, &geometry.field)?;
        props.set_string(IMAGE_CLIP_PROP_FIELD_ORDER, 0, &geometry.field)?;
        props.set_string(IMAGE_PROP_UNIQUE_IDENTIFIER, 0, &geometry.unique_identifier)?;

        debug!(
            "Built image {:?} for clip {}: bounds {:?}",
            geometry.unique_identifier,
            clip.name(),
            geometry.bounds
        );
        Ok(image)
    }

    fn copy_clip_format(&mut self, clip: &ClipInstance) -> PropResult<()> {
        let source = clip.props();
        let props = &mut self.properties;

        let depth = source.get_string(IMAGE_EFFECT_PROP_PIXEL_DEPTH, 0)?;
        props.set_string(IMAGE_EFFECT_PROP_PIXEL_DEPTH, 0, &depth)?;

        let components = source.get_string(IMAGE_EFFECT_PROP_COMPONENTS, 0)?;
        props.set_string(IMAGE_EFFECT_PROP_COMPONENTS, 0, &components)?;

        let premult = source.get_string(IMAGE_EFFECT_PROP_PREMULTIPLICATION, 0)?;
        props.set_string(IMAGE_EFFECT_PROP_PREMULTIPLICATION, 0, &premult)?;

        let aspect = source.get_double(IMAGE_PROP_PIXEL_ASPECT_RATIO, 0)?;
        props.set_double(IMAGE_PROP_PIXEL_ASPECT_RATIO, 0, aspect)?;
        Ok(())
    }

    fn string_prop(&self, key: &str) -> String {
        self.properties.get_string(key, 0).unwrap_or_default()
    }

    fn rect_prop(&self, key: &str) -> Rect {
        let values = self.properties.get_int_n(key, 4).unwrap_or_default();
        Rect::from_slice(&values)
    }

    pub fn pixel_depth(&self) -> String {
        self.string_prop(IMAGE_EFFECT_PROP_PIXEL_DEPTH)
    }

    pub fn components(&self) -> String {
        self.string_prop(IMAGE_EFFECT_PROP_COMPONENTS)
    }

    pub fn premultiplication(&self) -> String {
        self.string_prop(IMAGE_EFFECT_PROP_PREMULTIPLICATION)
    }

    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.properties
            .get_double(IMAGE_PROP_PIXEL_ASPECT_RATIO, 0)
            .unwrap_or(1.0)
    }

    pub fn render_scale(&self) -> PointD {
        match self.properties.get_double_n(IMAGE_EFFECT_PROP_RENDER_SCALE, 2).as_deref() {
            Ok([x, y]) => PointD::new(*x, *y),
            _ => PointD::default(),
        }
    }

    /// Pixel bounds of the data actually held
    pub fn bounds(&self) -> Rect {
        self.rect_prop(IMAGE_PROP_BOUNDS)
    }

    /// Region of definition the image was rendered for
    pub fn rod(&self) -> Rect {
        self.rect_prop(IMAGE_PROP_REGION_OF_DEFINITION)
    }

    pub fn row_bytes(&self) -> i32 {
        self.properties.get_int(IMAGE_PROP_ROW_BYTES, 0).unwrap_or_default()
    }

    pub fn field(&self) -> String {
        self.string_prop(IMAGE_PROP_FIELD)
    }

    pub fn unique_identifier(&self) -> String {
        self.string_prop(IMAGE_PROP_UNIQUE_IDENTIFIER)
    }

    pub fn props(&self) -> &PropertySet {
        &self.properties
    }

    pub fn prop_handle(&self) -> PropertySetHandle {
        self.properties.handle()
    }

    pub fn handle(&self) -> ImageHandle {
        ImageHandle(self as *const Self as usize)
    }

    pub fn reference_count(&self) -> usize {
        self.references.get()
    }

    pub fn is_destroyed(&self) -> bool {
        self.reference_count() == 0
    }

    /// Register another holder of this record
    pub fn add_reference(&self) -> Result<usize, ImageError> {
        self.references.retain().ok_or_else(|| ImageError::AlreadyReleased {
            identifier: self.unique_identifier(),
        })
    }

    /// Drop one holder's reference
    ///
    /// The release that takes the count to zero destroys the record; the
    /// owner must not hand it out again. Releasing a destroyed record is an
    /// error, never a second destruction.
    pub fn release_reference(&self) -> Result<Released, ImageError> {
        match self.references.release() {
            Some(Released::Destroyed) => {
                debug!("Released last reference to image {:?}", self.unique_identifier());
                Ok(Released::Destroyed)
            }
            Some(alive) => Ok(alive),
            None => {
                warn!("Image {:?} released after destruction", self.unique_identifier());
                Err(ImageError::AlreadyReleased {
                    identifier: self.unique_identifier(),
                })
            }
        }
    }
}

impl Default for ImageBase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ImageBase {
    fn drop(&mut self) {
        let outstanding = self.references.get();
        if outstanding > 0 {
            warn!(
                "Image {:?} dropped with {} outstanding references",
                self.unique_identifier(),
                outstanding
            );
        }
    }
}
