use std::ops::Deref;

use crate::{
    clip::ClipInstance,
    error::PropResult,
    ofx::*,
    property::RawPointer,
};

use super::base::{ImageBase, ImageGeometry};
#[cfg(feature = "opengl")]
use super::schema::TEXTURE_SCHEMA;
use super::schema::IMAGE_SCHEMA;

/// CPU image delivered to a plugin
#[derive(Debug)]
pub struct Image {
    base: ImageBase,
}

impl Image {
    pub fn new() -> Self {
        let mut base = ImageBase::new();
        base.properties.add_properties(IMAGE_SCHEMA);
        Self { base }
    }

    pub fn from_clip(clip: &ClipInstance) -> PropResult<Self> {
        let mut base = ImageBase::from_clip(clip)?;
        base.properties.add_properties(IMAGE_SCHEMA);
        Ok(Self { base })
    }

    /// Full image: clip format, geometry and pixel data
    ///
    /// The pixels stay owned by the caller and must outlive the image.
    pub fn with_data(
        clip: &ClipInstance,
        geometry: &ImageGeometry,
        data: RawPointer,
    ) -> PropResult<Self> {
        let mut base = ImageBase::with_geometry(clip, geometry)?;
        base.properties.add_properties(IMAGE_SCHEMA);
        base.properties.set_pointer(IMAGE_PROP_DATA, 0, data)?;
        Ok(Self { base })
    }

    /// Address of the first pixel, null until set
    pub fn data(&self) -> RawPointer {
        self.base
            .properties
            .get_pointer(IMAGE_PROP_DATA, 0)
            .unwrap_or_default()
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Deref for Image {
    type Target = ImageBase;

    fn deref(&self) -> &ImageBase {
        &self.base
    }
}

/// OpenGL texture delivered to a plugin
#[cfg(feature = "opengl")]
#[derive(Debug)]
pub struct Texture {
    base: ImageBase,
}

#[cfg(feature = "opengl")]
impl Texture {
    pub fn new() -> Self {
        let mut base = ImageBase::new();
        base.properties.add_properties(TEXTURE_SCHEMA);
        Self { base }
    }

    pub fn from_clip(clip: &ClipInstance) -> PropResult<Self> {
        let mut base = ImageBase::from_clip(clip)?;
        base.properties.add_properties(TEXTURE_SCHEMA);
        Ok(Self { base })
    }

    pub fn with_texture(
        clip: &ClipInstance,
        geometry: &ImageGeometry,
        index: i32,
        target: i32,
    ) -> PropResult<Self> {
        let mut base = ImageBase::with_geometry(clip, geometry)?;
        base.properties.add_properties(TEXTURE_SCHEMA);
        base.properties
            .set_int(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_INDEX, 0, index)?;
        base.properties
            .set_int(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_TARGET, 0, target)?;
        Ok(Self { base })
    }

    /// GL texture name, -1 when unset
    pub fn index(&self) -> i32 {
        self.base
            .properties
            .get_int(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_INDEX, 0)
            .unwrap_or(-1)
    }

    /// GL texture target, -1 when unset
    pub fn target(&self) -> i32 {
        self.base
            .properties
            .get_int(IMAGE_EFFECT_PROP_OPENGL_TEXTURE_TARGET, 0)
            .unwrap_or(-1)
    }
}

#[cfg(feature = "opengl")]
impl Default for Texture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "opengl")]
impl Deref for Texture {
    type Target = ImageBase;

    fn deref(&self) -> &ImageBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clip::ClipDescriptor;
    use crate::config::ClipDefaults;
    use crate::image::{Rect, Released};
    use std::sync::Arc;

    fn clip() -> ClipInstance {
        let mut desc = ClipDescriptor::new(OUTPUT_CLIP_NAME);
        desc.add_supported_component(IMAGE_COMPONENT_RGB).unwrap();
        let clip = ClipInstance::new(None, Arc::new(ClipDefaults::default()), &desc).unwrap();
        clip.set_components(IMAGE_COMPONENT_RGB);
        clip.set_pixel_depth(BIT_DEPTH_SHORT);
        clip
    }

    fn geometry() -> ImageGeometry {
        ImageGeometry {
            bounds: Rect::new(0, 0, 4, 2),
            rod: Rect::new(0, 0, 4, 2),
            row_bytes: 4 * 3 * 2,
            unique_identifier: "img".to_string(),
            ..ImageGeometry::default()
        }
    }

    #[test]
    fn test_image_data_starts_null() {
        let image = Image::new();
        assert!(image.data().is_null());
        assert_eq!(image.reference_count(), 1);
    }

    #[test]
    fn test_image_with_data() {
        let mut pixels = vec![0u16; 4 * 2 * 3];
        let data = RawPointer::from(pixels.as_mut_ptr());

        let image = Image::with_data(&clip(), &geometry(), data).unwrap();
        assert_eq!(image.data(), data);
        assert_eq!(image.components(), IMAGE_COMPONENT_RGB);
        assert_eq!(image.pixel_depth(), BIT_DEPTH_SHORT);
        assert_eq!(image.bounds().height(), 2);
        assert_eq!(image.release_reference(), Ok(Released::Destroyed));
    }

    #[test]
    fn test_image_from_clip_has_data_key() {
        let image = Image::from_clip(&clip()).unwrap();
        assert!(image.props().contains(IMAGE_PROP_DATA));
        assert!(image.data().is_null());
    }

    #[cfg(feature = "opengl")]
    #[test]
    fn test_texture_defaults() {
        let texture = Texture::new();
        assert_eq!(texture.index(), -1);
        assert_eq!(texture.target(), -1);
        assert!(!texture.props().contains(IMAGE_PROP_DATA));
    }

    #[cfg(feature = "opengl")]
    #[test]
    fn test_texture_with_ids() {
        let texture = Texture::with_texture(&clip(), &geometry(), 7, 0x0DE1).unwrap();
        assert_eq!(texture.index(), 7);
        assert_eq!(texture.target(), 0x0DE1);
        assert_eq!(texture.unique_identifier(), "img");

        let texture = Texture::from_clip(&clip()).unwrap();
        assert_eq!(texture.components(), IMAGE_COMPONENT_RGB);
        assert_eq!(texture.index(), -1);
    }
}
