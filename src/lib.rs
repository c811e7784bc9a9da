//! # OFX Clip Host
//!
//! Host side clip model for OpenFX image effect plugins.
//!
//! A plugin declares its clips while describing an effect; the host turns
//! those declarations into live clip instances, negotiates the component
//! layout each clip delivers, notifies the plugin when a clip changes and
//! hands out reference counted images and textures.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ofx_clip_host::{
//!     clip::{ClipDescriptorSet, ClipInstanceSet, ClipValues},
//!     config::Config,
//!     image::{Image, ImageGeometry, Rect},
//!     ofx,
//!     property::RawPointer,
//! };
//!
//! # fn main() -> ofx_clip_host::Result<()> {
//! let config = Config::default();
//!
//! let mut descriptors = ClipDescriptorSet::new();
//! descriptors
//!     .define_clip(ofx::SOURCE_CLIP_NAME)
//!     .add_supported_component(ofx::IMAGE_COMPONENT_RGBA)?;
//! descriptors
//!     .define_clip(ofx::OUTPUT_CLIP_NAME)
//!     .add_supported_component(ofx::IMAGE_COMPONENT_RGBA)?;
//!
//! let clips = ClipInstanceSet::instantiate(None, &descriptors, |_| {
//!     Arc::new(config.clip.clone()) as Arc<dyn ClipValues>
//! })?;
//!
//! let source = clips.get(ofx::SOURCE_CLIP_NAME).unwrap();
//! let components = source.find_supported_comp(ofx::IMAGE_COMPONENT_RGB);
//! source.set_components(&components);
//!
//! let geometry = ImageGeometry {
//!     bounds: Rect::new(0, 0, 64, 64),
//!     ..ImageGeometry::default()
//! };
//! let image = Image::with_data(source, &geometry, RawPointer::null())?;
//! assert_eq!(image.components(), ofx::IMAGE_COMPONENT_RGBA);
//! assert_eq!(image.bounds().width(), 64);
//! image.release_reference()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`ofx`] - API string constants and status codes
//! - [`property`] - Typed property bags with get hooks
//! - [`clip`] - Clip descriptors, instances and component negotiation
//! - [`image`] - Reference counted images and textures
//! - [`config`] - Configuration management

pub mod clip;
pub mod config;
pub mod error;
pub mod image;
pub mod ofx;
pub mod property;

// Re-export commonly used types for convenience
pub use crate::{
    clip::{ClipDescriptor, ClipInstance},
    config::Config,
    error::{HostError, Result},
    image::Image,
    property::PropertySet,
};
