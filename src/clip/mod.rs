//! # Clips
//!
//! Clips are the named connection points of an image effect: any number of
//! inputs and the single output.
//!
//! - [`ClipDescriptor`] is what the plugin declares while describing: labels,
//!   supported component layouts and a handful of capability flags.
//! - [`ClipInstance`] is the live clip of one effect instance. It copies its
//!   descriptor and adds the host computed properties (bit depth, frame rate,
//!   frame range and so on), which are fetched from a [`ClipValues`] source on
//!   every read.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use ofx_clip_host::clip::{ClipDescriptor, ClipInstance};
//! use ofx_clip_host::config::ClipDefaults;
//! use ofx_clip_host::ofx;
//!
//! let mut desc = ClipDescriptor::new(ofx::SOURCE_CLIP_NAME);
//! desc.add_supported_component(ofx::IMAGE_COMPONENT_RGB).unwrap();
//!
//! let clip = ClipInstance::new(None, Arc::new(ClipDefaults::default()), &desc).unwrap();
//! assert_eq!(clip.find_supported_comp(ofx::IMAGE_COMPONENT_RGBA), ofx::IMAGE_COMPONENT_RGB);
//! ```

pub mod base;
pub mod instance;
pub mod negotiate;
pub mod schema;
pub mod set;
pub mod traits;
mod values;

pub use base::{ClipBase, ClipDescriptor, ClipHandle, ClipRole};
pub use instance::ClipInstance;
pub use negotiate::find_supported_comp;
pub use set::{ClipDescriptorSet, ClipInstanceSet};
pub use traits::{ClipValues, EffectHandle, EffectInstance};
